pub mod client;
pub mod config_io;
pub mod taskrc;
pub mod watcher;
