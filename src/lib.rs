//! taskpane: a taskwarrior panel for terminal dashboards.
//!
//! The pipeline runs strictly forward: [`io::taskrc`] resolves and parses the
//! taskwarrior configuration, [`io::client`] shells out to `task export` and
//! decodes the result, and [`panel`] turns the records into aligned,
//! style-tagged rows. [`tui`] is a small host that draws the panel and
//! refreshes it on file changes, a timer, or a key press.

pub mod cli;
pub mod io;
pub mod model;
pub mod panel;
pub mod tui;
pub mod util;
