use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tp", about = concat!("taskpane v", env!("CARGO_PKG_VERSION"), " - taskwarrior in a terminal panel"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the taskwarrior rc file (defaults to ~/.taskrc)
    #[arg(long, global = true)]
    pub taskrc: Option<String>,

    /// Path to the panel config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one rendered snapshot of the panel and exit
    List,
    /// Show the resolved taskwarrior configuration
    Config,
}
