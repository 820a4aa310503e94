use crate::cli::commands::{Cli, Commands};
use crate::io::{client, config_io, taskrc};
use crate::model::PanelConfig;
use crate::panel;
use crate::tui;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Dispatch a parsed subcommand to its handler.
pub fn dispatch(cli: Cli) -> CliResult {
    match cli.command {
        Some(Commands::List) => cmd_list(&cli),
        Some(Commands::Config) => cmd_config(&cli),
        None => cmd_tui(&cli),
    }
}

fn load_config(cli: &Cli) -> Result<PanelConfig, config_io::ConfigError> {
    let mut config = config_io::load_config(cli.config.as_deref())?;
    // the command line wins over the config file
    if let Some(rc) = &cli.taskrc {
        config.taskrc = Some(rc.clone());
    }
    Ok(config)
}

/// Launch the TUI panel.
pub fn cmd_tui(cli: &Cli) -> CliResult {
    let config = load_config(cli)?;
    tui::run(config)
}

/// Fetch once and print the rendered rows (or the raw export with --json).
pub fn cmd_list(cli: &Cli) -> CliResult {
    let config = load_config(cli)?;
    let rc = taskrc::resolve_and_parse(config.taskrc.as_deref())?;
    let tasks = client::fetch_all(&rc, config.refresh.fetch_timeout())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    let visible = panel::visible_tasks(&tasks);
    if visible.is_empty() {
        println!("{}", panel::EMPTY_BODY);
        return Ok(());
    }
    for row in panel::build_rows(&visible, &config.display, None) {
        println!("{}", row.text);
    }
    Ok(())
}

/// Show where the taskrc resolved to and what was extracted from it.
pub fn cmd_config(cli: &Cli) -> CliResult {
    let config = load_config(cli)?;
    let rc = taskrc::resolve_and_parse(config.taskrc.as_deref())?;
    println!("taskrc: {}", rc.path.display());
    if rc.data_location.is_empty() {
        println!("data.location: (unset)");
    } else {
        println!("data.location: {}", rc.data_location);
    }
    Ok(())
}
