//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::run_demo;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{OutputStyle, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo { style }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _demo(settings, *style)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `orgtree --help`".into(),
        )),
    }
}

#[instrument(level = "debug")]
fn _demo(mut settings: Settings, style: Option<OutputStyle>) -> CliResult<()> {
    if let Some(style) = style {
        settings.style = style;
    }
    debug!("settings: {:?}", settings);
    output::configure(settings.color);

    output::header("orgtree walkthrough");
    let stdout = io::stdout();
    let report = run_demo(&mut stdout.lock(), &settings)?;
    output::success(&format!(
        "{} members left, {} errors reported",
        report.final_outline.len(),
        report.reported_errors.len()
    ));
    Ok(())
}
