//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::OutputStyle;

/// Organizational hierarchy: hire, fire with reassignment, access levels
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Extra settings file, applied on top of the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath, env = "ORGTREE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the hire/fire walkthrough and print the chart after each step
    Demo {
        /// Chart style (default from settings)
        #[arg(long, value_enum)]
        style: Option<OutputStyle>,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_demo_with_style() {
        let cli = Cli::try_parse_from(["orgtree", "-dd", "demo", "--style", "tree"]).unwrap();
        assert_eq!(cli.debug, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Demo {
                style: Some(OutputStyle::Tree)
            })
        ));
    }
}
