use clap::Parser;

pub mod commands;
pub mod global;

pub use commands::{
    BackendCommands, Commands, ConfigCommands, FileArg, ProgressArgs, ScoreCommands, ServeArgs,
};
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `fiq` binary.
#[derive(Debug, Parser)]
#[command(name = "fiq", version, about = "FormularIQ - usability study backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    use super::{Cli, Commands, OutputFormat, ScoreCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["fiq", "--format", "table", "--verbose", "score", "sus", "a.json"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Score { action: ScoreCommands::Sus(ref arg) } if arg.file == PathBuf::from("a.json")
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["fiq", "progress", "trust", "-", "--quiet"])
            .expect("cli should parse");
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Progress(ref args) if args.section == "trust"));
    }

    #[test]
    fn serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["fiq", "serve", "--port", "9000"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Serve(ref args) if args.port == Some(9000) && args.host.is_none()
        ));
    }
}
