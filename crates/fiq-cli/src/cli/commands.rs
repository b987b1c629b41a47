use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the study API.
    Serve(ServeArgs),
    /// Score a response file.
    Score {
        #[command(subcommand)]
        action: ScoreCommands,
    },
    /// Show how far a response file gets through a questionnaire section.
    Progress(ProgressArgs),
    /// Remote backend diagnostics.
    Backend {
        #[command(subcommand)]
        action: BackendCommands,
    },
    /// Configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

/// A JSON response file: a bare `{key: value}` map or a full questionnaire
/// submission. `-` reads stdin.
#[derive(Clone, Debug, Args)]
pub struct FileArg {
    pub file: PathBuf,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ScoreCommands {
    /// System Usability Scale score (0-100).
    Sus(FileArg),
    /// Trust average and level.
    Trust(FileArg),
    /// Comparison preference analysis.
    Preference(FileArg),
}

#[derive(Clone, Debug, Args)]
pub struct ProgressArgs {
    /// Section name: sus, trust, or preference
    pub section: String,

    #[command(flatten)]
    pub input: FileArg,
}

#[derive(Clone, Debug, Subcommand)]
pub enum BackendCommands {
    /// Health-check every configured backend URL.
    Check,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
}
