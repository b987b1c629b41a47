pub mod backend;
pub mod config;
pub mod progress;
pub mod score;
pub mod serve;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args).await,
        Commands::Score { action } => score::handle(&action, flags),
        Commands::Progress(args) => progress::handle(&args, flags),
        Commands::Backend { action } => backend::handle(&action, flags).await,
        Commands::Config { action } => config::handle(&action, flags),
    }
}
