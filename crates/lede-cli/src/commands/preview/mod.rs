//! Preview subcommand implementations.

mod enter;
mod exit;
mod status;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::SourceArgs;

#[derive(Args, Debug)]
pub struct PreviewCommand {
    #[command(subcommand)]
    pub command: PreviewSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PreviewSubcommand {
    /// Read posts from a preview ref
    Enter(enter::EnterArgs),

    /// Leave preview mode
    Exit(exit::ExitArgs),

    /// Show the active preview
    Status(status::StatusArgs),
}

pub async fn handle(cmd: PreviewCommand, source: &SourceArgs) -> Result<()> {
    match cmd.command {
        PreviewSubcommand::Enter(args) => enter::run(args, source).await,
        PreviewSubcommand::Exit(args) => exit::run(args).await,
        PreviewSubcommand::Status(args) => status::run(args).await,
    }
}
