//! lede - CLI for browsing a lede blog's content.
//!
//! A thin wrapper over `lede-core`, reading posts from a Prismic
//! repository or a local content directory.

mod cli;
mod commands;
mod output;
mod preview;
mod source;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{paths, post, posts, preview as preview_cmd};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Posts(args) => posts::run(args, &cli.source).await,
        Commands::Post(args) => post::run(args, &cli.source).await,
        Commands::Paths(args) => paths::run(args, &cli.source).await,
        Commands::Preview(cmd) => preview_cmd::handle(cmd, &cli.source).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
