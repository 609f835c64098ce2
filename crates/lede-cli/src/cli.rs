//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::paths::PathsArgs;
use crate::commands::post::PostArgs;
use crate::commands::posts::PostsArgs;
use crate::commands::preview::PreviewCommand;

/// Browse the posts of a lede blog.
#[derive(Parser, Debug)]
#[command(name = "lede")]
#[command(author, version = env!("LEDE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where content is read from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Repository name, https:// URL or file:// content directory
    #[arg(long, env = "LEDE_SOURCE", global = true)]
    pub source: Option<String>,

    /// Access token for private repositories
    #[arg(long, env = "LEDE_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts, newest page first, with "load more" steps
    Posts(PostsArgs),

    /// Show a single post
    Post(PostArgs),

    /// Print the site path of every post
    Paths(PathsArgs),

    /// Preview mode for unpublished content
    Preview(PreviewCommand),
}
