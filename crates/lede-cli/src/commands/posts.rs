//! Posts command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use lede_core::traits::LISTING_PAGE_SIZE;
use lede_core::{
    DocumentType, ListingState, PostListing, PostSummary, QueryOptions, format, links,
};

use crate::cli::SourceArgs;
use crate::output;
use crate::source::CliService;

/// Label of the home page's "load more" button.
const LOAD_MORE: &str = "Carregar mais posts";

#[derive(Args, Debug)]
pub struct PostsArgs {
    /// Posts per page
    #[arg(long, default_value_t = LISTING_PAGE_SIZE)]
    pub page_size: u32,

    /// Number of "load more" steps after the first page
    #[arg(long, default_value_t = 0, conflicts_with = "all")]
    pub more: usize,

    /// Load every page
    #[arg(long)]
    pub all: bool,

    /// Print the listing state as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PostsArgs, source: &SourceArgs) -> Result<()> {
    let (_, service) = CliService::connect(source)?;

    let options = QueryOptions::listing().with_page_size(args.page_size);
    let listing = PostListing::open_with(service, DocumentType::post(), options)
        .await
        .context("Failed to load posts")?;

    let mut steps = 0;
    while listing.has_more() && (args.all || steps < args.more) {
        listing.load_next().await.context("Failed to load more posts")?;
        steps += 1;
    }

    let state = listing.into_state();

    if args.json {
        return output::json_pretty(&state);
    }

    print_listing(&state);
    Ok(())
}

fn print_listing(state: &ListingState) {
    if state.is_empty() {
        output::note("No posts found.");
        return;
    }

    for (i, post) in state.items().iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_summary(post);
    }

    if state.has_more() {
        println!();
        println!("{}", LOAD_MORE.cyan());
    }
}

fn print_summary(post: &PostSummary) {
    output::heading(post.title());
    if !post.subtitle().is_empty() {
        println!("{}", post.subtitle());
    }
    println!(
        "{}  {}  {}",
        format::short_date(post.published_at()).dimmed(),
        post.author().dimmed(),
        links::post_path(post.uid()).dimmed()
    );
}
