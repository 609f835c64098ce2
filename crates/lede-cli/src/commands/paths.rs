//! Paths command implementation.

use anyhow::{Context, Result};
use clap::Args;
use futures_util::TryStreamExt;

use lede_core::traits::PATHS_PAGE_SIZE;
use lede_core::{DocumentType, QueryOptions, links, normalize_page, paginate};

use crate::cli::SourceArgs;
use crate::source::CliService;

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Posts requested per page while walking the repository
    #[arg(long, default_value_t = PATHS_PAGE_SIZE)]
    pub page_size: u32,
}

pub async fn run(args: PathsArgs, source: &SourceArgs) -> Result<()> {
    let (_, service) = CliService::connect(source)?;
    let post_type = DocumentType::post();
    let options = QueryOptions::new(args.page_size);

    let mut pages = std::pin::pin!(paginate(&service, &post_type, options));
    while let Some(page) = pages.try_next().await.context("Failed to list posts")? {
        let posts = normalize_page(page.results).context("Invalid post in listing")?;
        for post in &posts {
            println!("{}", links::resolve(&post_type, post.uid()));
        }
    }

    Ok(())
}
