//! Preview enter command implementation.

use anyhow::{Context, Result};
use clap::Args;

use lede_core::ContentRef;

use crate::cli::SourceArgs;
use crate::output;
use crate::preview::StoredPreview;
use crate::preview::storage;
use crate::source;

#[derive(Args, Debug)]
pub struct EnterArgs {
    /// Preview ref, as handed out by the CMS preview link
    pub content_ref: String,
}

pub async fn run(args: EnterArgs, source: &SourceArgs) -> Result<()> {
    let content_ref = ContentRef::new(args.content_ref).context("Invalid preview ref")?;
    let repo = source::repo_url(source)?;

    storage::save_preview(&StoredPreview::new(content_ref, repo.clone()))?;

    output::success(&format!("Preview mode on for {}", repo));
    Ok(())
}
