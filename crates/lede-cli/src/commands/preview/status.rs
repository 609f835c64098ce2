//! Preview status command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::preview::storage;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the preview state as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let preview = storage::load_preview()?;

    if args.json {
        return output::json_pretty(&preview);
    }

    match preview {
        Some(preview) => {
            output::field("Ref", preview.content_ref.as_str());
            output::field("Source", preview.source.as_str());
            output::field("Since", &preview.entered_at.to_rfc3339());
        }
        None => output::note("Preview mode is off."),
    }
    Ok(())
}
