//! Preview exit command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::preview::storage;

#[derive(Args, Debug)]
pub struct ExitArgs {}

pub async fn run(_args: ExitArgs) -> Result<()> {
    if storage::clear_preview()? {
        output::success("Preview mode off");
    } else {
        output::note("Preview mode was not on.");
    }
    Ok(())
}
