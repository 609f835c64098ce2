//! Post command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use futures_util::TryStreamExt;
use serde::Serialize;
use tracing::warn;

use lede_core::navigation::{self, Neighbors};
use lede_core::traits::NAVIGATION_PAGE_SIZE;
use lede_core::{
    ContentService, DocumentType, Post, PostLink, QueryOptions, RawPostRecord, Uid, format, links,
    normalize_post, paginate, reading,
};

use crate::cli::SourceArgs;
use crate::output;
use crate::preview::storage;
use crate::source::CliService;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Post uid (the last segment of /post/<uid>)
    pub uid: String,

    /// Print the post as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the post page shows.
#[derive(Debug, Serialize)]
struct PostView {
    post: Post,
    reading_minutes: u32,
    neighbors: Neighbors,
    preview: bool,
}

pub async fn run(args: PostArgs, source: &SourceArgs) -> Result<()> {
    let uid = Uid::new(&args.uid).context("Invalid post uid")?;
    let (repo, service) = CliService::connect(source)?;
    let post_type = DocumentType::post();

    let preview = storage::load_preview().context("Failed to load preview state")?;
    let content_ref = match &preview {
        Some(p) => {
            let content_ref = p.ref_for(&repo);
            if content_ref.is_none() {
                warn!(preview_source = %p.source, "Preview belongs to another source, ignoring it");
            }
            content_ref
        }
        None => None,
    };

    let document = service
        .get_by_uid(&post_type, &uid, content_ref)
        .await
        .with_context(|| format!("Failed to load post '{}'", uid))?;
    let post = normalize_post(document).context("Post is malformed")?;

    let listing = navigation_listing(&service, &post_type).await?;
    let view = PostView {
        reading_minutes: reading::estimate_minutes(&post),
        neighbors: navigation::neighbors(&listing, &post).context("Invalid neighbor post")?,
        preview: content_ref.is_some(),
        post,
    };

    if args.json {
        return output::json_pretty(&view);
    }

    print_post(&view);
    Ok(())
}

/// Every post in service order, title only.
async fn navigation_listing(
    service: &CliService,
    post_type: &DocumentType,
) -> Result<Vec<RawPostRecord>> {
    let options = QueryOptions::new(NAVIGATION_PAGE_SIZE).with_fetch(["title"]);

    paginate(service, post_type, options)
        .map_ok(|page| page.results)
        .try_concat()
        .await
        .context("Failed to load post navigation")
}

fn print_post(view: &PostView) {
    let post = &view.post;

    if view.preview {
        println!("{}", "Modo preview (lede preview exit para sair)".yellow());
        println!();
    }

    output::heading(&post.title);
    output::field("Data", &format::short_date(&post.published_at));
    output::field("Autor", &post.author);
    output::field("Leitura", &format!("{} min", view.reading_minutes));
    if let Some(banner) = &post.banner {
        output::field("Banner", &banner.url);
    }

    for section in &post.sections {
        println!();
        if let Some(heading) = &section.heading {
            output::heading(heading);
        }
        for block in &section.blocks {
            println!("{}", block);
        }
    }

    if view.neighbors.previous.is_some() || view.neighbors.next.is_some() {
        println!();
    }
    if let Some(previous) = &view.neighbors.previous {
        print_link("Post anterior", previous);
    }
    if let Some(next) = &view.neighbors.next {
        print_link("Próximo post", next);
    }
}

fn print_link(label: &str, link: &PostLink) {
    output::field(
        label,
        &format!("{} {}", link.title, links::post_path(&link.uid).dimmed()),
    );
}
