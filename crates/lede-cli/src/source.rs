//! Content source selection.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use lede_core::{
    ContentRef, ContentService, DocumentType, QueryOptions, RawPage, RawPostDocument, RepoUrl, Uid,
};
use lede_file::FileContentService;
use lede_prismic::{ClientOptions, PrismicService};

use crate::cli::SourceArgs;

/// Content service wrapper for CLI use.
#[derive(Debug)]
pub enum CliService {
    File(FileContentService),
    Prismic(PrismicService),
}

impl CliService {
    /// Connect to the source named by `--source` / `LEDE_SOURCE`.
    pub fn connect(args: &SourceArgs) -> Result<(RepoUrl, Self)> {
        let repo = repo_url(args)?;

        let service = if repo.is_local() {
            let service =
                FileContentService::from_url(&repo).context("Invalid content directory")?;
            CliService::File(service)
        } else {
            let options = ClientOptions {
                access_token: args.access_token.clone(),
                ..ClientOptions::default()
            };
            let service =
                PrismicService::new(repo.clone(), options).context("Failed to create client")?;
            CliService::Prismic(service)
        };

        debug!(source = %repo, "Connected to content source");
        Ok((repo, service))
    }
}

/// Resolve the configured source into a repository URL.
pub fn repo_url(args: &SourceArgs) -> Result<RepoUrl> {
    let source = args
        .source
        .as_deref()
        .context("No content source. Pass --source or set LEDE_SOURCE.")?;

    RepoUrl::from_source(source).context("Invalid content source")
}

#[async_trait]
impl ContentService for CliService {
    async fn query_by_type(
        &self,
        document_type: &DocumentType,
        options: &QueryOptions,
    ) -> lede_core::Result<RawPage> {
        match self {
            CliService::File(service) => service.query_by_type(document_type, options).await,
            CliService::Prismic(service) => service.query_by_type(document_type, options).await,
        }
    }

    async fn get_by_uid(
        &self,
        document_type: &DocumentType,
        uid: &Uid,
        content_ref: Option<&ContentRef>,
    ) -> lede_core::Result<RawPostDocument> {
        match self {
            CliService::File(service) => {
                service.get_by_uid(document_type, uid, content_ref).await
            }
            CliService::Prismic(service) => {
                service.get_by_uid(document_type, uid, content_ref).await
            }
        }
    }
}
