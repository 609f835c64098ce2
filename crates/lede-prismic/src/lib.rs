//! lede-prismic - Prismic-backed content service for lede.
//!
//! [`PrismicService`] implements [`lede_core::ContentService`] on top of
//! the REST API v2: type queries go through `documents/search`, and
//! `next_page` URLs are used as opaque cursors.
//!
//! ```no_run
//! use lede_core::{PostListing, RepoUrl};
//! use lede_prismic::{ClientOptions, PrismicService};
//!
//! # async fn example() -> lede_core::Result<()> {
//! let repo = RepoUrl::from_repo_name("my-blog")?;
//! let service = PrismicService::new(repo, ClientOptions::default())?;
//!
//! let listing = PostListing::open(service).await?;
//! let posts = listing.load_next().await?;
//! println!("{} posts loaded", posts.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod predicates;
mod service;

pub use service::{ClientOptions, PrismicService};
