//! Content records and posts.
//!
//! Raw records come from a [`ContentService`](crate::ContentService);
//! [`normalize`](crate::normalize::normalize) turns them into posts.

mod post;
mod record;

pub use post::{Banner, Post, PostLink, PostSummary, Section};
pub use record::{
    RawImage, RawPage, RawPostBody, RawPostData, RawPostDocument, RawPostRecord, RawSection,
    RichTextBlock,
};
