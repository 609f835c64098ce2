//! Previous/next post navigation.

use serde::Serialize;

use crate::Result;
use crate::content::{Post, PostLink, RawPostRecord};
use crate::error::MalformedRecordError;
use crate::types::Uid;

/// The posts listed before and after a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    pub previous: Option<PostLink>,
    pub next: Option<PostLink>,
}

/// Find the neighbors of `current` in a listing, in service order.
///
/// Records are matched by document id when the post has one, by uid
/// otherwise. A post missing from the listing has no neighbors.
///
/// # Errors
///
/// Fails with `MalformedRecord` if a neighbor has no valid uid.
pub fn neighbors(listing: &[RawPostRecord], current: &Post) -> Result<Neighbors> {
    let Some(index) = listing.iter().position(|record| is_current(record, current)) else {
        return Ok(Neighbors::default());
    };

    let previous = index
        .checked_sub(1)
        .and_then(|i| listing.get(i))
        .map(link)
        .transpose()?;
    let next = listing.get(index + 1).map(link).transpose()?;

    Ok(Neighbors { previous, next })
}

fn is_current(record: &RawPostRecord, current: &Post) -> bool {
    match &current.id {
        Some(id) => record.id.as_deref() == Some(id.as_str()),
        None => record.uid.as_deref() == Some(current.uid.as_str()),
    }
}

fn link(record: &RawPostRecord) -> Result<PostLink> {
    let label = record.id.clone().unwrap_or_else(|| "<unidentified>".to_string());
    let uid = record
        .uid
        .clone()
        .and_then(|u| Uid::new(u).ok())
        .ok_or(MalformedRecordError::MissingUid { record: label })?;

    Ok(PostLink {
        uid,
        title: record.data.title.clone().unwrap_or_default(),
    })
}
