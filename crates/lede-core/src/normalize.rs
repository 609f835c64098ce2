//! Record normalization.
//!
//! Maps raw service records into [`PostSummary`] and [`Post`]. All
//! functions here are pure: no I/O, and the same input always yields the
//! same output.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::Result;
use crate::content::{
    Banner, Post, PostSummary, RawImage, RawPostDocument, RawPostRecord, RawSection, Section,
};
use crate::error::{Error, MalformedRecordError};
use crate::types::Uid;

/// Timestamp layouts accepted besides RFC 3339. The search API writes
/// offsets without a colon (`+0000`).
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

/// ISO 8601 layouts without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Normalize a listed record.
///
/// # Errors
///
/// Fails with [`Error::MalformedRecord`] if the uid is missing or empty,
/// or the first publication date is missing or unparseable.
pub fn normalize(raw: RawPostRecord) -> Result<PostSummary> {
    let label = record_label(raw.uid.as_deref(), raw.id.as_deref());
    let uid = require_uid(raw.uid, &label)?;
    let published_at = require_timestamp(raw.first_publication_date.as_deref(), &label)?;

    Ok(PostSummary::new(
        uid,
        published_at,
        raw.data.title.unwrap_or_default(),
        raw.data.subtitle.unwrap_or_default(),
        raw.data.author.unwrap_or_default(),
    ))
}

/// Normalize a page of records, keeping their order.
///
/// Stops at the first malformed record.
pub fn normalize_page(records: Vec<RawPostRecord>) -> Result<Vec<PostSummary>> {
    records.into_iter().map(normalize).collect()
}

/// Normalize a full post document.
pub fn normalize_post(raw: RawPostDocument) -> Result<Post> {
    let label = record_label(raw.uid.as_deref(), raw.id.as_deref());
    let uid = require_uid(raw.uid, &label)?;
    let published_at = require_timestamp(raw.first_publication_date.as_deref(), &label)?;
    let body = raw.data;

    Ok(Post {
        id: raw.id,
        uid,
        published_at,
        title: body.title.unwrap_or_default(),
        banner: body.banner.and_then(banner),
        author: body.author.unwrap_or_default(),
        sections: body.content.into_iter().map(section).collect(),
    })
}

/// Parse a service timestamp, keeping the offset it was written with.
///
/// Accepts RFC 3339 and the `+0000` offset form, with or without seconds.
/// Datetimes without an offset and bare dates (midnight) are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, fmt) {
            return Some(parsed);
        }
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    for fmt in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(parsed.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
}

fn record_label(uid: Option<&str>, id: Option<&str>) -> String {
    uid.filter(|u| !u.is_empty())
        .or(id)
        .unwrap_or("<unidentified>")
        .to_string()
}

fn require_uid(uid: Option<String>, label: &str) -> Result<Uid> {
    uid.and_then(|u| Uid::new(u).ok()).ok_or_else(|| {
        Error::from(MalformedRecordError::MissingUid {
            record: label.to_string(),
        })
    })
}

fn require_timestamp(value: Option<&str>, label: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.ok_or_else(|| MalformedRecordError::MissingPublicationDate {
        record: label.to_string(),
    })?;

    parse_timestamp(value).ok_or_else(|| {
        Error::from(MalformedRecordError::InvalidPublicationDate {
            record: label.to_string(),
            value: value.to_string(),
        })
    })
}

fn banner(image: RawImage) -> Option<Banner> {
    image
        .url
        .filter(|url| !url.is_empty())
        .map(|url| Banner {
            url,
            alt: image.alt,
        })
}

fn section(raw: RawSection) -> Section {
    Section {
        heading: raw.heading,
        blocks: raw.body.into_iter().map(|block| block.text).collect(),
    }
}
