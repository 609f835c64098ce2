//! Core traits for content services.

mod pages;
mod service;

pub use pages::{PageStream, paginate};
pub use service::{
    ContentService, LISTING_FIELDS, LISTING_PAGE_SIZE, NAVIGATION_PAGE_SIZE, PATHS_PAGE_SIZE,
    QueryOptions,
};
