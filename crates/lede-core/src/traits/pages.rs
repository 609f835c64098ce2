//! Page streams.

use futures_core::Stream;
use tracing::{debug, warn};

use crate::content::RawPage;
use crate::types::DocumentType;
use crate::{ContentService, Result};

use super::QueryOptions;

/// Stream of result pages, in fetch order.
pub trait PageStream: Stream<Item = Result<RawPage>> + Send {}

impl<T> PageStream for T where T: Stream<Item = Result<RawPage>> + Send {}

/// Walk every page of a type query, following cursors until the end.
///
/// Starts at `options.cursor`. The stream ends after the first error, and
/// also stops if the service hands back the cursor it was just given.
pub fn paginate<'a, S>(
    service: &'a S,
    document_type: &'a DocumentType,
    options: QueryOptions,
) -> impl PageStream + 'a
where
    S: ContentService + ?Sized,
{
    async_stream::try_stream! {
        let mut options = options;
        loop {
            let page = service.query_by_type(document_type, &options).await?;
            let next = page.next_page.clone();
            debug!(
                document_type = %document_type,
                records = page.results.len(),
                more = next.has_more(),
                "Fetched page"
            );
            yield page;

            if next.is_end() {
                break;
            }
            if next == options.cursor {
                warn!(cursor = %next, "Service repeated its cursor, stopping");
                break;
            }
            options.cursor = next;
        }
    }
}
