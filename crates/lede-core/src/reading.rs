//! Reading-time estimate.

use crate::content::Post;

/// Assumed reading speed.
pub const WORDS_PER_MINUTE: usize = 150;

/// Count the words of a post.
///
/// Per section: the heading's space-separated pieces (none without a
/// heading) plus those of the body text, whose blocks are joined by a
/// space. Splitting is on single spaces, so an empty heading or body still
/// counts as one word.
pub fn count_words(post: &Post) -> usize {
    post.sections
        .iter()
        .map(|section| {
            let heading = section
                .heading
                .as_deref()
                .map_or(0, |h| h.split(' ').count());
            heading + section.text().split(' ').count()
        })
        .sum()
}

/// Estimated reading time in whole minutes, rounded down.
pub fn estimate_minutes(post: &Post) -> u32 {
    let minutes = count_words(post) / WORDS_PER_MINUTE;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
