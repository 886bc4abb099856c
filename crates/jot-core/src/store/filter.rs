//! Client-side note filtering.

use std::borrow::Cow;

use crate::models::Note;

/// Notes whose title or content contains `search`, ignoring case.
///
/// The query is trimmed before matching. A blank query borrows `notes`
/// unchanged instead of copying it.
#[must_use]
pub fn filter_notes<'a>(notes: &'a [Note], search: &str) -> Cow<'a, [Note]> {
    let query = normalize_query(search);
    if query.is_empty() {
        return Cow::Borrowed(notes);
    }

    Cow::Owned(
        notes
            .iter()
            .filter(|note| note.matches_normalized_query(&query))
            .cloned()
            .collect(),
    )
}

fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}
