//! Client-side ordering and search over an already fetched listing.

use crate::domain::model::{ShowcaseTenant, SortOption};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Case-insensitive first; on a tie lowercase sorts before uppercase.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}

/// Returns a sorted copy. The input is never touched.
pub fn sort_tenants(list: &[ShowcaseTenant], mode: SortOption) -> Vec<ShowcaseTenant> {
    let mut sorted = list.to_vec();

    match mode {
        SortOption::NameAsc => sorted.sort_by(|a, b| locale_compare(a.name(), b.name())),
        SortOption::NameDesc => sorted.sort_by(|a, b| locale_compare(b.name(), a.name())),
        SortOption::Popular => sorted.sort_by(|a, b| b.product_count().cmp(&a.product_count())),
    }

    sorted
}

/// Keeps tenants whose name or description contains `query`, ignoring case.
///
/// The query is trimmed before matching, so surrounding whitespace never
/// has to appear in the tenant text. A blank or whitespace-only query hands
/// back `list` itself.
pub fn filter_tenants_by_search<'a>(
    list: &'a [ShowcaseTenant],
    query: &str,
) -> Cow<'a, [ShowcaseTenant]> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(list);
    }

    let matches = list
        .iter()
        .filter(|t| {
            t.name().to_lowercase().contains(&needle)
                || t.description().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect::<Vec<_>>();

    Cow::Owned(matches)
}
