//! Filter, sort, and slice candidate rows into a [`PageResult`].
//!
//! Storage backends hand over their candidate rows in insertion order. All
//! filtering, ordering, and slicing happens here so every backend reports the
//! same metadata and the same tie order for the same data.

use crate::{PageRequest, PageResult, SearchField, SearchIndex, SearchQuery, SortField, SortRegistry, SortSpec};

/// Items that can be searched and sorted through this crate.
///
/// Implementors declare their searchable text fields and their sort
/// whitelist as static tables.
pub trait Pageable: Sized + 'static {
    /// Designated text fields for substring search.
    const SEARCH_FIELDS: &'static [SearchField<Self>];
    /// Whitelisted sort fields.
    const SORT_FIELDS: &'static [SortField<Self>];

    /// Search index over [`Self::SEARCH_FIELDS`].
    #[must_use]
    fn search_index() -> SearchIndex<Self> {
        SearchIndex::new(Self::SEARCH_FIELDS)
    }

    /// Comparator registry over [`Self::SORT_FIELDS`].
    #[must_use]
    fn sort_registry() -> SortRegistry<Self> {
        SortRegistry::new(Self::SORT_FIELDS)
    }
}

/// Stable sort by `spec`; `None` or an unknown field keeps input order.
pub fn sort_items<T: Pageable>(items: &mut [T], spec: Option<&SortSpec>) {
    if let Some(spec) = spec {
        T::sort_registry().sort(items, spec);
    }
}

/// Filter, sort, then slice `items` into the requested page.
///
/// Totals describe the filtered set before slicing. A page beyond the end
/// yields empty content with valid metadata.
pub fn paginate<T, F>(
    items: Vec<T>,
    filter: F,
    spec: Option<&SortSpec>,
    request: PageRequest,
) -> PageResult<T>
where
    T: Pageable,
    F: Fn(&T) -> bool,
{
    let mut matching: Vec<T> = items.into_iter().filter(|item| filter(item)).collect();
    sort_items(&mut matching, spec);
    let total_elements = matching.len();
    let content: Vec<T> = matching
        .into_iter()
        .skip(request.offset())
        .take(request.page_size())
        .collect();
    PageResult::from_parts(content, total_elements, request)
}

/// Substring search over the designated fields of `T`.
///
/// A missing or blank query returns an empty page rather than every item;
/// listing without a filter goes through [`sort_and_limit`] instead.
pub fn search<T: Pageable>(
    items: Vec<T>,
    query: Option<&str>,
    spec: Option<&SortSpec>,
    request: PageRequest,
) -> PageResult<T> {
    let Some(query) = SearchQuery::parse(query) else {
        return PageResult::empty(request);
    };
    let index = T::search_index();
    paginate(items, |item| index.matches(item, &query), spec, request)
}

/// Sort and optionally truncate an unfiltered listing.
pub fn sort_and_limit<T: Pageable>(
    mut items: Vec<T>,
    spec: Option<&SortSpec>,
    limit: Option<usize>,
) -> Vec<T> {
    sort_items(&mut items, spec);
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
