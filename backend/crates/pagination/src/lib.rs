//! Offset pagination, sorting, and substring search shared by storage backends.
//!
//! Every Bookshelf repository, whether it keeps aggregates in process memory
//! or in PostgreSQL, funnels its candidate rows through this crate so that
//! page metadata and ordering are identical regardless of the engine.
//!
//! Public surface:
//! - [`PageRequest`] and [`PageResult`]: the page envelope and its metadata.
//! - [`SortSpec`], [`SortOrder`], [`SortRegistry`]: whitelisted comparators.
//! - [`SearchQuery`], [`SearchIndex`]: case-insensitive substring filters.
//! - [`Pageable`] plus [`paginate`], [`search`], and [`sort_and_limit`].
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, Pageable, SearchField, SortField, SortKey, SortSpec, search};
//!
//! #[derive(Clone)]
//! struct Title(String);
//!
//! fn title_text(item: &Title) -> Option<&str> {
//!     Some(item.0.as_str())
//! }
//!
//! fn title_key(item: &Title) -> SortKey {
//!     SortKey::text(Some(item.0.as_str()))
//! }
//!
//! impl Pageable for Title {
//!     const SEARCH_FIELDS: &'static [SearchField<Self>] = &[SearchField::new("title", title_text)];
//!     const SORT_FIELDS: &'static [SortField<Self>] = &[SortField::new("title", title_key)];
//! }
//!
//! let items = vec![Title("Moby Dick".into()), Title("Dick Tracy".into())];
//! let request = PageRequest::new(0, 10).expect("valid request");
//! let page = search(items, Some("dick"), Some(&SortSpec::asc("title")), request);
//! assert_eq!(page.total_elements(), 2);
//! assert_eq!(page.content()[0].0, "Dick Tracy");
//! ```

mod error;
mod page;
mod paginator;
mod search;
mod sort;

pub use error::PaginationError;
pub use page::{PageRequest, PageResult};
pub use paginator::{Pageable, paginate, search, sort_and_limit, sort_items};
pub use search::{SearchField, SearchIndex, SearchQuery};
pub use sort::{SortField, SortKey, SortOrder, SortRegistry, SortSpec};
