//! Domain primitives, aggregates and services.
//!
//! Purpose: define the catalogue aggregates, their typed identifiers and
//! cross-aggregate references, and the services that combine storage,
//! reference resolution and ownership checks. Nothing here knows which
//! storage backend is in use.
//!
//! Public surface:
//! - Aggregates: [`Book`], [`User`], [`ReadingList`], [`Review`].
//! - [`Reference`]: stub or resolved pointer to another aggregate.
//! - [`Caller`] and [`ownership`]: owner-or-admin authorization.
//! - [`ReferenceResolver`] and [`Enricher`]: batched read-time resolution.
//! - Services: [`BookService`], [`UserService`], [`ReadingListService`],
//!   [`ReviewService`].
//! - [`Error`] / [`ErrorCode`]: transport agnostic failures.

mod aggregate;
mod book;
mod book_service;
mod caller;
pub mod error;
mod ids;
pub mod ownership;
mod paging;
pub mod ports;
mod reading_list;
mod reading_list_service;
mod reference;
mod resolver;
mod review;
mod review_service;
mod user;
mod user_service;

pub use self::aggregate::{Aggregate, Owned};
pub use self::book::{Book, BookDraft};
pub use self::book_service::BookService;
pub use self::caller::Caller;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{BookId, IdValidationError, ReadingListId, ReviewId, UserId};
pub use self::ownership::Access;
pub use self::paging::PageLimits;
pub use self::reading_list::{ReadingList, ReadingListDraft};
pub use self::reading_list_service::ReadingListService;
pub use self::reference::Reference;
pub use self::resolver::{Enricher, ReferenceResolver, attach_collection, attach_single};
pub use self::review::{Rating, Review, ReviewDraft};
pub use self::review_service::ReviewService;
pub use self::user::{User, UserProfile};
pub use self::user_service::UserService;
