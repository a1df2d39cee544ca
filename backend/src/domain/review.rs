//! User-owned book reviews.

use pagination::{Pageable, SearchField, SortField, SortKey};
use serde::{Deserialize, Serialize};

use super::{Aggregate, Book, BookId, Error, Owned, Reference, ReviewId, User, UserId};

/// Star rating between [`Rating::MIN`] and [`Rating::MAX`] inclusive.
///
/// # Examples
/// ```
/// use bookshelf::domain::Rating;
///
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validate a rating value.
    pub fn new(value: u8) -> Result<Self, Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_request(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// Raw rating value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Caller-supplied review fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    /// Reviewed book.
    pub book: BookId,
    /// Star rating.
    pub rating: Rating,
    /// Optional free text.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A user's rating and comment for one book.
///
/// ## Invariants
/// - `reviewer` always refers to `owner_id`.
/// - `book` and `reviewer` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Immutable identifier.
    pub id: ReviewId,
    /// Owning user.
    pub owner_id: UserId,
    /// Author of the review.
    pub reviewer: Reference<User>,
    /// Reviewed book.
    pub book: Reference<Book>,
    /// Star rating.
    pub rating: Rating,
    /// Optional free text.
    pub comment: Option<String>,
}

impl Review {
    /// Build a review written by `owner_id`.
    pub fn new(id: ReviewId, owner_id: UserId, draft: ReviewDraft) -> Self {
        Self {
            id,
            owner_id,
            reviewer: Reference::stub(owner_id),
            book: Reference::stub(draft.book),
            rating: draft.rating,
            comment: draft.comment,
        }
    }
}

impl Aggregate for Review {
    type Id = ReviewId;
    const KIND: &'static str = "review";

    fn id(&self) -> ReviewId {
        self.id
    }

    fn apply_update(&mut self, changes: &Self) {
        self.rating = changes.rating;
        self.comment.clone_from(&changes.comment);
    }
}

impl Owned for Review {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

fn comment_text(review: &Review) -> Option<&str> {
    review.comment.as_deref()
}

fn rating_key(review: &Review) -> SortKey {
    SortKey::integer(Some(i64::from(review.rating.get())))
}

fn comment_key(review: &Review) -> SortKey {
    SortKey::text(review.comment.as_deref())
}

impl Pageable for Review {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[SearchField::new("comment", comment_text)];
    const SORT_FIELDS: &'static [SortField<Self>] = &[
        SortField::new("rating", rating_key),
        SortField::new("comment", comment_key),
    ];
}
