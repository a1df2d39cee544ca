//! User-owned reading lists.
//!
//! A reading list holds an ordered set of book references. Storage keeps
//! stubs only; the read path resolves them in one batch per request.

use pagination::{Pageable, SearchField, SortField, SortKey};
use serde::{Deserialize, Serialize};

use super::{Aggregate, Book, BookId, Error, Owned, ReadingListId, Reference, UserId};

/// Caller-supplied reading list fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListDraft {
    /// List name; must not be blank.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial books, in order. Duplicates are collapsed.
    #[serde(default)]
    pub books: Vec<BookId>,
}

impl ReadingListDraft {
    /// Draft with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Ordered, duplicate-free collection of books owned by one user.
///
/// ## Invariants
/// - `name` is non-blank.
/// - A book appears in `books` at most once; insertion order is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingList {
    /// Immutable identifier.
    pub id: ReadingListId,
    /// Owning user.
    pub owner_id: UserId,
    /// List name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Book references in insertion order.
    pub books: Vec<Reference<Book>>,
}

impl ReadingList {
    /// Validate `draft` and build a list owned by `owner_id`.
    pub fn new(id: ReadingListId, owner_id: UserId, draft: ReadingListDraft) -> Result<Self, Error> {
        if draft.name.trim().is_empty() {
            return Err(Error::invalid_request("reading list name must not be blank"));
        }
        let mut list = Self {
            id,
            owner_id,
            name: draft.name,
            description: draft.description,
            books: Vec::with_capacity(draft.books.len()),
        };
        for book_id in draft.books {
            list.add_book(book_id);
        }
        Ok(list)
    }

    /// Whether `book_id` is already on the list.
    pub fn contains(&self, book_id: BookId) -> bool {
        self.books.iter().any(|book| book.id() == book_id)
    }

    /// Append `book_id` unless already present; returns whether it was added.
    pub fn add_book(&mut self, book_id: BookId) -> bool {
        if self.contains(book_id) {
            return false;
        }
        self.books.push(Reference::stub(book_id));
        true
    }

    /// Remove `book_id`; returns whether it was present.
    pub fn remove_book(&mut self, book_id: BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|book| book.id() != book_id);
        self.books.len() != before
    }

    /// Identifiers of every referenced book, in list order.
    pub fn book_ids(&self) -> Vec<BookId> {
        self.books.iter().map(Reference::id).collect()
    }
}

impl Aggregate for ReadingList {
    type Id = ReadingListId;
    const KIND: &'static str = "reading list";

    fn id(&self) -> ReadingListId {
        self.id
    }

    /// Book membership is only changed through `add_book` / `remove_book`.
    fn apply_update(&mut self, changes: &Self) {
        self.name.clone_from(&changes.name);
        self.description.clone_from(&changes.description);
    }
}

impl Owned for ReadingList {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

fn name_text(list: &ReadingList) -> Option<&str> {
    Some(list.name.as_str())
}

fn description_text(list: &ReadingList) -> Option<&str> {
    list.description.as_deref()
}

fn name_key(list: &ReadingList) -> SortKey {
    SortKey::text(Some(list.name.as_str()))
}

fn book_count_key(list: &ReadingList) -> SortKey {
    SortKey::integer(i64::try_from(list.books.len()).ok())
}

impl Pageable for ReadingList {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField::new("name", name_text),
        SearchField::new("description", description_text),
    ];
    const SORT_FIELDS: &'static [SortField<Self>] = &[
        SortField::new("name", name_key),
        SortField::new("bookCount", book_count_key),
    ];
}
