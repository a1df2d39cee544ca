//! Catalogue books.
//!
//! Books are curated by administrators and are not owned by any user.
//! Reading lists and reviews refer to them through
//! [`Reference<Book>`](super::Reference) stubs.

use pagination::{Pageable, SearchField, SortField, SortKey};
use serde::{Deserialize, Serialize};

use super::{Aggregate, BookId, Error};

/// Caller-supplied book fields, used for creation, updates and seed files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    /// Title; must not be blank.
    pub title: String,
    /// Author name.
    #[serde(default)]
    pub author: Option<String>,
    /// ISBN as printed; not validated.
    #[serde(default)]
    pub isbn: Option<String>,
    /// Free-form genre label.
    #[serde(default)]
    pub genre: Option<String>,
    /// Blurb or summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Year of first publication.
    #[serde(default)]
    pub publication_year: Option<i32>,
}

impl BookDraft {
    /// Draft with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the author.
    #[must_use]
    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Catalogue entry.
///
/// ## Invariants
/// - `title` is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Immutable identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author name.
    pub author: Option<String>,
    /// ISBN as printed.
    pub isbn: Option<String>,
    /// Genre label.
    pub genre: Option<String>,
    /// Blurb or summary.
    pub description: Option<String>,
    /// Year of first publication.
    pub publication_year: Option<i32>,
}

impl Book {
    /// Validate `draft` and attach `id`.
    pub fn new(id: BookId, draft: BookDraft) -> Result<Self, Error> {
        if draft.title.trim().is_empty() {
            return Err(Error::invalid_request("book title must not be blank"));
        }
        let BookDraft {
            title,
            author,
            isbn,
            genre,
            description,
            publication_year,
        } = draft;
        Ok(Self {
            id,
            title,
            author,
            isbn,
            genre,
            description,
            publication_year,
        })
    }
}

impl Aggregate for Book {
    type Id = BookId;
    const KIND: &'static str = "book";

    fn id(&self) -> BookId {
        self.id
    }
}

fn title_text(book: &Book) -> Option<&str> {
    Some(book.title.as_str())
}

fn author_text(book: &Book) -> Option<&str> {
    book.author.as_deref()
}

fn title_key(book: &Book) -> SortKey {
    SortKey::text(Some(book.title.as_str()))
}

fn author_key(book: &Book) -> SortKey {
    SortKey::text(book.author.as_deref())
}

fn genre_key(book: &Book) -> SortKey {
    SortKey::text(book.genre.as_deref())
}

fn publication_year_key(book: &Book) -> SortKey {
    SortKey::integer(book.publication_year.map(i64::from))
}

impl Pageable for Book {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField::new("title", title_text),
        SearchField::new("author", author_text),
    ];
    const SORT_FIELDS: &'static [SortField<Self>] = &[
        SortField::new("title", title_key),
        SortField::new("author", author_key),
        SortField::new("genre", genre_key),
        SortField::new("publicationYear", publication_year_key),
    ];
}
