//! Catalogue curation and lookup.
//!
//! Reads are open to every caller; mutations require the administrator
//! role.

use std::sync::Arc;

use pagination::{PageRequest, PageResult, Pageable, SortSpec};
use tracing::debug;

use crate::domain::ports::BookRepository;
use crate::domain::{Book, BookDraft, BookId, Caller, Error, PageLimits};

/// Book service over a [`BookRepository`].
#[derive(Clone)]
pub struct BookService {
    books: Arc<BookRepository>,
    limits: PageLimits,
}

impl BookService {
    /// Create a service over `books`.
    pub fn new(books: Arc<BookRepository>, limits: PageLimits) -> Self {
        Self { books, limits }
    }

    /// Add a book to the catalogue.
    pub async fn create(&self, caller: &Caller, draft: BookDraft) -> Result<Book, Error> {
        caller.require_admin()?;
        let book = Book::new(BookId::random(), draft)?;
        self.books.create(&book).await?;
        debug!(book_id = %book.id, "book created");
        Ok(book)
    }

    /// Replace every field of an existing book.
    pub async fn update(&self, caller: &Caller, id: BookId, draft: BookDraft) -> Result<Book, Error> {
        self.get(id).await?;
        caller.require_admin()?;
        let book = Book::new(id, draft)?;
        Ok(self.books.update(&book).await?)
    }

    /// Remove a book. Removing an absent book succeeds.
    ///
    /// Reading lists and reviews keep their references; those become
    /// dangling and are skipped or left unresolved on read.
    pub async fn delete(&self, caller: &Caller, id: BookId) -> Result<bool, Error> {
        caller.require_admin()?;
        let removed = self.books.delete_by_id(id).await?;
        debug!(book_id = %id, removed, "book delete");
        Ok(removed)
    }

    /// Fetch one book.
    pub async fn get(&self, id: BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("book {id} does not exist")))
    }

    /// Fetch every existing book among `ids`.
    pub async fn find_many(&self, ids: &[BookId]) -> Result<Vec<Book>, Error> {
        Ok(self.books.find_by_ids(ids).await?)
    }

    /// Catalogue listing; unknown sort fields leave insertion order.
    pub async fn list(&self, sort: Option<&SortSpec>, limit: Option<usize>) -> Result<Vec<Book>, Error> {
        Ok(self.books.list(sort, limit).await?)
    }

    /// Title and author search.
    pub async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        page: PageRequest,
    ) -> Result<PageResult<Book>, Error> {
        Ok(self
            .books
            .search(query, sort, self.limits.clamp(page))
            .await?)
    }

    /// Reject sort fields outside the book whitelist.
    pub fn validate_sort_field(&self, field: &str) -> Result<(), Error> {
        Book::sort_registry().validate(field)?;
        Ok(())
    }
}
