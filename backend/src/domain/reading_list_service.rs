//! Reading list management.
//!
//! Every read returns enriched lists: book stubs are swapped for full books
//! in one batch lookup per call, and books deleted from the catalogue are
//! silently skipped. Every mutation is owner-or-admin.

use std::collections::HashSet;
use std::sync::Arc;

use pagination::{PageRequest, PageResult, SortSpec};
use tracing::{debug, warn};

use crate::domain::ports::{BookRepository, ReadingListRepository};
use crate::domain::{
    BookId, Caller, Enricher, Error, PageLimits, ReadingList, ReadingListDraft, ReadingListId,
    UserId, ownership,
};

/// Reading list service over the reading list and book repositories.
#[derive(Clone)]
pub struct ReadingListService {
    lists: Arc<dyn ReadingListRepository>,
    books: Arc<BookRepository>,
    enricher: Enricher,
    limits: PageLimits,
}

impl ReadingListService {
    /// Create a service.
    pub fn new(
        lists: Arc<dyn ReadingListRepository>,
        books: Arc<BookRepository>,
        enricher: Enricher,
        limits: PageLimits,
    ) -> Self {
        Self {
            lists,
            books,
            enricher,
            limits,
        }
    }

    async fn fetch(&self, id: ReadingListId) -> Result<ReadingList, Error> {
        self.lists
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("reading list {id} does not exist")))
    }

    async fn fetch_owned(&self, caller: &Caller, id: ReadingListId) -> Result<ReadingList, Error> {
        let list = self.fetch(id).await?;
        ownership::ensure(&list, caller)?;
        Ok(list)
    }

    async fn require_book(&self, book_id: BookId) -> Result<(), Error> {
        match self.books.find_by_id(book_id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("book {book_id} does not exist"))),
        }
    }

    async fn require_books(&self, book_ids: &[BookId]) -> Result<(), Error> {
        if book_ids.is_empty() {
            return Ok(());
        }
        let found: HashSet<BookId> = self
            .books
            .find_by_ids(book_ids)
            .await?
            .into_iter()
            .map(|book| book.id)
            .collect();
        match book_ids.iter().find(|id| !found.contains(*id)) {
            Some(missing) => Err(Error::not_found(format!("book {missing} does not exist"))),
            None => Ok(()),
        }
    }

    /// Create a list owned by the caller. Initial books must exist.
    pub async fn create(&self, caller: &Caller, draft: ReadingListDraft) -> Result<ReadingList, Error> {
        self.require_books(&draft.books).await?;
        let list = ReadingList::new(ReadingListId::random(), caller.id, draft)?;
        self.lists.create(&list).await?;
        debug!(list_id = %list.id, owner_id = %list.owner_id, "reading list created");
        self.enricher.reading_list(list).await
    }

    /// Fetch one enriched list.
    pub async fn get(&self, caller: &Caller, id: ReadingListId) -> Result<ReadingList, Error> {
        let list = self.fetch_owned(caller, id).await?;
        self.enricher.reading_list(list).await
    }

    /// Every enriched list of `owner_id`, resolved with a single book lookup.
    pub async fn list_for_owner(&self, caller: &Caller, owner_id: UserId) -> Result<Vec<ReadingList>, Error> {
        if !ownership::authorize(owner_id, caller).is_allowed() {
            return Err(Error::forbidden(format!(
                "caller {} may not read the reading lists of {owner_id}",
                caller.id
            )));
        }
        let lists = self.lists.find_by_owner(owner_id).await?;
        self.enricher.reading_lists(lists).await
    }

    /// Change the name and description. Book membership is left untouched,
    /// including books added concurrently; `draft.books` is ignored.
    pub async fn update(
        &self,
        caller: &Caller,
        id: ReadingListId,
        draft: ReadingListDraft,
    ) -> Result<ReadingList, Error> {
        let existing = self.fetch_owned(caller, id).await?;
        let changes = ReadingList::new(
            id,
            existing.owner_id,
            ReadingListDraft {
                books: Vec::new(),
                ..draft
            },
        )?;
        let stored = self.lists.update(&changes).await?;
        self.enricher.reading_list(stored).await
    }

    /// Remove a list; removing an absent list succeeds.
    pub async fn delete(&self, caller: &Caller, id: ReadingListId) -> Result<bool, Error> {
        let Some(existing) = self.lists.find_by_id(id).await? else {
            return Ok(false);
        };
        ownership::ensure(&existing, caller)?;
        Ok(self.lists.delete_by_id(id).await?)
    }

    /// Add an existing book; returns `false` when it was already listed.
    pub async fn add_book(&self, caller: &Caller, list_id: ReadingListId, book_id: BookId) -> Result<bool, Error> {
        self.fetch_owned(caller, list_id).await?;
        self.require_book(book_id).await?;
        Ok(self.lists.add_book(list_id, book_id).await?)
    }

    /// Remove a book; returns `false` when it was not listed.
    pub async fn remove_book(
        &self,
        caller: &Caller,
        list_id: ReadingListId,
        book_id: BookId,
    ) -> Result<bool, Error> {
        self.fetch_owned(caller, list_id).await?;
        Ok(self.lists.remove_book(list_id, book_id).await?)
    }

    /// Move a book from one list to another.
    ///
    /// The book is removed from `from` and then added to `to` as two separate
    /// steps. If the second step fails the book is on neither list.
    pub async fn move_book(
        &self,
        caller: &Caller,
        from: ReadingListId,
        to: ReadingListId,
        book_id: BookId,
    ) -> Result<(), Error> {
        self.fetch_owned(caller, from).await?;
        self.fetch_owned(caller, to).await?;
        if !self.lists.remove_book(from, book_id).await? {
            return Err(Error::invalid_request(format!(
                "book {book_id} is not on reading list {from}"
            )));
        }
        if let Err(error) = self.lists.add_book(to, book_id).await {
            warn!(%book_id, %from, %to, %error, "move left the book on neither list");
            return Err(error.into());
        }
        Ok(())
    }

    /// Name and description search across every list; administrators only.
    pub async fn search(
        &self,
        caller: &Caller,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        page: PageRequest,
    ) -> Result<PageResult<ReadingList>, Error> {
        caller.require_admin()?;
        let results = self
            .lists
            .search(query, sort, self.limits.clamp(page))
            .await?;
        let enriched = self
            .enricher
            .reading_lists(results.content().to_vec())
            .await?;
        Ok(results.with_content(enriched))
    }
}
