//! Read-time resolution of [`Reference`] stubs.
//!
//! Enrichment gathers every referenced id across a whole batch of owner
//! aggregates, fetches each foreign aggregate type with a single
//! `find_by_ids` call, then re-attaches the results. Dangling references are
//! dropped from collections and left as stubs when single-valued; they are
//! never an error. Nothing resolved is written back to storage.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use pagination::Pageable;
use tracing::debug;

use super::ports::Repository;
use super::{Aggregate, Book, Error, ReadingList, Reference, Review, User};

/// Batch resolver for one aggregate type.
pub struct ReferenceResolver<T>
where
    T: Aggregate + Pageable,
{
    repository: Arc<dyn Repository<T>>,
}

impl<T> Clone for ReferenceResolver<T>
where
    T: Aggregate + Pageable,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T> ReferenceResolver<T>
where
    T: Aggregate + Pageable,
{
    /// Resolve through `repository`.
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self { repository }
    }

    /// Fetch every aggregate named in `ids` with one batch lookup.
    ///
    /// Duplicate ids are collapsed before the lookup and an empty input
    /// performs no lookup at all. Ids with no stored aggregate are simply
    /// absent from the returned map.
    pub async fn resolve(&self, ids: &[T::Id]) -> Result<HashMap<T::Id, T>, Error> {
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<T::Id> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        let found = self.repository.find_by_ids(&unique).await?;
        debug!(
            kind = T::KIND,
            requested = unique.len(),
            resolved = found.len(),
            "resolved references"
        );
        Ok(found
            .into_iter()
            .map(|aggregate| (aggregate.id(), aggregate))
            .collect())
    }
}

/// Replace each stub in a collection with its resolved copy, dropping
/// references whose target no longer exists. Order is preserved.
pub fn attach_collection<T: Aggregate>(
    references: Vec<Reference<T>>,
    resolved: &HashMap<T::Id, T>,
) -> Vec<Reference<T>> {
    references
        .into_iter()
        .filter_map(|reference| resolved.get(&reference.id()).cloned().map(Reference::Resolved))
        .collect()
}

/// Resolve a single-valued reference, keeping the stub when its target is
/// gone.
pub fn attach_single<T: Aggregate>(
    reference: Reference<T>,
    resolved: &HashMap<T::Id, T>,
) -> Reference<T> {
    match resolved.get(&reference.id()) {
        Some(value) => Reference::Resolved(value.clone()),
        None => reference.into_stub(),
    }
}

/// Enriches reading lists and reviews with their referenced books and users.
#[derive(Clone)]
pub struct Enricher {
    books: ReferenceResolver<Book>,
    users: ReferenceResolver<User>,
}

impl Enricher {
    /// Build an enricher over the book and user repositories.
    pub fn new(books: Arc<dyn Repository<Book>>, users: Arc<dyn Repository<User>>) -> Self {
        Self {
            books: ReferenceResolver::new(books),
            users: ReferenceResolver::new(users),
        }
    }

    /// Resolve the books of every list with one book lookup in total.
    pub async fn reading_lists(&self, lists: Vec<ReadingList>) -> Result<Vec<ReadingList>, Error> {
        let ids: Vec<_> = lists
            .iter()
            .flat_map(|list| list.books.iter().map(Reference::id))
            .collect();
        let books = self.books.resolve(&ids).await?;
        Ok(lists
            .into_iter()
            .map(|mut list| {
                list.books = attach_collection(std::mem::take(&mut list.books), &books);
                list
            })
            .collect())
    }

    /// Resolve one reading list.
    pub async fn reading_list(&self, list: ReadingList) -> Result<ReadingList, Error> {
        let mut enriched = self.reading_lists(vec![list]).await?;
        enriched
            .pop()
            .ok_or_else(|| Error::internal("enrichment lost the reading list"))
    }

    /// Resolve the book and reviewer of every review with one lookup per
    /// foreign type.
    pub async fn reviews(&self, reviews: Vec<Review>) -> Result<Vec<Review>, Error> {
        let book_ids: Vec<_> = reviews.iter().map(|review| review.book.id()).collect();
        let user_ids: Vec<_> = reviews.iter().map(|review| review.reviewer.id()).collect();
        let books = self.books.resolve(&book_ids).await?;
        let users = self.users.resolve(&user_ids).await?;
        Ok(reviews
            .into_iter()
            .map(|review| Review {
                book: attach_single(review.book, &books),
                reviewer: attach_single(review.reviewer, &users),
                ..review
            })
            .collect())
    }

    /// Resolve one review.
    pub async fn review(&self, review: Review) -> Result<Review, Error> {
        let mut enriched = self.reviews(vec![review]).await?;
        enriched
            .pop()
            .ok_or_else(|| Error::internal("enrichment lost the review"))
    }
}
