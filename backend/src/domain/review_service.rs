//! Book reviews.
//!
//! Reviews are public to read. Only the author or an administrator may
//! change or remove one.

use std::sync::Arc;

use pagination::{PageRequest, PageResult, SortSpec, paginate};

use crate::domain::ports::{BookRepository, ReviewRepository};
use crate::domain::{
    BookId, Caller, Enricher, Error, PageLimits, Rating, Review, ReviewDraft, ReviewId, UserId,
    ownership,
};

/// Review service over the review and book repositories.
#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    books: Arc<BookRepository>,
    enricher: Enricher,
    limits: PageLimits,
}

impl ReviewService {
    /// Create a service.
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        books: Arc<BookRepository>,
        enricher: Enricher,
        limits: PageLimits,
    ) -> Self {
        Self {
            reviews,
            books,
            enricher,
            limits,
        }
    }

    async fn fetch(&self, id: ReviewId) -> Result<Review, Error> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("review {id} does not exist")))
    }

    /// Review an existing book as the caller.
    pub async fn create(&self, caller: &Caller, draft: ReviewDraft) -> Result<Review, Error> {
        if self.books.find_by_id(draft.book).await?.is_none() {
            return Err(Error::not_found(format!("book {} does not exist", draft.book)));
        }
        let review = Review::new(ReviewId::random(), caller.id, draft);
        self.reviews.create(&review).await?;
        self.enricher.review(review).await
    }

    /// Fetch one enriched review.
    pub async fn get(&self, id: ReviewId) -> Result<Review, Error> {
        let review = self.fetch(id).await?;
        self.enricher.review(review).await
    }

    /// Page through the reviews of one book.
    pub async fn list_for_book(
        &self,
        book_id: BookId,
        sort: Option<&SortSpec>,
        page: PageRequest,
    ) -> Result<PageResult<Review>, Error> {
        let reviews = self.reviews.find_by_book(book_id).await?;
        let results = paginate(reviews, |_| true, sort, self.limits.clamp(page));
        let enriched = self.enricher.reviews(results.content().to_vec()).await?;
        Ok(results.with_content(enriched))
    }

    /// Every review written by `owner_id`; owner-or-admin.
    pub async fn list_for_owner(&self, caller: &Caller, owner_id: UserId) -> Result<Vec<Review>, Error> {
        if !ownership::authorize(owner_id, caller).is_allowed() {
            return Err(Error::forbidden(format!(
                "caller {} may not read the reviews of {owner_id}",
                caller.id
            )));
        }
        let reviews = self.reviews.find_by_owner(owner_id).await?;
        self.enricher.reviews(reviews).await
    }

    /// Change the rating and comment.
    pub async fn update(
        &self,
        caller: &Caller,
        id: ReviewId,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<Review, Error> {
        let existing = self.fetch(id).await?;
        ownership::ensure(&existing, caller)?;
        let changes = Review {
            rating,
            comment,
            ..existing
        };
        let stored = self.reviews.update(&changes).await?;
        self.enricher.review(stored).await
    }

    /// Remove a review; removing an absent review succeeds.
    pub async fn delete(&self, caller: &Caller, id: ReviewId) -> Result<bool, Error> {
        let Some(existing) = self.reviews.find_by_id(id).await? else {
            return Ok(false);
        };
        ownership::ensure(&existing, caller)?;
        Ok(self.reviews.delete_by_id(id).await?)
    }

    /// Comment search across every review.
    pub async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        page: PageRequest,
    ) -> Result<PageResult<Review>, Error> {
        let results = self
            .reviews
            .search(query, sort, self.limits.clamp(page))
            .await?;
        let enriched = self.enricher.reviews(results.content().to_vec()).await?;
        Ok(results.with_content(enriched))
    }
}
