//! PostgreSQL-backed review repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PageResult, SearchQuery, SortSpec, search, sort_and_limit};
use tracing::{debug, warn};

use crate::domain::ports::{Repository, RepositoryError, ReviewRepository};
use crate::domain::{BookId, Rating, Review, ReviewDraft, ReviewId, UserId};

use super::diesel_helpers::{map_diesel_error, map_insert_error, map_pool_error, unique_uuids};
use super::models::{NewReviewRow, ReviewRow, ReviewUpdate};
use super::pool::DbPool;
use super::schema::reviews;

/// Diesel implementation of [`ReviewRepository`].
#[derive(Debug, Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_review(row: ReviewRow) -> Result<Review, RepositoryError> {
    let rating = u8::try_from(row.rating)
        .ok()
        .and_then(|value| Rating::new(value).ok())
        .ok_or_else(|| {
            warn!(review_id = %row.id, rating = row.rating, "stored rating out of range");
            RepositoryError::query(format!("review {} has rating {}", row.id, row.rating))
        })?;
    Ok(Review::new(
        ReviewId::from_uuid(row.id),
        UserId::from_uuid(row.owner_id),
        ReviewDraft {
            book: BookId::from_uuid(row.book_id),
            rating,
            comment: row.comment,
        },
    ))
}

fn rows_to_reviews(rows: Vec<ReviewRow>) -> Result<Vec<Review>, RepositoryError> {
    rows.into_iter().map(row_to_review).collect()
}

fn rating_column(rating: Rating) -> i16 {
    i16::from(rating.get())
}

/// Row selection for [`DieselReviewRepository::load_where`].
enum ReviewFilter {
    All,
    Ids(Vec<uuid::Uuid>),
    Book(uuid::Uuid),
    Owner(uuid::Uuid),
}

impl DieselReviewRepository {
    /// Reviews matching `filter`, in insertion order.
    async fn load_where(&self, filter: ReviewFilter) -> Result<Vec<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = reviews::table
            .select(ReviewRow::as_select())
            .order_by(reviews::seq.asc())
            .into_boxed();
        let query = match filter {
            ReviewFilter::All => query,
            ReviewFilter::Ids(ids) => query.filter(reviews::id.eq_any(ids)),
            ReviewFilter::Book(book_id) => query.filter(reviews::book_id.eq(book_id)),
            ReviewFilter::Owner(owner_id) => query.filter(reviews::owner_id.eq(owner_id)),
        };
        let rows: Vec<ReviewRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_reviews(rows)
    }
}

#[async_trait]
impl Repository<Review> for DieselReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewReviewRow {
            id: *review.id.as_uuid(),
            owner_id: *review.owner_id.as_uuid(),
            book_id: *review.book.id().as_uuid(),
            rating: rating_column(review.rating),
            comment: review.comment.as_deref(),
        };
        diesel::insert_into(reviews::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_insert_error::<Review>(review.id))?;
        debug!(review_id = %review.id, book_id = %review.book.id(), "review inserted");
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<Review, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ReviewUpdate {
            rating: rating_column(review.rating),
            comment: review.comment.as_deref(),
        };
        let row: Option<ReviewRow> = diesel::update(reviews::table.find(*review.id.as_uuid()))
            .set(&changes)
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match row {
            Some(row) => row_to_review(row),
            None => Err(RepositoryError::missing::<Review>(review.id)),
        }
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ReviewRow> = reviews::table
            .find(*id.as_uuid())
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_review).transpose()
    }

    async fn find_by_ids(&self, ids: &[ReviewId]) -> Result<Vec<Review>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids = unique_uuids(ids.iter().map(|id| *id.as_uuid()));
        self.load_where(ReviewFilter::Ids(uuids)).await
    }

    async fn delete_by_id(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(reviews::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Review>, RepositoryError> {
        let all = self.load_where(ReviewFilter::All).await?;
        Ok(sort_and_limit(all, sort, limit))
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<Review>, RepositoryError> {
        if SearchQuery::parse(query).is_none() {
            return Ok(PageResult::empty(request));
        }
        let rows = self.load_where(ReviewFilter::All).await?;
        Ok(search(rows, query, sort, request))
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError> {
        self.load_where(ReviewFilter::Book(*book_id.as_uuid()))
            .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Review>, RepositoryError> {
        self.load_where(ReviewFilter::Owner(*owner_id.as_uuid()))
            .await
    }
}
