//! PostgreSQL-backed book repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PageResult, SearchQuery, SortSpec, search, sort_and_limit};
use tracing::debug;

use crate::domain::ports::{Repository, RepositoryError};
use crate::domain::{Book, BookId};

use super::diesel_helpers::{map_diesel_error, map_insert_error, map_pool_error, unique_uuids};
use super::models::{BookRow, BookUpdate, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

/// Diesel implementation of `Repository<Book>`.
#[derive(Debug, Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every book in insertion order. Search matches in Rust so case
    /// folding never depends on the database locale.
    async fn load_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookRow> = books::table
            .select(BookRow::as_select())
            .order_by(books::seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_book).collect())
    }
}

fn row_to_book(row: BookRow) -> Book {
    Book {
        id: BookId::from_uuid(row.id),
        title: row.title,
        author: row.author,
        isbn: row.isbn,
        genre: row.genre,
        description: row.description,
        publication_year: row.publication_year,
    }
}

fn new_row(book: &Book) -> NewBookRow<'_> {
    NewBookRow {
        id: *book.id.as_uuid(),
        title: &book.title,
        author: book.author.as_deref(),
        isbn: book.isbn.as_deref(),
        genre: book.genre.as_deref(),
        description: book.description.as_deref(),
        publication_year: book.publication_year,
    }
}

fn changeset(book: &Book) -> BookUpdate<'_> {
    BookUpdate {
        title: &book.title,
        author: book.author.as_deref(),
        isbn: book.isbn.as_deref(),
        genre: book.genre.as_deref(),
        description: book.description.as_deref(),
        publication_year: book.publication_year,
    }
}

#[async_trait]
impl Repository<Book> for DieselBookRepository {
    async fn create(&self, book: &Book) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(books::table)
            .values(&new_row(book))
            .execute(&mut conn)
            .await
            .map_err(map_insert_error::<Book>(book.id))?;
        debug!(book_id = %book.id, "book inserted");
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BookRow> = diesel::update(books::table.find(*book.id.as_uuid()))
            .set(&changeset(book))
            .returning(BookRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_book)
            .ok_or_else(|| RepositoryError::missing::<Book>(book.id))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BookRow> = books::table
            .find(*id.as_uuid())
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_book))
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> Result<Vec<Book>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids = unique_uuids(ids.iter().map(|id| *id.as_uuid()));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookRow> = books::table
            .filter(books::id.eq_any(uuids))
            .select(BookRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_book).collect())
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(books::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<Book>, RepositoryError> {
        Ok(sort_and_limit(self.load_all().await?, sort, limit))
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<Book>, RepositoryError> {
        if SearchQuery::parse(query).is_none() {
            return Ok(PageResult::empty(request));
        }
        Ok(search(self.load_all().await?, query, sort, request))
    }
}
