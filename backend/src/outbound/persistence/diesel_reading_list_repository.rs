//! PostgreSQL-backed reading list repository.
//!
//! A list is stored as a header row plus one `reading_list_books` row per
//! member. Membership changes are single-row inserts and deletes, so
//! concurrent `add_book` calls on the same list never overwrite each other.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use pagination::{PageRequest, PageResult, SearchQuery, SortSpec, search, sort_and_limit};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ReadingListRepository, Repository, RepositoryError};
use crate::domain::{Book, BookId, ReadingList, ReadingListId, Reference, UserId};

use super::diesel_helpers::{map_diesel_error, map_insert_error, map_pool_error, unique_uuids};
use super::models::{NewReadingListRow, ReadingListBookRow, ReadingListRow, ReadingListUpdate};
use super::pool::DbPool;
use super::schema::{reading_list_books, reading_lists};

/// Diesel implementation of [`ReadingListRepository`].
#[derive(Debug, Clone)]
pub struct DieselReadingListRepository {
    pool: DbPool,
}

impl DieselReadingListRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every list with its members, in insertion order.
    async fn load_all(&self) -> Result<Vec<ReadingList>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let headers: Vec<ReadingListRow> = reading_lists::table
            .select(ReadingListRow::as_select())
            .order_by(reading_lists::seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        with_books(&mut conn, headers).await
    }
}

/// Attach membership rows to their headers, keeping header order.
async fn with_books(
    conn: &mut AsyncPgConnection,
    headers: Vec<ReadingListRow>,
) -> Result<Vec<ReadingList>, RepositoryError> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let list_ids: Vec<Uuid> = headers.iter().map(|row| row.id).collect();
    let members: Vec<ReadingListBookRow> = reading_list_books::table
        .filter(reading_list_books::list_id.eq_any(list_ids))
        .select(ReadingListBookRow::as_select())
        .order_by((reading_list_books::list_id, reading_list_books::position.asc()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut books_by_list: HashMap<Uuid, Vec<Reference<Book>>> = HashMap::new();
    for member in members {
        books_by_list
            .entry(member.list_id)
            .or_default()
            .push(Reference::stub(BookId::from_uuid(member.book_id)));
    }

    Ok(headers
        .into_iter()
        .map(|row| ReadingList {
            id: ReadingListId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            name: row.name,
            description: row.description,
            books: books_by_list.remove(&row.id).unwrap_or_default(),
        })
        .collect())
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: ReadingListId,
) -> Result<Option<ReadingList>, RepositoryError> {
    let header: Option<ReadingListRow> = reading_lists::table
        .find(*id.as_uuid())
        .select(ReadingListRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
    let Some(header) = header else {
        return Ok(None);
    };
    Ok(with_books(conn, vec![header]).await?.pop())
}

async fn list_exists(conn: &mut AsyncPgConnection, id: ReadingListId) -> Result<bool, RepositoryError> {
    diesel::select(diesel::dsl::exists(reading_lists::table.find(*id.as_uuid())))
        .get_result(conn)
        .await
        .map_err(map_diesel_error)
}

#[async_trait]
impl Repository<ReadingList> for DieselReadingListRepository {
    async fn create(&self, list: &ReadingList) -> Result<(), RepositoryError> {
        let header = NewReadingListRow {
            id: *list.id.as_uuid(),
            owner_id: *list.owner_id.as_uuid(),
            name: &list.name,
            description: list.description.as_deref(),
        };
        let members: Vec<ReadingListBookRow> = list
            .book_ids()
            .into_iter()
            .map(|book_id| ReadingListBookRow {
                list_id: *list.id.as_uuid(),
                book_id: *book_id.as_uuid(),
            })
            .collect();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(reading_lists::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                // One statement per member so `position` follows list order.
                for member in &members {
                    diesel::insert_into(reading_list_books::table)
                        .values(member)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_insert_error::<ReadingList>(list.id))?;
        debug!(list_id = %list.id, books = list.books.len(), "reading list inserted");
        Ok(())
    }

    async fn update(&self, list: &ReadingList) -> Result<ReadingList, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ReadingListUpdate {
            name: &list.name,
            description: list.description.as_deref(),
        };
        let header: Option<ReadingListRow> =
            diesel::update(reading_lists::table.find(*list.id.as_uuid()))
                .set(&changes)
                .returning(ReadingListRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        let Some(header) = header else {
            return Err(RepositoryError::missing::<ReadingList>(list.id));
        };
        with_books(&mut conn, vec![header])
            .await?
            .pop()
            .ok_or_else(|| RepositoryError::missing::<ReadingList>(list.id))
    }

    async fn find_by_id(&self, id: ReadingListId) -> Result<Option<ReadingList>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_one(&mut conn, id).await
    }

    async fn find_by_ids(&self, ids: &[ReadingListId]) -> Result<Vec<ReadingList>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids = unique_uuids(ids.iter().map(|id| *id.as_uuid()));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let headers: Vec<ReadingListRow> = reading_lists::table
            .filter(reading_lists::id.eq_any(uuids))
            .select(ReadingListRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        with_books(&mut conn, headers).await
    }

    async fn delete_by_id(&self, id: ReadingListId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(reading_lists::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingList>, RepositoryError> {
        Ok(sort_and_limit(self.load_all().await?, sort, limit))
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<ReadingList>, RepositoryError> {
        if SearchQuery::parse(query).is_none() {
            return Ok(PageResult::empty(request));
        }
        Ok(search(self.load_all().await?, query, sort, request))
    }
}

#[async_trait]
impl ReadingListRepository for DieselReadingListRepository {
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<ReadingList>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let headers: Vec<ReadingListRow> = reading_lists::table
            .filter(reading_lists::owner_id.eq(*owner_id.as_uuid()))
            .select(ReadingListRow::as_select())
            .order_by(reading_lists::seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        with_books(&mut conn, headers).await
    }

    async fn add_book(&self, list_id: ReadingListId, book_id: BookId) -> Result<bool, RepositoryError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let member = ReadingListBookRow {
            list_id: *list_id.as_uuid(),
            book_id: *book_id.as_uuid(),
        };
        let inserted = diesel::insert_into(reading_list_books::table)
            .values(&member)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|error| match error {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    RepositoryError::missing::<ReadingList>(list_id)
                }
                other => map_diesel_error(other),
            })?;
        Ok(inserted > 0)
    }

    async fn remove_book(&self, list_id: ReadingListId, book_id: BookId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            reading_list_books::table
                .filter(reading_list_books::list_id.eq(*list_id.as_uuid()))
                .filter(reading_list_books::book_id.eq(*book_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if deleted > 0 {
            return Ok(true);
        }
        if list_exists(&mut conn, list_id).await? {
            Ok(false)
        } else {
            Err(RepositoryError::missing::<ReadingList>(list_id))
        }
    }
}
