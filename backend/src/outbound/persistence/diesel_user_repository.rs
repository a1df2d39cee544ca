//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{PageRequest, PageResult, SearchQuery, SortSpec, search, sort_and_limit};
use tracing::debug;

use crate::domain::ports::{Repository, RepositoryError};
use crate::domain::{User, UserId};

use super::diesel_helpers::{map_diesel_error, map_insert_error, map_pool_error, unique_uuids};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of `Repository<User>`.
#[derive(Debug, Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Every user in insertion order.
    async fn load_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::seq.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::from_uuid(row.id),
        username: row.username,
        email: row.email,
        display_name: row.display_name,
    }
}

#[async_trait]
impl Repository<User> for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            username: &user.username,
            email: user.email.as_deref(),
            display_name: user.display_name.as_deref(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_insert_error::<User>(user.id))?;
        debug!(user_id = %user.id, "user inserted");
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserUpdate {
            username: &user.username,
            email: user.email.as_deref(),
            display_name: user.display_name.as_deref(),
        };
        let row: Option<UserRow> = diesel::update(users::table.find(*user.id.as_uuid()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user)
            .ok_or_else(|| RepositoryError::missing::<User>(user.id))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_user))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids = unique_uuids(ids.iter().map(|id| *id.as_uuid()));
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list(
        &self,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<User>, RepositoryError> {
        Ok(sort_and_limit(self.load_all().await?, sort, limit))
    }

    async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        request: PageRequest,
    ) -> Result<PageResult<User>, RepositoryError> {
        if SearchQuery::parse(query).is_none() {
            return Ok(PageResult::empty(request));
        }
        Ok(search(self.load_all().await?, query, sort, request))
    }
}
