//! User registration and profile management.

use std::sync::Arc;

use pagination::{PageRequest, PageResult, SortSpec};
use tracing::debug;

use crate::domain::ports::UserRepository;
use crate::domain::{Caller, Error, PageLimits, User, UserId, UserProfile, ownership};

/// User service over a [`UserRepository`].
#[derive(Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    limits: PageLimits,
}

impl UserService {
    /// Create a service over `users`.
    pub fn new(users: Arc<UserRepository>, limits: PageLimits) -> Self {
        Self { users, limits }
    }

    /// Register a new user with a fresh id.
    pub async fn register(&self, profile: UserProfile) -> Result<User, Error> {
        let user = User::new(UserId::random(), profile)?;
        self.users.create(&user).await?;
        debug!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Fetch one user.
    pub async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} does not exist")))
    }

    /// Replace a profile; allowed for the user themself or an administrator.
    pub async fn update(&self, caller: &Caller, id: UserId, profile: UserProfile) -> Result<User, Error> {
        let existing = self.get(id).await?;
        ownership::ensure(&existing, caller)?;
        let user = User::new(id, profile)?;
        Ok(self.users.update(&user).await?)
    }

    /// Remove a user; removing an absent user succeeds.
    pub async fn delete(&self, caller: &Caller, id: UserId) -> Result<bool, Error> {
        let Some(existing) = self.users.find_by_id(id).await? else {
            return Ok(false);
        };
        ownership::ensure(&existing, caller)?;
        Ok(self.users.delete_by_id(id).await?)
    }

    /// Username, display name and email search.
    pub async fn search(
        &self,
        query: Option<&str>,
        sort: Option<&SortSpec>,
        page: PageRequest,
    ) -> Result<PageResult<User>, Error> {
        Ok(self
            .users
            .search(query, sort, self.limits.clamp(page))
            .await?)
    }

    /// Every user; administrators only.
    pub async fn list(
        &self,
        caller: &Caller,
        sort: Option<&SortSpec>,
        limit: Option<usize>,
    ) -> Result<Vec<User>, Error> {
        caller.require_admin()?;
        Ok(self.users.list(sort, limit).await?)
    }
}
