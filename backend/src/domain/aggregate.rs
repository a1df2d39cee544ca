//! Traits shared by every stored aggregate.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use super::UserId;

/// Aggregate root persisted through a [`Repository`](super::ports::Repository).
pub trait Aggregate: Clone + Debug + Send + Sync + 'static {
    /// Typed identifier of the aggregate.
    type Id: Copy + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static;

    /// Human-readable aggregate name used in errors and logs.
    const KIND: &'static str;

    /// Identifier of this aggregate.
    fn id(&self) -> Self::Id;

    /// Copy mutable state from `changes` into `self`.
    ///
    /// Repositories only call this with `changes.id() == self.id()`.
    /// Aggregates whose repositories manage a field through dedicated
    /// operations override this to leave that field alone.
    fn apply_update(&mut self, changes: &Self) {
        self.clone_from(changes);
    }
}

/// Aggregate owned by a single user.
pub trait Owned {
    /// Identifier of the owning user.
    fn owner_id(&self) -> UserId;
}
