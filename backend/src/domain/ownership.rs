//! Owner-or-admin authorization shared by every owning aggregate.
//!
//! The check is pure: it only compares the resource's owner with the caller.
//! Services fetch the resource first so a missing resource surfaces as
//! `not_found` before ownership is ever considered.

use super::{Aggregate, Caller, Error, Owned, UserId};

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Caller owns the resource or is an administrator.
    Allowed,
    /// Caller is neither owner nor administrator.
    Denied,
}

impl Access {
    /// Whether access was granted.
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decide whether `caller` may act on a resource owned by `owner_id`.
///
/// # Examples
/// ```
/// use bookshelf::domain::{Access, Caller, UserId, ownership};
///
/// let owner = UserId::random();
/// assert_eq!(ownership::authorize(owner, &Caller::user(owner)), Access::Allowed);
/// assert_eq!(
///     ownership::authorize(owner, &Caller::user(UserId::random())),
///     Access::Denied
/// );
/// ```
pub fn authorize(owner_id: UserId, caller: &Caller) -> Access {
    if owner_id == caller.id || caller.is_admin {
        Access::Allowed
    } else {
        Access::Denied
    }
}

/// Require owner-or-admin access to `resource`.
///
/// Denied access maps to a `forbidden` error naming the resource kind.
pub fn ensure<R: Aggregate + Owned>(resource: &R, caller: &Caller) -> Result<(), Error> {
    match authorize(resource.owner_id(), caller) {
        Access::Allowed => Ok(()),
        Access::Denied => Err(Error::forbidden(format!(
            "caller {} may not access {} {}",
            caller.id,
            R::KIND,
            resource.id()
        ))),
    }
}
