//! Identity of whoever invokes a service operation.

use serde::{Deserialize, Serialize};

use super::{Error, UserId};

/// Authenticated caller as supplied by the identity provider.
///
/// # Examples
/// ```
/// use bookshelf::domain::{Caller, UserId};
///
/// let caller = Caller::user(UserId::random());
/// assert!(caller.require_admin().is_err());
/// assert!(Caller::admin(UserId::random()).require_admin().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caller {
    /// Identifier of the calling user.
    pub id: UserId,
    /// Whether the caller holds the administrator role.
    pub is_admin: bool,
}

impl Caller {
    /// Regular, non-privileged caller.
    pub const fn user(id: UserId) -> Self {
        Self {
            id,
            is_admin: false,
        }
    }

    /// Administrator caller.
    pub const fn admin(id: UserId) -> Self {
        Self { id, is_admin: true }
    }

    /// Reject callers without the administrator role.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.is_admin {
            Ok(())
        } else {
            Err(Error::forbidden("administrator role required"))
        }
    }
}
