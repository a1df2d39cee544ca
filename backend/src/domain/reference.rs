//! Lightweight references between aggregates.
//!
//! Stored aggregates only ever hold [`Reference::Stub`] values. The read path
//! swaps stubs for [`Reference::Resolved`] copies through the
//! [`ReferenceResolver`](super::ReferenceResolver); nothing resolved is
//! written back.

use serde::{Deserialize, Serialize};

use super::Aggregate;

/// Either the id of another aggregate or a resolved copy of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
#[serde(bound(
    serialize = "T: Serialize, T::Id: Serialize",
    deserialize = "T: Deserialize<'de>, T::Id: Deserialize<'de>"
))]
pub enum Reference<T: Aggregate> {
    /// Only the identifier is known.
    Stub {
        /// Identifier of the referenced aggregate.
        id: T::Id,
    },
    /// Full copy of the referenced aggregate, attached at read time.
    Resolved(T),
}

impl<T: Aggregate> Reference<T> {
    /// Stub pointing at `id`.
    pub const fn stub(id: T::Id) -> Self {
        Self::Stub { id }
    }

    /// Identifier of the referenced aggregate, whichever variant holds it.
    pub fn id(&self) -> T::Id {
        match self {
            Self::Stub { id } => *id,
            Self::Resolved(value) => value.id(),
        }
    }

    /// Resolved aggregate, if one has been attached.
    pub const fn resolved(&self) -> Option<&T> {
        match self {
            Self::Stub { .. } => None,
            Self::Resolved(value) => Some(value),
        }
    }

    /// Whether a full copy has been attached.
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Drop any attached copy, keeping only the identifier.
    #[must_use]
    pub fn into_stub(self) -> Self {
        Self::stub(self.id())
    }
}

impl<T: Aggregate> From<&T> for Reference<T> {
    fn from(value: &T) -> Self {
        Self::stub(value.id())
    }
}
