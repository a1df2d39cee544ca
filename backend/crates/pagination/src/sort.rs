//! Sort specifications and per-aggregate comparator registries.
//!
//! A registry is a static whitelist of field names, each bound to a key
//! extractor. Comparisons are case-insensitive for text and place missing
//! values after present ones in both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Direction applied to the ascending comparator of a sort field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortOrder {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PaginationError::InvalidSortOrder {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// Requested sort field and direction.
///
/// The field name is not validated here; registries decide whether it is
/// known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    /// Field name as exposed to callers, e.g. `title`.
    pub field: String,
    /// Direction to apply.
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    /// Build a specification from its parts.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Ascending specification for `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    /// Descending specification for `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

/// Comparable value extracted from an item for one sort field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Text compared case-insensitively; `None` sorts last.
    Text(Option<String>),
    /// Integer compared numerically; `None` sorts last.
    Integer(Option<i64>),
}

impl SortKey {
    /// Text key, folded to lower case so comparisons ignore case.
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        Self::Text(value.map(str::to_lowercase))
    }

    /// Integer key.
    #[must_use]
    pub fn integer(value: Option<i64>) -> Self {
        Self::Integer(value)
    }

    fn is_missing(&self) -> bool {
        matches!(self, Self::Text(None) | Self::Integer(None))
    }

    fn compare_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(Some(left)), Self::Text(Some(right))) => left.cmp(right),
            (Self::Integer(Some(left)), Self::Integer(Some(right))) => left.cmp(right),
            (Self::Text(_), Self::Integer(_)) => Ordering::Less,
            (Self::Integer(_), Self::Text(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Compare two keys for the given direction with missing values last.
    #[must_use]
    pub fn compare(&self, other: &Self, order: SortOrder) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ascending = self.compare_present(other);
                match order {
                    SortOrder::Asc => ascending,
                    SortOrder::Desc => ascending.reverse(),
                }
            }
        }
    }
}

/// Whitelisted sort field bound to its key extractor.
pub struct SortField<T> {
    name: &'static str,
    key: fn(&T) -> SortKey,
}

impl<T> SortField<T> {
    /// Bind `name` to the extractor producing its sort key.
    pub const fn new(name: &'static str, key: fn(&T) -> SortKey) -> Self {
        Self { name, key }
    }

    /// Field name accepted in [`SortSpec::field`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Extract the sort key for `item`.
    pub fn key(&self, item: &T) -> SortKey {
        (self.key)(item)
    }
}

impl<T> fmt::Debug for SortField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortField").field("name", &self.name).finish()
    }
}

/// Per-aggregate whitelist of sortable fields.
pub struct SortRegistry<T: 'static> {
    fields: &'static [SortField<T>],
}

impl<T: 'static> SortRegistry<T> {
    /// Wrap a static field list.
    #[must_use]
    pub const fn new(fields: &'static [SortField<T>]) -> Self {
        Self { fields }
    }

    /// Look up a field by its exact name; unknown names yield `None`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static SortField<T>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Strict lookup for callers that must reject unknown fields.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::UnknownSortField`] listing the allowed
    /// names when `name` is not whitelisted.
    pub fn validate(&self, name: &str) -> Result<&'static SortField<T>, PaginationError> {
        self.resolve(name)
            .ok_or_else(|| PaginationError::UnknownSortField {
                field: name.to_owned(),
                allowed: self.field_names().join(", "),
            })
    }

    /// Names of every whitelisted field, in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(SortField::name).collect()
    }

    /// Stable in-place sort by `spec`; unknown fields leave `items` untouched.
    pub fn sort(&self, items: &mut [T], spec: &SortSpec) {
        let Some(field) = self.resolve(&spec.field) else {
            return;
        };
        let order = spec.order;
        items.sort_by_cached_key(|item| DirectedKey {
            key: field.key(item),
            order,
        });
    }
}

/// Sort key paired with its direction so it can drive `sort_by_cached_key`.
struct DirectedKey {
    key: SortKey,
    order: SortOrder,
}

impl PartialEq for DirectedKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DirectedKey {}

impl PartialOrd for DirectedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DirectedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.compare(&other.key, self.order)
    }
}

impl<T: 'static> fmt::Debug for SortRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(SortField::name))
            .finish()
    }
}
