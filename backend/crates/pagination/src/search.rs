//! Case-insensitive substring search over designated text fields.

use std::fmt;

/// Normalised, non-blank search needle.
///
/// # Examples
/// ```
/// use pagination::SearchQuery;
///
/// assert!(SearchQuery::parse(None).is_none());
/// assert!(SearchQuery::parse(Some("   ")).is_none());
/// let query = SearchQuery::parse(Some("  GatSby ")).expect("non-blank");
/// assert_eq!(query.needle(), "gatsby");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Parse raw caller input; `None` or all-whitespace input yields `None`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Lower-cased needle used for containment checks.
    #[must_use]
    pub fn needle(&self) -> &str {
        self.needle.as_str()
    }

    /// Whether `value` contains the needle, ignoring case.
    #[must_use]
    pub fn matches_text(&self, value: &str) -> bool {
        value.to_lowercase().contains(self.needle.as_str())
    }
}

/// Designated searchable text field bound to its accessor.
pub struct SearchField<T> {
    name: &'static str,
    value: fn(&T) -> Option<&str>,
}

impl<T> SearchField<T> {
    /// Bind `name` to the accessor returning the field's text, if any.
    pub const fn new(name: &'static str, value: fn(&T) -> Option<&str>) -> Self {
        Self { name, value }
    }

    /// Field name, used for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Text held by `item` for this field.
    pub fn value<'a>(&self, item: &'a T) -> Option<&'a str> {
        (self.value)(item)
    }
}

impl<T> fmt::Debug for SearchField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchField").field("name", &self.name).finish()
    }
}

/// OR-combination of searchable fields for one aggregate.
pub struct SearchIndex<T: 'static> {
    fields: &'static [SearchField<T>],
}

impl<T: 'static> SearchIndex<T> {
    /// Wrap a static field list.
    #[must_use]
    pub const fn new(fields: &'static [SearchField<T>]) -> Self {
        Self { fields }
    }

    /// Whether any designated field of `item` contains the query.
    ///
    /// Missing fields never match.
    pub fn matches(&self, item: &T, query: &SearchQuery) -> bool {
        self.fields
            .iter()
            .filter_map(|field| field.value(item))
            .any(|text| query.matches_text(text))
    }

    /// Names of the designated fields, in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(SearchField::name).collect()
    }
}

impl<T: 'static> fmt::Debug for SearchIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(SearchField::name))
            .finish()
    }
}
