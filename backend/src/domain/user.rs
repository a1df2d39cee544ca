//! Registered users.

use pagination::{Pageable, SearchField, SortField, SortKey};
use serde::{Deserialize, Serialize};

use super::{Aggregate, Error, Owned, UserId};

/// Caller-supplied profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Login name; must not be blank.
    pub username: String,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Name shown to other users.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserProfile {
    /// Profile with only a username.
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

/// Registered user. A user record is owned by the user it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Immutable identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: Option<String>,
    /// Name shown to other users.
    pub display_name: Option<String>,
}

impl User {
    /// Validate `profile` and attach `id`.
    pub fn new(id: UserId, profile: UserProfile) -> Result<Self, Error> {
        if profile.username.trim().is_empty() {
            return Err(Error::invalid_request("username must not be blank"));
        }
        Ok(Self {
            id,
            username: profile.username,
            email: profile.email,
            display_name: profile.display_name,
        })
    }
}

impl Aggregate for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }
}

impl Owned for User {
    fn owner_id(&self) -> UserId {
        self.id
    }
}

fn username_text(user: &User) -> Option<&str> {
    Some(user.username.as_str())
}

fn display_name_text(user: &User) -> Option<&str> {
    user.display_name.as_deref()
}

fn email_text(user: &User) -> Option<&str> {
    user.email.as_deref()
}

fn username_key(user: &User) -> SortKey {
    SortKey::text(Some(user.username.as_str()))
}

fn display_name_key(user: &User) -> SortKey {
    SortKey::text(user.display_name.as_deref())
}

fn email_key(user: &User) -> SortKey {
    SortKey::text(user.email.as_deref())
}

impl Pageable for User {
    const SEARCH_FIELDS: &'static [SearchField<Self>] = &[
        SearchField::new("username", username_text),
        SearchField::new("displayName", display_name_text),
        SearchField::new("email", email_text),
    ];
    const SORT_FIELDS: &'static [SortField<Self>] = &[
        SortField::new("username", username_key),
        SortField::new("displayName", display_name_key),
        SortField::new("email", email_key),
    ];
}
