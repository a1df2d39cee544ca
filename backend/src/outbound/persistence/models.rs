//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! aggregates live next to the repositories that use them.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{books, reading_list_books, reading_lists, reviews, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
}

/// Changeset for user profile updates. `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Book models
// ---------------------------------------------------------------------------

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

/// Insertable struct for creating book records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub isbn: Option<&'a str>,
    pub genre: Option<&'a str>,
    pub description: Option<&'a str>,
    pub publication_year: Option<i32>,
}

/// Changeset replacing every mutable book column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BookUpdate<'a> {
    pub title: &'a str,
    pub author: Option<&'a str>,
    pub isbn: Option<&'a str>,
    pub genre: Option<&'a str>,
    pub description: Option<&'a str>,
    pub publication_year: Option<i32>,
}

// ---------------------------------------------------------------------------
// Reading list models
// ---------------------------------------------------------------------------

/// Row struct for reading list headers.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reading_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReadingListRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Insertable struct for creating reading list headers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reading_lists)]
pub(crate) struct NewReadingListRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Changeset for reading list headers. Membership is never touched here.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = reading_lists)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ReadingListUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// One membership row; `position` is assigned by the database.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reading_list_books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReadingListBookRow {
    pub list_id: Uuid,
    pub book_id: Uuid,
}

// ---------------------------------------------------------------------------
// Review models
// ---------------------------------------------------------------------------

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub book_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
}

/// Insertable struct for creating review records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub(crate) struct NewReviewRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub book_id: Uuid,
    pub rating: i16,
    pub comment: Option<&'a str>,
}

/// Changeset for the mutable review columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = reviews)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ReviewUpdate<'a> {
    pub rating: i16,
    pub comment: Option<&'a str>,
}
