//! Diesel table definitions for the catalogue schema.
//!
//! These definitions must match `migrations/` exactly. Every aggregate table
//! carries a `seq` column filled by a sequence on insert; multi-row reads
//! order by it so ties in the shared paginator break by insertion order.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        seq -> Int8,
        username -> Varchar,
        email -> Nullable<Varchar>,
        display_name -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Catalogue books.
    books (id) {
        id -> Uuid,
        seq -> Int8,
        title -> Varchar,
        author -> Nullable<Varchar>,
        isbn -> Nullable<Varchar>,
        genre -> Nullable<Varchar>,
        description -> Nullable<Text>,
        publication_year -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Reading list headers. Membership lives in `reading_list_books`.
    reading_lists (id) {
        id -> Uuid,
        seq -> Int8,
        owner_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Books on a reading list, ordered by `position`.
    ///
    /// `book_id` has no foreign key; deleted books linger as dangling ids.
    reading_list_books (list_id, book_id) {
        list_id -> Uuid,
        book_id -> Uuid,
        position -> Int8,
    }
}

diesel::table! {
    /// Book reviews.
    reviews (id) {
        id -> Uuid,
        seq -> Int8,
        owner_id -> Uuid,
        book_id -> Uuid,
        rating -> Int2,
        comment -> Nullable<Text>,
    }
}

diesel::joinable!(reading_list_books -> reading_lists (list_id));

diesel::allow_tables_to_appear_in_same_query!(books, reading_list_books, reading_lists, reviews, users);
