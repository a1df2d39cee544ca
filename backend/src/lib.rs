//! Bookshelf catalogue core.
//!
//! - [`domain`]: aggregates, references, ownership rules, services and the
//!   repository ports.
//! - [`outbound`]: the in-memory and PostgreSQL repository backends.
//! - [`app`]: settings, backend selection and tracing set-up used by the
//!   `bookshelf` binary.
//!
//! Sorting, search and paging live in the `pagination` workspace crate.

pub mod app;
pub mod domain;
pub mod outbound;
