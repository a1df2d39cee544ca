//! Storage adapters implementing the repository ports.
//!
//! - **memory**: `DashMap` tables for tests and database-less runs.
//! - **persistence**: PostgreSQL via Diesel.
//!
//! Both backends pass the same conformance suite under `tests/`.

pub mod memory;
pub mod persistence;
