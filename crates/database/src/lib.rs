//! # Sales Tracker Database Crate
//!
//! This crate acts as the application-specific storage layer for ledger
//! entries. It is the system's "permanent archive."
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic behind the
//!   `EntryStore` trait, hiding the underlying SQL from the rest of the application.
//! - **Whitelisted Ordering:** Listing queries are ordered by a `SortDirective`,
//!   whose column names are fixed strings, so request text never reaches SQL.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses a
//!   connection pool (`PgPool`) for concurrent database access.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations` / `open_store`: pool setup and schema migration.
//! - `EntryStore`: the storage trait consumed by the tracker service.
//! - `DbRepository`: the PostgreSQL implementation.
//! - `MemoryStore`: an in-process implementation for development and tests.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, open_store, run_migrations};
pub use error::DbError;
pub use memory::MemoryStore;
pub use repository::{DbEntry, DbRepository};
pub use store::EntryStore;
