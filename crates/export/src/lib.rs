//! # Sales Tracker Export
//!
//! Serializes result sets into comma-delimited tables with one of two fixed
//! schemas: plain entries, or entries followed by their broadcast statistics.
//!
//! Rendering never mutates its input and performs no I/O beyond the writer it
//! is handed; delivering the bytes is the caller's job.

pub mod csv_writer;
pub mod error;
pub mod schema;

pub use csv_writer::{render_csv, write_csv};
pub use error::ExportError;
pub use schema::{
    AGGREGATED_HEADER, PLAIN_HEADER, Schema, TabularRow, format_timestamp, format_two_decimals,
};
