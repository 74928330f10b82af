//! # Sales Tracker Service
//!
//! Wires the storage layer to the analytics engine and the CSV exporter. The
//! HTTP server and the command-line tool both drive the system through
//! `TrackerService`.

pub mod error;
pub mod service;

pub use error::TrackerError;
pub use service::TrackerService;
