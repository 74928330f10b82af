pub mod enums;
pub mod error;
pub mod range;
pub mod sort;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::EntryKind;
pub use error::CoreError;
pub use range::DateRange;
pub use sort::{SortDirective, SortField};
pub use structs::{EntryUpdate, FinancialEntry, NewEntry};
