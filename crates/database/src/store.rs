use crate::DbError;
use async_trait::async_trait;
use core_types::{DateRange, EntryUpdate, FinancialEntry, NewEntry, SortDirective};

/// The storage operations the tracker needs.
///
/// Implementations own consistency: every fetch returns a snapshot that the
/// analytics engine can work on without further coordination.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Persists a new entry, assigning its `id` and `created_at`.
    async fn create_entry(&self, entry: NewEntry) -> Result<FinancialEntry, DbError>;

    /// Fetches every entry, ordered by `sort` (storage-natural order when empty).
    async fn fetch_entries(&self, sort: &SortDirective) -> Result<Vec<FinancialEntry>, DbError>;

    /// Fetches the entries dated within `range`, ordered by `id`.
    async fn fetch_entries_in_range(&self, range: &DateRange) -> Result<Vec<FinancialEntry>, DbError>;

    /// Applies a partial update. `DbError::NotFound` if no entry has `id`.
    async fn update_entry(&self, id: i64, update: EntryUpdate) -> Result<(), DbError>;

    /// `DbError::NotFound` if no entry has `id`.
    async fn delete_entry(&self, id: i64) -> Result<(), DbError>;
}
