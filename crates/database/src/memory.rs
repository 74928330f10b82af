use crate::DbError;
use crate::store::EntryStore;
use analytics::filter_by_range;
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use core_types::{DateRange, EntryUpdate, FinancialEntry, NewEntry, SortDirective};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    entries: Vec<FinancialEntry>,
}

/// An in-process `EntryStore`. Entries live only as long as the store.
///
/// Used for local development (`database.in_memory = true`) and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn create_entry(&self, entry: NewEntry) -> Result<FinancialEntry, DbError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let created = FinancialEntry {
            id: state.last_id,
            kind: entry.kind,
            amount: entry.amount,
            date: entry.date,
            category: entry.category,
            // Microseconds, like PostgreSQL `TIMESTAMPTZ`.
            created_at: Utc::now().trunc_subsecs(6),
        };
        state.entries.push(created.clone());
        Ok(created)
    }

    async fn fetch_entries(&self, sort: &SortDirective) -> Result<Vec<FinancialEntry>, DbError> {
        let mut entries = self.state.read().await.entries.clone();
        sort.apply(&mut entries);
        Ok(entries)
    }

    async fn fetch_entries_in_range(&self, range: &DateRange) -> Result<Vec<FinancialEntry>, DbError> {
        let state = self.state.read().await;
        Ok(filter_by_range(&state.entries, range))
    }

    async fn update_entry(&self, id: i64, update: EntryUpdate) -> Result<(), DbError> {
        let mut state = self.state.write().await;
        let entry = state
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(DbError::NotFound)?;
        update.apply_to(entry);
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<(), DbError> {
        let mut state = self.state.write().await;
        let before = state.entries.len();
        state.entries.retain(|entry| entry.id != id);
        if state.entries.len() == before {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
