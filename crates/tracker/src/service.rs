use crate::error::TrackerError;
use analytics::{AggregateStats, AggregatedEntry, AnalyticsEngine};
use core_types::{DateRange, EntryUpdate, FinancialEntry, NewEntry, SortDirective};
use database::EntryStore;
use std::sync::Arc;

/// The use cases of the tracker: entry maintenance, listings, analytics and exports.
///
/// Every request validates its input first, then fetches a snapshot from the
/// store and hands it to the analytics engine or the CSV renderer.
#[derive(Clone)]
pub struct TrackerService {
    store: Arc<dyn EntryStore>,
    engine: Arc<AnalyticsEngine>,
}

impl TrackerService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            engine: Arc::new(AnalyticsEngine::new()),
        }
    }

    pub async fn create_entry(&self, entry: NewEntry) -> Result<FinancialEntry, TrackerError> {
        entry.validate()?;
        let created = self.store.create_entry(entry).await?;
        tracing::info!(id = created.id, kind = %created.kind, "Created entry.");
        Ok(created)
    }

    /// Lists every entry ordered by `sort_by`. Unknown field names are rejected
    /// before storage is touched.
    pub async fn list_entries<S: AsRef<str>>(
        &self,
        sort_by: &[S],
    ) -> Result<Vec<FinancialEntry>, TrackerError> {
        let directive = SortDirective::resolve(sort_by)?;
        Ok(self.store.fetch_entries(&directive).await?)
    }

    pub async fn update_entry(&self, id: i64, update: EntryUpdate) -> Result<(), TrackerError> {
        update.validate()?;
        self.store.update_entry(id, update).await?;
        tracing::info!(id, "Updated entry.");
        Ok(())
    }

    pub async fn delete_entry(&self, id: i64) -> Result<(), TrackerError> {
        self.store.delete_entry(id).await?;
        tracing::info!(id, "Deleted entry.");
        Ok(())
    }

    /// Every entry in `range`, each annotated with the statistics of the whole range.
    pub async fn aggregated_entries(
        &self,
        range: &DateRange,
    ) -> Result<Vec<AggregatedEntry>, TrackerError> {
        let entries = self.store.fetch_entries_in_range(range).await?;
        Ok(self.engine.annotate(entries)?)
    }

    /// Summary statistics for `range`; `AnalyticsError::NoData` when it holds no entries.
    pub async fn statistics(&self, range: &DateRange) -> Result<AggregateStats, TrackerError> {
        let entries = self.store.fetch_entries_in_range(range).await?;
        Ok(self.engine.statistics(&entries, range)?)
    }

    /// The plain listing as a complete CSV document.
    pub async fn export_entries_csv<S: AsRef<str>>(
        &self,
        sort_by: &[S],
    ) -> Result<Vec<u8>, TrackerError> {
        let entries = self.list_entries(sort_by).await?;
        let csv = export::render_csv(&entries)?;
        tracing::debug!(rows = entries.len(), bytes = csv.len(), "Rendered entries CSV.");
        Ok(csv)
    }

    /// The aggregated listing for `range` as a complete CSV document.
    pub async fn export_aggregated_csv(&self, range: &DateRange) -> Result<Vec<u8>, TrackerError> {
        let rows = self.aggregated_entries(range).await?;
        let csv = export::render_csv(&rows)?;
        tracing::debug!(rows = rows.len(), bytes = csv.len(), "Rendered aggregated CSV.");
        Ok(csv)
    }
}
