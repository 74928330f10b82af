use crate::error::AnalyticsError;
use crate::filter::filter_by_range;
use crate::percentile::{self, MEDIAN, P90};
use crate::report::{AggregateStats, AggregatedEntry};
use core_types::{DateRange, FinancialEntry};
use rust_decimal::Decimal;

/// A stateless calculator for deriving summary statistics from ledger entries.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces a set of entries to its summary statistics.
    ///
    /// Every statistic is computed over the signed amounts (income positive,
    /// expenses negative). Median and 90th percentile use linear interpolation
    /// between order statistics, see [`percentile::percentile`].
    ///
    /// # Returns
    ///
    /// `AnalyticsError::NoData` for an empty input, since average, median and
    /// percentiles are undefined there.
    pub fn aggregate(&self, entries: &[FinancialEntry]) -> Result<AggregateStats, AnalyticsError> {
        if entries.is_empty() {
            return Err(AnalyticsError::NoData);
        }

        let mut signed: Vec<i64> = entries.iter().map(FinancialEntry::signed_amount).collect();

        let sum = signed
            .iter()
            .try_fold(0i64, |acc, value| acc.checked_add(*value))
            .ok_or_else(|| AnalyticsError::Calculation("sum of amounts overflows".to_string()))?;
        let count = signed.len();
        let average = Decimal::from(sum)
            .checked_div(Decimal::from(count))
            .ok_or_else(|| AnalyticsError::Calculation("average could not be computed".to_string()))?;

        signed.sort_unstable();
        let median = self.percentile_of(&signed, MEDIAN, "median")?;
        let percentile_90 = self.percentile_of(&signed, P90, "percentile_90")?;

        Ok(AggregateStats {
            sum,
            average,
            count,
            median,
            percentile_90,
        })
    }

    /// Annotates every entry with the statistics of the whole set.
    ///
    /// Each row carries the same `AggregateStats`; the entries themselves are
    /// unchanged. An empty input yields an empty result.
    pub fn annotate(
        &self,
        entries: Vec<FinancialEntry>,
    ) -> Result<Vec<AggregatedEntry>, AnalyticsError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let stats = self.aggregate(&entries)?;
        Ok(entries
            .into_iter()
            .map(|entry| AggregatedEntry {
                entry,
                aggregated: stats.clone(),
            })
            .collect())
    }

    /// Narrows `entries` to `range` and aggregates what remains.
    pub fn statistics(
        &self,
        entries: &[FinancialEntry],
        range: &DateRange,
    ) -> Result<AggregateStats, AnalyticsError> {
        if range.is_unbounded() {
            return self.aggregate(entries);
        }
        self.aggregate(&filter_by_range(entries, range))
    }

    fn percentile_of(&self, sorted: &[i64], p: Decimal, name: &str) -> Result<Decimal, AnalyticsError> {
        percentile::percentile(sorted, p)
            .ok_or_else(|| AnalyticsError::Calculation(format!("{name} could not be computed")))
    }
}
