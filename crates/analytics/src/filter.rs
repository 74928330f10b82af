use core_types::{DateRange, FinancialEntry};

/// Keeps the entries dated within `range` (inclusive), preserving input order.
pub fn filter_by_range(entries: &[FinancialEntry], range: &DateRange) -> Vec<FinancialEntry> {
    entries
        .iter()
        .filter(|entry| range.contains(entry.date))
        .cloned()
        .collect()
}
