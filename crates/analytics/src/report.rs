use core_types::FinancialEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole-set summary statistics over signed entry amounts.
///
/// This struct is the output of `AnalyticsEngine::aggregate` and is repeated
/// unchanged on every row of an aggregated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub sum: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub average: Decimal,
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub median: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentile_90: Decimal,
}

/// An entry together with the statistics of the set it was reported in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntry {
    #[serde(flatten)]
    pub entry: FinancialEntry,
    #[serde(rename = "aggregated_data")]
    pub aggregated: AggregateStats,
}
