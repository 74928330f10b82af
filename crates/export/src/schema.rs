use analytics::AggregatedEntry;
use chrono::{DateTime, SecondsFormat, Utc};
use core_types::FinancialEntry;
use rust_decimal::{Decimal, RoundingStrategy};

pub const PLAIN_HEADER: [&str; 6] = ["id", "type", "amount", "date", "category", "created_at"];

pub const AGGREGATED_HEADER: [&str; 11] = [
    "id",
    "type",
    "amount",
    "date",
    "category",
    "created_at",
    "sum",
    "average",
    "count",
    "median",
    "percentile_90",
];

/// The two fixed column layouts of an export. Consumers depend on the header
/// rows, so column names and order never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Plain,
    Aggregated,
}

impl Schema {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Schema::Plain => &PLAIN_HEADER,
            Schema::Aggregated => &AGGREGATED_HEADER,
        }
    }
}

/// A value that renders as one row of a fixed schema.
pub trait TabularRow {
    const SCHEMA: Schema;

    fn record(&self) -> Vec<String>;
}

impl TabularRow for FinancialEntry {
    const SCHEMA: Schema = Schema::Plain;

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.kind.as_str().to_string(),
            self.amount.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            self.category.clone(),
            format_timestamp(&self.created_at),
        ]
    }
}

impl TabularRow for AggregatedEntry {
    const SCHEMA: Schema = Schema::Aggregated;

    fn record(&self) -> Vec<String> {
        let stats = &self.aggregated;
        let mut record = self.entry.record();
        record.extend([
            stats.sum.to_string(),
            format_two_decimals(stats.average),
            stats.count.to_string(),
            format_two_decimals(stats.median),
            format_two_decimals(stats.percentile_90),
        ]);
        record
    }
}

/// Exactly two fractional digits, rounding half away from zero.
pub fn format_two_decimals(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// RFC 3339 in UTC with microsecond precision, e.g. `2024-03-01T12:00:00.000000Z`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}
