use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// The 50th percentile.
pub const MEDIAN: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The 90th percentile.
pub const P90: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Continuous percentile of an ascending slice, interpolating linearly
/// between the two order statistics that bracket rank `p * (n - 1)`.
///
/// This matches PostgreSQL's `percentile_cont`. Returns `None` for an empty
/// slice or a `p` outside `[0, 1]`.
pub fn percentile(sorted: &[i64], p: Decimal) -> Option<Decimal> {
    if p < Decimal::ZERO || p > Decimal::ONE {
        return None;
    }
    let last = sorted.len().checked_sub(1)?;

    let rank = p * Decimal::from(last);
    let lower_rank = rank.floor();
    let lower = lower_rank.to_usize()?;
    let upper = rank.ceil().to_usize()?.min(last);

    let lower_value = Decimal::from(sorted[lower]);
    let upper_value = Decimal::from(sorted[upper]);
    Some(lower_value + (rank - lower_rank) * (upper_value - lower_value))
}
