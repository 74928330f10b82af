use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar dates. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// The range that admits every date.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Builds a range, rejecting one whose lower bound lies after its upper bound.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, CoreError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(CoreError::InvalidDateRange(format!(
                    "'from' ({from}) is after 'to' ({to})"
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Parses query-string bounds in `YYYY-MM-DD` form.
    ///
    /// Absent or empty strings mean "no constraint on that side".
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, CoreError> {
        Self::new(parse_bound("from", from)?, parse_bound("to", to)?)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| from <= date) && self.to.is_none_or(|to| date <= to)
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some).map_err(|_| {
            CoreError::InvalidDateRange(format!("'{name}' must be in format YYYY-MM-DD, got '{raw}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_and_missing_bounds_are_unbounded() {
        assert!(DateRange::parse(None, None).unwrap().is_unbounded());
        assert!(DateRange::parse(Some(""), Some("")).unwrap().is_unbounded());

        let half_open = DateRange::parse(Some("2023-01-10"), None).unwrap();
        assert_eq!(half_open.from, Some(day(2023, 1, 10)));
        assert!(half_open.contains(day(2030, 1, 1)));
        assert!(!half_open.contains(day(2023, 1, 9)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::parse(Some("2023-01-01"), Some("2023-01-31")).unwrap();
        assert!(range.contains(day(2023, 1, 1)));
        assert!(range.contains(day(2023, 1, 31)));
        assert!(!range.contains(day(2022, 12, 31)));
        assert!(!range.contains(day(2023, 2, 1)));
    }

    #[test]
    fn single_day_range() {
        let range = DateRange::parse(Some("2024-02-29"), Some("2024-02-29")).unwrap();
        assert!(range.contains(day(2024, 2, 29)));
        assert!(!range.contains(day(2024, 3, 1)));
    }

    #[test]
    fn rejects_malformed_and_inverted_ranges() {
        assert!(matches!(
            DateRange::parse(Some("2023-02-30"), None),
            Err(CoreError::InvalidDateRange(_))
        ));
        assert!(matches!(
            DateRange::parse(Some("01-01-2023"), Some("2023-12-31")),
            Err(CoreError::InvalidDateRange(_))
        ));
        assert!(matches!(
            DateRange::parse(Some("2023-12-31"), Some("2023-01-01")),
            Err(CoreError::InvalidDateRange(_))
        ));
    }
}
