// crates/core/src/interval.rs
//! Interval generation: the ordered list of chart buckets spanning a window.
//!
//! Bucket keys are the normalized form entry dates are matched against
//! (`YYYY-MM-DD` for days, `YYYY-MM` for months). Labels are for display only.

use crate::error::AnalysisError;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

/// Bucket size for date alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    /// Normalize a date to this granularity's bucket key.
    pub fn key_for(self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => date.format("%Y-%m-%d").to_string(),
            Granularity::Month => date.format("%Y-%m").to_string(),
        }
    }

    /// Short human label: "Jan 05" for days, "Jan 2025" for months.
    pub fn label_for(self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => date.format("%b %d").to_string(),
            Granularity::Month => date.format("%b %Y").to_string(),
        }
    }

    fn first_point(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    fn next_point(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => date.succ_opt(),
            Granularity::Month => date.checked_add_months(Months::new(1)),
        }
    }
}

/// One point on the chart's time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub key: String,
}

/// The buckets spanning `[start, end]`, in ascending order.
#[derive(Debug, Clone)]
pub struct Timeline {
    granularity: Granularity,
    start: NaiveDate,
    end: NaiveDate,
    buckets: Vec<Bucket>,
    positions: HashMap<String, usize>,
}

impl Timeline {
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Index of the bucket a date falls in, or `None` when the date is
    /// outside `[start, end]`.
    ///
    /// The bound check is on the exact dates, not the bucket keys: a month
    /// bucket covers the whole calendar month, but a date in that month
    /// before `start` is still outside the window.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date > self.end {
            return None;
        }
        self.positions
            .get(&self.granularity.key_for(date))
            .copied()
    }
}

/// Generate the buckets for `[start, end]` (both inclusive).
///
/// Never empty when `start <= end`.
pub fn generate(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> Result<Timeline, AnalysisError> {
    if start > end {
        return Err(AnalysisError::InvalidRange { start, end });
    }

    let last = granularity.first_point(end);
    let mut buckets = Vec::new();
    let mut cursor = Some(granularity.first_point(start));
    while let Some(point) = cursor.filter(|p| *p <= last) {
        buckets.push(Bucket {
            label: granularity.label_for(point),
            key: granularity.key_for(point),
        });
        cursor = granularity.next_point(point);
    }

    let positions = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.key.clone(), i))
        .collect();

    Ok(Timeline {
        granularity,
        start,
        end,
        buckets,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn keys(timeline: &Timeline) -> Vec<&str> {
        timeline.buckets().iter().map(|b| b.key.as_str()).collect()
    }

    #[test]
    fn test_day_buckets_are_inclusive() {
        let t = generate(date("2025-01-03"), date("2025-01-06"), Granularity::Day).unwrap();
        assert_eq!(
            keys(&t),
            vec!["2025-01-03", "2025-01-04", "2025-01-05", "2025-01-06"]
        );
        assert_eq!(t.buckets()[2].label, "Jan 05");
    }

    #[test]
    fn test_single_day_window() {
        let t = generate(date("2025-01-03"), date("2025-01-03"), Granularity::Day).unwrap();
        assert_eq!(t.len(), 1);
        assert!(!t.is_empty());
    }

    #[test]
    fn test_day_buckets_cross_month_and_leap_day() {
        let t = generate(date("2024-02-27"), date("2024-03-01"), Granularity::Day).unwrap();
        assert_eq!(
            keys(&t),
            vec!["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn test_month_buckets() {
        let t = generate(date("2024-11-19"), date("2025-02-03"), Granularity::Month).unwrap();
        assert_eq!(keys(&t), vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
        let labels: Vec<&str> = t.buckets().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]);
    }

    #[test]
    fn test_month_buckets_from_month_end() {
        // Stepping from Jan 31 must not skip February.
        let t = generate(date("2025-01-31"), date("2025-03-31"), Granularity::Month).unwrap();
        assert_eq!(keys(&t), vec!["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn test_start_after_end_is_invalid_range() {
        let err = generate(date("2025-01-02"), date("2025-01-01"), Granularity::Day).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRange { .. }));
    }

    #[test]
    fn test_position_matches_normalized_key() {
        let t = generate(date("2025-01-15"), date("2025-03-31"), Granularity::Month).unwrap();
        assert_eq!(t.position(date("2025-02-14")), Some(1));
        assert_eq!(t.position(date("2025-01-15")), Some(0));
        assert_eq!(t.position(date("2025-01-14")), None);
        assert_eq!(t.position(date("2025-04-01")), None);

        let t = generate(date("2025-01-01"), date("2025-01-07"), Granularity::Day).unwrap();
        assert_eq!(t.position(date("2025-01-07")), Some(6));
        assert_eq!(t.position(date("2024-12-31")), None);
    }

    proptest! {
        #[test]
        fn generate_spans_window_in_order(
            start_offset in 0i64..20_000,
            len in 0i64..800,
            monthly in any::<bool>(),
        ) {
            let epoch = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
            let start = epoch + chrono::Duration::days(start_offset);
            let end = start + chrono::Duration::days(len);
            let granularity = if monthly { Granularity::Month } else { Granularity::Day };

            let t = generate(start, end, granularity).unwrap();
            prop_assert!(!t.is_empty());
            prop_assert_eq!(&t.buckets()[0].key, &granularity.key_for(start));
            prop_assert_eq!(&t.buckets()[t.len() - 1].key, &granularity.key_for(end));
            for pair in t.buckets().windows(2) {
                prop_assert!(pair[0].key < pair[1].key);
            }
            if !monthly {
                prop_assert_eq!(t.len() as i64, len + 1);
            }
        }
    }
}
