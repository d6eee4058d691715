// crates/core/src/window.rs
//! Lookback presets for analytics and the date ranges they resolve to.

use crate::interval::Granularity;
use chrono::{Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Fixed lookback preset selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Last 7 days plus today, one bucket per day.
    Week,
    /// Last calendar month, one bucket per day.
    Month,
    /// Last calendar year, one bucket per month.
    Year,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::Week, Window::Month, Window::Year];

    /// Parse from query string parameter.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "week" => Some(Window::Week),
            "month" => Some(Window::Month),
            "year" => Some(Window::Year),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Window::Week => "week",
            Window::Month => "month",
            Window::Year => "year",
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            Window::Week | Window::Month => Granularity::Day,
            Window::Year => Granularity::Month,
        }
    }

    /// Resolve the preset against `today`. The end is always `today`;
    /// calendar subtraction clamps to the last valid day (Mar 31 → Feb 28).
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let start = match self {
            Window::Week => today.checked_sub_days(Days::new(7)),
            Window::Month => today.checked_sub_months(Months::new(1)),
            Window::Year => today.checked_sub_months(Months::new(12)),
        };
        DateRange {
            start: start.unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[ts(type = "string")]
    pub start: NaiveDate,
    #[ts(type = "string")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Today's date in the local timezone: the anchor for every preset.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
