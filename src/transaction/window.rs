//! Windowed date filtering for the transaction list.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime};

use super::core::Transaction;

/// The time window used to filter the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeWindow {
    /// No date filtering.
    All,
    /// Records created on the same calendar date as now.
    Day,
    /// Records created in the past seven days (rolling, inclusive).
    Week,
    /// Records created in the past calendar month (rolling).
    Month,
    /// Records created in the past calendar year (rolling).
    Year,
}

impl TimeWindow {
    /// The window to use when the user has not picked one.
    pub fn default_preset() -> Self {
        Self::All
    }

    /// The kebab-case value used in queries and saved preferences.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// The label shown on the filter button for this window.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::Day => "Today",
            Self::Week => "Past week",
            Self::Month => "Past month",
            Self::Year => "Past year",
        }
    }

    /// Whether `transaction` was created inside this window, measured from
    /// `now`.
    ///
    /// A record whose `created_at` does not parse as a date-time fails every
    /// window except [TimeWindow::All].
    pub fn contains(self, transaction: &Transaction, now: OffsetDateTime) -> bool {
        let Some(created_at) = transaction.created_at.datetime() else {
            return self == Self::All;
        };

        match self {
            Self::All => true,
            Self::Day => created_at.to_offset(now.offset()).date() == now.date(),
            Self::Week => created_at >= now - Duration::days(7),
            Self::Month => created_at >= one_month_before(now),
            Self::Year => created_at >= one_year_before(now),
        }
    }
}

/// The same instant one calendar month earlier, clamping the day of month,
/// e.g. 31 March goes back to 28 (or 29) February.
fn one_month_before(now: OffsetDateTime) -> OffsetDateTime {
    let date = now.date();
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        month => (date.year(), month.previous()),
    };
    let day = date.day().min(last_day_of_month(year, month));
    let date = Date::from_calendar_date(year, month, day).expect("invalid month-before date");

    now.replace_date(date)
}

/// The same instant one calendar year earlier, clamping 29 February to 28.
fn one_year_before(now: OffsetDateTime) -> OffsetDateTime {
    let date = now.date();
    let year = date.year() - 1;
    let day = date.day().min(last_day_of_month(year, date.month()));
    let date = Date::from_calendar_date(year, date.month(), day).expect("invalid year-before date");

    now.replace_date(date)
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
