//! Resolves the named quick-filter presets into concrete time intervals.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime, Time, UtcOffset};

/// A named quick-filter for restricting transactions by date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangePreset {
    /// The current calendar day.
    Today,
    /// From the start of the current week (Sunday) up to now.
    Week,
    /// From the first day of the current month up to now.
    Month,
    /// The whole previous calendar month.
    LastMonth,
    /// No date restriction.
    #[default]
    All,
}

/// An inclusive interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// The first instant included in the range.
    pub start: OffsetDateTime,
    /// The last instant included in the range.
    pub end: OffsetDateTime,
}

impl TimeRange {
    /// Whether `instant` falls within the range, bounds included.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Resolve a quick-filter preset into a concrete interval anchored at `now`.
///
/// Returns `None` for [RangePreset::All], meaning no restriction. The
/// `Week` and `Month` ranges deliberately end at `now` rather than at the
/// end of their calendar bucket, so transactions dated later the same week
/// or month are excluded.
pub fn resolve(preset: RangePreset, now: OffsetDateTime) -> Option<TimeRange> {
    let midnight = now.replace_time(Time::MIDNIGHT);

    match preset {
        RangePreset::Today => Some(TimeRange {
            start: midnight,
            end: midnight + Duration::days(1) - Duration::milliseconds(1),
        }),
        RangePreset::Week => Some(TimeRange {
            start: day_start(week_start(now.date()), now.offset()),
            end: now,
        }),
        RangePreset::Month => Some(TimeRange {
            start: day_start(first_of_month(now.year(), now.month()), now.offset()),
            end: now,
        }),
        RangePreset::LastMonth => {
            let (year, month) = match now.month() {
                Month::January => (now.year() - 1, Month::December),
                month => (now.year(), month.previous()),
            };

            Some(month_bounds(year, month, now.offset()))
        }
        RangePreset::All => None,
    }
}

/// The current calendar month as an inclusive interval, from the first day
/// at midnight to the last day at 23:59:59. Used by the monthly breakdown.
pub(crate) fn current_month(now: OffsetDateTime) -> TimeRange {
    month_bounds(now.year(), now.month(), now.offset())
}

/// The Sunday on or before `date`.
pub(crate) fn week_start(date: Date) -> Date {
    date - Duration::days(date.weekday().number_days_from_sunday() as i64)
}

fn month_bounds(year: i32, month: Month, offset: UtcOffset) -> TimeRange {
    let last_day = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    TimeRange {
        start: day_start(first_of_month(year, month), offset),
        // Second precision at the upper bound, matching the stored ranges
        // the rest of the family's clients filter against.
        end: last_day
            .with_hms(23, 59, 59)
            .expect("invalid month end time")
            .assume_offset(offset),
    }
}

fn first_of_month(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).expect("invalid month start date")
}

fn day_start(date: Date, offset: UtcOffset) -> OffsetDateTime {
    date.midnight().assume_offset(offset)
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

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{RangePreset, resolve};

    #[test]
    fn today_covers_the_whole_calendar_day() {
        let now = datetime!(2025-10-15 14:30 UTC);

        let got = resolve(RangePreset::Today, now).unwrap();

        assert_eq!(got.start, datetime!(2025-10-15 00:00 UTC));
        assert_eq!(got.end, datetime!(2025-10-15 23:59:59.999 UTC));
        assert!(got.contains(now));
        assert!(!got.contains(datetime!(2025-10-16 00:00 UTC)));
    }

    #[test]
    fn week_starts_on_sunday_and_ends_at_now() {
        // 2025-10-15 is a Wednesday; the preceding Sunday is the 12th.
        let now = datetime!(2025-10-15 14:30 UTC);

        let got = resolve(RangePreset::Week, now).unwrap();

        assert_eq!(got.start, datetime!(2025-10-12 00:00 UTC));
        assert_eq!(got.end, now);
        // Later the same week is excluded.
        assert!(!got.contains(datetime!(2025-10-15 18:00 UTC)));
    }

    #[test]
    fn week_on_a_sunday_starts_that_morning() {
        let now = datetime!(2025-10-12 09:00 UTC);

        let got = resolve(RangePreset::Week, now).unwrap();

        assert_eq!(got.start, datetime!(2025-10-12 00:00 UTC));
    }

    #[test]
    fn month_runs_from_the_first_to_now() {
        let now = datetime!(2025-10-15 14:30 UTC);

        let got = resolve(RangePreset::Month, now).unwrap();

        assert_eq!(got.start, datetime!(2025-10-01 00:00 UTC));
        assert_eq!(got.end, now);
    }

    #[test]
    fn last_month_covers_the_previous_calendar_month() {
        let now = datetime!(2025-10-15 14:30 UTC);

        let got = resolve(RangePreset::LastMonth, now).unwrap();

        assert_eq!(got.start, datetime!(2025-09-01 00:00 UTC));
        assert_eq!(got.end, datetime!(2025-09-30 23:59:59 UTC));
    }

    #[test]
    fn last_month_wraps_to_december_in_january() {
        let now = datetime!(2025-01-10 08:00 UTC);

        let got = resolve(RangePreset::LastMonth, now).unwrap();

        assert_eq!(got.start, datetime!(2024-12-01 00:00 UTC));
        assert_eq!(got.end, datetime!(2024-12-31 23:59:59 UTC));
    }

    #[test]
    fn last_month_handles_leap_february() {
        let now = datetime!(2024-03-10 08:00 UTC);

        let got = resolve(RangePreset::LastMonth, now).unwrap();

        assert_eq!(got.end, datetime!(2024-02-29 23:59:59 UTC));
    }

    #[test]
    fn all_means_no_restriction() {
        let now = datetime!(2025-10-15 14:30 UTC);

        assert_eq!(resolve(RangePreset::All, now), None);
    }
}
