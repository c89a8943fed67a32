//! Season resolution for recurring annual rate windows.
//!
//! Seasonal rates are stored as "MM-DD" month-day patterns, not calendar
//! dates: a season like "Haute saison" (06-01 to 08-31) applies every
//! year. A window whose end sorts before its start (12-01 to 02-28)
//! wraps across the year boundary and covers both the late-year and
//! early-year segments.

use chrono::{Datelike, NaiveDate};

use super::models::SeasonRange;

/// A recurring month-day pattern parsed from "MM-DD".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

/// Raised when a stored "MM-DD" pattern cannot be parsed. This is bad
/// reference data, not an expected absence, and fails the request loudly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month-day pattern {pattern:?}, expected \"MM-DD\"")]
pub struct InvalidMonthDay {
    pub pattern: String,
}

/// Absolute validity window implied by an active season and a request
/// date, with the wrap-around years resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SeasonWindow {
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl MonthDay {
    /// Parse a strict "MM-DD" pattern. Both fields must be two digits;
    /// the day must exist in the month. "02-29" is accepted as a
    /// recurring pattern even though it only lands on leap years.
    pub fn parse(pattern: &str) -> Result<Self, InvalidMonthDay> {
        let err = || InvalidMonthDay {
            pattern: pattern.to_string(),
        };

        let (month_str, day_str) = match pattern.split_once('-') {
            Some(parts) => parts,
            None => return Err(err()),
        };
        if month_str.len() != 2 || day_str.len() != 2 {
            return Err(err());
        }

        let month: u32 = month_str.parse().map_err(|_| err())?;
        let day: u32 = day_str.parse().map_err(|_| err())?;

        let max_day = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return Err(err()),
        };
        if day == 0 || day > max_day {
            return Err(err());
        }

        Ok(Self { month, day })
    }

    /// Compose a concrete date from this pattern and a reference year.
    ///
    /// Feb 29 clamps to Feb 28 when the year is not a leap year, so a
    /// recurring "02-29" boundary stays meaningful every year.
    pub fn on_year(self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day).unwrap_or_else(|| {
            // Parse guarantees the day fits the month; only Feb 29 on a
            // non-leap year can fall through.
            NaiveDate::from_ymd_opt(year, 2, 28).unwrap()
        })
    }
}

/// Find the season active on the given date, if any.
///
/// Returns the first matching range in input order; input order is the
/// tie-break for overlapping seasons. An empty list or no match yields
/// `None` — "no active season" is a normal outcome, not an error.
pub fn find_active_season<'a, R: SeasonRange>(
    rates: &'a [R],
    on: NaiveDate,
) -> Result<Option<&'a R>, InvalidMonthDay> {
    let year = on.year();

    for rate in rates {
        let start = MonthDay::parse(rate.start_date())?.on_year(year);
        let end = MonthDay::parse(rate.end_date())?.on_year(year);

        let active = if end < start {
            // Wrapping season (e.g. 12-01 to 02-28): the date is either
            // in the late-year segment or the early-year segment.
            on >= start || on <= end
        } else {
            start <= on && on <= end
        };

        if active {
            return Ok(Some(rate));
        }
    }

    Ok(None)
}

/// Materialize the absolute validity window of a season for a request
/// date.
///
/// For a wrapping season the request date determines the year pair: a
/// date in the early segment puts `valid_from` in the prior year, a date
/// in the late segment puts `valid_to` in the next year.
pub fn season_window<R: SeasonRange>(
    rate: &R,
    on: NaiveDate,
) -> Result<SeasonWindow, InvalidMonthDay> {
    let year = on.year();
    let start = MonthDay::parse(rate.start_date())?;
    let end = MonthDay::parse(rate.end_date())?;

    let valid_from = start.on_year(year);
    let valid_to = end.on_year(year);

    if valid_to < valid_from {
        if on <= valid_to {
            // Early segment (e.g. Jan 15): the season started last year.
            return Ok(SeasonWindow {
                valid_from: start.on_year(year - 1),
                valid_to,
            });
        }
        // Late segment (e.g. Dec 15): the season ends next year.
        return Ok(SeasonWindow {
            valid_from,
            valid_to: end.on_year(year + 1),
        });
    }

    Ok(SeasonWindow {
        valid_from,
        valid_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRange {
        name: &'static str,
        start: &'static str,
        end: &'static str,
    }

    impl SeasonRange for TestRange {
        fn season_name(&self) -> &str {
            self.name
        }

        fn start_date(&self) -> &str {
            self.start
        }

        fn end_date(&self) -> &str {
            self.end
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== MonthDay::parse tests ====================

    #[test]
    fn test_parse_valid_patterns() {
        assert_eq!(MonthDay::parse("06-01").unwrap(), MonthDay { month: 6, day: 1 });
        assert_eq!(MonthDay::parse("12-31").unwrap(), MonthDay { month: 12, day: 31 });
        // Recurring Feb 29 is legal reference data
        assert_eq!(MonthDay::parse("02-29").unwrap(), MonthDay { month: 2, day: 29 });
    }

    #[test]
    fn test_parse_rejects_bad_patterns() {
        assert!(MonthDay::parse("13-01").is_err());
        assert!(MonthDay::parse("00-10").is_err());
        assert!(MonthDay::parse("02-30").is_err());
        assert!(MonthDay::parse("04-31").is_err());
        assert!(MonthDay::parse("06-00").is_err());
        assert!(MonthDay::parse("1-1").is_err());
        assert!(MonthDay::parse("06/01").is_err());
        assert!(MonthDay::parse("junk").is_err());
        assert!(MonthDay::parse("").is_err());
    }

    #[test]
    fn test_on_year_composes_numerically() {
        assert_eq!(MonthDay::parse("06-01").unwrap().on_year(2025), date(2025, 6, 1));
    }

    #[test]
    fn test_on_year_clamps_feb_29() {
        let md = MonthDay::parse("02-29").unwrap();
        assert_eq!(md.on_year(2024), date(2024, 2, 29)); // leap year
        assert_eq!(md.on_year(2025), date(2025, 2, 28)); // clamped
    }

    // ==================== find_active_season tests ====================

    #[test]
    fn test_non_wrapping_season_inclusive_bounds() {
        let rates = [TestRange { name: "Haute saison", start: "06-01", end: "08-31" }];

        assert!(find_active_season(&rates, date(2025, 6, 1)).unwrap().is_some());
        assert!(find_active_season(&rates, date(2025, 7, 15)).unwrap().is_some());
        assert!(find_active_season(&rates, date(2025, 8, 31)).unwrap().is_some());
        assert!(find_active_season(&rates, date(2025, 5, 31)).unwrap().is_none());
        assert!(find_active_season(&rates, date(2025, 9, 1)).unwrap().is_none());
    }

    #[test]
    fn test_wrapping_season_matches_both_segments() {
        let rates = [TestRange { name: "Hiver", start: "12-01", end: "02-28" }];

        // Early-year segment
        assert!(find_active_season(&rates, date(2025, 1, 15)).unwrap().is_some());
        assert!(find_active_season(&rates, date(2025, 2, 28)).unwrap().is_some());
        // Late-year segment
        assert!(find_active_season(&rates, date(2025, 12, 1)).unwrap().is_some());
        assert!(find_active_season(&rates, date(2025, 12, 15)).unwrap().is_some());
        // Outside both
        assert!(find_active_season(&rates, date(2025, 6, 15)).unwrap().is_none());
        assert!(find_active_season(&rates, date(2025, 3, 1)).unwrap().is_none());
        assert!(find_active_season(&rates, date(2025, 11, 30)).unwrap().is_none());
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let rates = [
            TestRange { name: "Printemps", start: "03-01", end: "06-30" },
            TestRange { name: "Été", start: "06-01", end: "08-31" },
        ];

        let active = find_active_season(&rates, date(2025, 6, 15)).unwrap().unwrap();
        assert_eq!(active.season_name(), "Printemps");
    }

    #[test]
    fn test_empty_rate_list_yields_none() {
        let rates: [TestRange; 0] = [];
        assert!(find_active_season(&rates, date(2025, 6, 15)).unwrap().is_none());
    }

    #[test]
    fn test_malformed_pattern_propagates() {
        let rates = [TestRange { name: "Cassée", start: "2025-06-01", end: "08-31" }];
        assert!(find_active_season(&rates, date(2025, 6, 15)).is_err());
    }

    // ==================== season_window tests ====================

    #[test]
    fn test_window_non_wrapping() {
        let rate = TestRange { name: "Haute saison", start: "06-01", end: "08-31" };
        let window = season_window(&rate, date(2025, 7, 15)).unwrap();

        assert_eq!(window.valid_from, date(2025, 6, 1));
        assert_eq!(window.valid_to, date(2025, 8, 31));
    }

    #[test]
    fn test_window_wrapping_early_segment() {
        // Jan 15 belongs to the season that started the previous December
        let rate = TestRange { name: "Hiver", start: "12-01", end: "02-28" };
        let window = season_window(&rate, date(2025, 1, 15)).unwrap();

        assert_eq!(window.valid_from, date(2024, 12, 1));
        assert_eq!(window.valid_to, date(2025, 2, 28));
    }

    #[test]
    fn test_window_wrapping_late_segment() {
        let rate = TestRange { name: "Hiver", start: "12-01", end: "02-28" };
        let window = season_window(&rate, date(2025, 12, 15)).unwrap();

        assert_eq!(window.valid_from, date(2025, 12, 1));
        assert_eq!(window.valid_to, date(2026, 2, 28));
    }

    #[test]
    fn test_window_feb_29_end_clamps_in_non_leap_year() {
        let rate = TestRange { name: "Hiver", start: "12-01", end: "02-29" };

        let window = season_window(&rate, date(2025, 1, 15)).unwrap();
        assert_eq!(window.valid_to, date(2025, 2, 28));

        // Into a leap year the pattern lands on the real Feb 29
        let window = season_window(&rate, date(2023, 12, 15)).unwrap();
        assert_eq!(window.valid_to, date(2024, 2, 29));
    }
}
