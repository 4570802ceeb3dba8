//! Quarter calendar - the shared date rules for deposit compliance.
//!
//! Centralizes quarter boundaries, the lookback window, and the semi-weekly
//! deposit due-date rule so every calculator draws on the same arithmetic.
//! All functions are pure; nothing here touches persistence.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::errors::{Error, Result};

/// Returns the first and last day of a calendar quarter.
///
/// The end date is computed as the day before the following quarter starts,
/// so month lengths (and leap years) come from the date library rather than
/// a table.
pub fn quarter_bounds(year: i32, quarter: i32) -> Result<(NaiveDate, NaiveDate)> {
    if !(1..=4).contains(&quarter) {
        return Err(Error::InvalidQuarter { quarter });
    }

    // quarter is 1-4, so the cast and the start month are always valid
    #[allow(clippy::cast_sign_loss)]
    let start_month = (quarter as u32 - 1) * 3 + 1;
    let start = ymd(year, start_month, 1)?;

    let (next_year, next_month) = if start_month + 3 > 12 {
        (year + 1, 1)
    } else {
        (year, start_month + 3)
    };
    let end = ymd(next_year, next_month, 1)? - Duration::days(1);

    Ok((start, end))
}

/// Returns the lookback window for a deposit year: July 1 of the prior year
/// through June 30 of the lookback year.
///
/// The window crosses a calendar-year boundary, which is why it cannot be
/// expressed through [`quarter_bounds`] alone.
pub fn lookback_window(lookback_year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = ymd(lookback_year - 1, 7, 1)?;
    let end = ymd(lookback_year, 6, 30)?;
    Ok((start, end))
}

/// Returns the semi-weekly deposit due date for a payroll date.
///
/// Wednesday, Thursday, and Friday payrolls are due the following Wednesday;
/// Saturday through Tuesday payrolls are due the following Friday. The due
/// date is the next occurrence of the target weekday *strictly after* the
/// payroll date - a payroll already on the target weekday advances a full
/// week.
#[must_use]
pub fn semi_weekly_due_date(payroll_date: NaiveDate) -> NaiveDate {
    let target = match payroll_date.weekday() {
        Weekday::Wed | Weekday::Thu | Weekday::Fri => Weekday::Wed,
        _ => Weekday::Fri,
    };
    next_weekday_after(payroll_date, target)
}

/// Maps a calendar month onto its 1-3 position within a quarter, or `None`
/// when the month falls outside the quarter.
#[must_use]
pub fn month_of_quarter(quarter: i32, month: u32) -> Option<u32> {
    if !(1..=4).contains(&quarter) || !(1..=12).contains(&month) {
        return None;
    }

    #[allow(clippy::cast_sign_loss)]
    let start_month = (quarter as u32 - 1) * 3 + 1;
    if (start_month..start_month + 3).contains(&month) {
        Some(month - start_month + 1)
    } else {
        None
    }
}

/// The next occurrence of `target` strictly after `date`. Always 1-7 days
/// ahead, never the date itself.
fn next_weekday_after(date: NaiveDate, target: Weekday) -> NaiveDate {
    let current = i64::from(date.weekday().num_days_from_monday());
    let wanted = i64::from(target.num_days_from_monday());
    let mut days_ahead = (wanted - current).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }
    date + Duration::days(days_ahead)
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::Config {
        message: format!("Invalid calendar date {year}-{month:02}-{day:02}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_quarter_bounds_all_quarters() -> Result<()> {
        assert_eq!(quarter_bounds(2025, 1)?, (d(2025, 1, 1), d(2025, 3, 31)));
        assert_eq!(quarter_bounds(2025, 2)?, (d(2025, 4, 1), d(2025, 6, 30)));
        assert_eq!(quarter_bounds(2025, 3)?, (d(2025, 7, 1), d(2025, 9, 30)));
        assert_eq!(quarter_bounds(2025, 4)?, (d(2025, 10, 1), d(2025, 12, 31)));
        Ok(())
    }

    #[test]
    fn test_quarter_bounds_leap_year() -> Result<()> {
        // Q1 of a leap year still spans the full quarter; the end-of-month
        // arithmetic comes from chrono, not a hardcoded table
        let (start, end) = quarter_bounds(2024, 1)?;
        assert_eq!(start, d(2024, 1, 1));
        assert_eq!(end, d(2024, 3, 31));
        assert_eq!((end - start).num_days() + 1, 91); // 31 + 29 + 31
        Ok(())
    }

    #[test]
    fn test_quarter_bounds_rejects_bad_quarter() {
        assert!(quarter_bounds(2025, 0).is_err());
        assert!(quarter_bounds(2025, 5).is_err());
        assert!(quarter_bounds(2025, -1).is_err());
    }

    #[test]
    fn test_lookback_window_crosses_years() -> Result<()> {
        let (start, end) = lookback_window(2025)?;
        assert_eq!(start, d(2024, 7, 1));
        assert_eq!(end, d(2025, 6, 30));
        Ok(())
    }

    #[test]
    fn test_semi_weekly_due_date_known_week() {
        // 2025-01-06 is a Monday
        assert_eq!(semi_weekly_due_date(d(2025, 1, 6)), d(2025, 1, 10)); // Mon -> Fri
        assert_eq!(semi_weekly_due_date(d(2025, 1, 7)), d(2025, 1, 10)); // Tue -> Fri
        assert_eq!(semi_weekly_due_date(d(2025, 1, 8)), d(2025, 1, 15)); // Wed -> next Wed
        assert_eq!(semi_weekly_due_date(d(2025, 1, 9)), d(2025, 1, 15)); // Thu -> Wed
        assert_eq!(semi_weekly_due_date(d(2025, 1, 10)), d(2025, 1, 15)); // Fri -> Wed
        assert_eq!(semi_weekly_due_date(d(2025, 1, 11)), d(2025, 1, 17)); // Sat -> Fri
        assert_eq!(semi_weekly_due_date(d(2025, 1, 12)), d(2025, 1, 17)); // Sun -> Fri
    }

    #[test]
    fn test_semi_weekly_due_date_never_same_day() {
        // A Wednesday payroll is due the *following* Wednesday, 7 days out
        let wednesday = d(2025, 1, 8);
        assert_eq!((semi_weekly_due_date(wednesday) - wednesday).num_days(), 7);

        // A Friday payroll is not due the same Friday either
        let friday = d(2025, 1, 10);
        assert!(semi_weekly_due_date(friday) > friday);
    }

    #[test]
    fn test_semi_weekly_due_date_weekday_property() {
        // Sweep two months of payroll dates: the due date always lands on
        // the expected weekday, strictly after the payroll date, within 7
        // days
        let mut date = d(2025, 3, 1);
        for _ in 0..60 {
            let due = semi_weekly_due_date(date);
            let expected = match date.weekday() {
                Weekday::Wed | Weekday::Thu | Weekday::Fri => Weekday::Wed,
                _ => Weekday::Fri,
            };
            assert_eq!(due.weekday(), expected, "payroll date {date}");
            assert!(due > date, "due date must be strictly after {date}");
            assert!((due - date).num_days() <= 7, "gap too wide for {date}");
            date += Duration::days(1);
        }
    }

    #[test]
    fn test_month_of_quarter() {
        assert_eq!(month_of_quarter(1, 1), Some(1));
        assert_eq!(month_of_quarter(1, 3), Some(3));
        assert_eq!(month_of_quarter(3, 8), Some(2));
        assert_eq!(month_of_quarter(4, 12), Some(3));
        assert_eq!(month_of_quarter(2, 7), None);
        assert_eq!(month_of_quarter(5, 1), None);
        assert_eq!(month_of_quarter(1, 13), None);
    }
}
