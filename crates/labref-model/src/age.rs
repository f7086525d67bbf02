//! Patient age arithmetic.
//!
//! Years and months come from calendar arithmetic with standard borrowing;
//! days, weeks, and hours come from the raw time difference. Sub-year ages
//! need linear time, not calendar math, so `full_days` and `age_years * 365`
//! can disagree slightly. Callers must read the single field matching the
//! segment's `age_min_unit` and never mix the two arithmetics.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::enums::AgeUnit;

/// Patient age expressed in every unit a segment may be keyed by.
///
/// Computed once per evaluation pass; derived data, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientAgeData {
    /// Completed calendar years.
    pub age_years: i64,
    /// Completed calendar months (`age_years * 12 + month_diff`).
    pub full_months: i64,
    /// Whole days elapsed, from the raw time difference.
    pub full_days: i64,
    /// Whole weeks elapsed, from the raw time difference.
    pub full_weeks: i64,
    /// Whole hours elapsed, from the raw time difference.
    pub full_hours: i64,
}

impl PatientAgeData {
    /// The age value to compare against segment bounds expressed in `unit`.
    pub fn value_in(&self, unit: AgeUnit) -> f64 {
        match unit {
            AgeUnit::Years => self.age_years as f64,
            AgeUnit::Months => self.full_months as f64,
            AgeUnit::Days => self.full_days as f64,
        }
    }
}

/// Compute a patient's age in every supported unit.
///
/// A `now` earlier than `birth_date` clamps every field to zero rather than
/// producing negative ages; report rendering must not fail on bad data.
pub fn calculate_age_in_units(birth_date: NaiveDateTime, now: NaiveDateTime) -> PatientAgeData {
    if now < birth_date {
        return PatientAgeData {
            age_years: 0,
            full_months: 0,
            full_days: 0,
            full_weeks: 0,
            full_hours: 0,
        };
    }

    let birth = birth_date.date();
    let today = now.date();

    let mut years = i64::from(today.year() - birth.year());
    let mut months = i64::from(today.month() as i32 - birth.month() as i32);
    let mut days = i64::from(today.day() as i32 - birth.day() as i32);

    if days < 0 {
        // Borrow a month: the borrowed days come from the month preceding `today`.
        days += i64::from(days_in_previous_month(today));
        months -= 1;
    }
    if months < 0 {
        months += 12;
        years -= 1;
    }

    let elapsed = now.signed_duration_since(birth_date);
    let full_hours = elapsed.num_hours();
    let full_days = elapsed.num_days();

    PatientAgeData {
        age_years: years,
        full_months: years * 12 + months,
        full_days,
        full_weeks: full_days / 7,
        full_hours,
    }
}

/// Number of days in the calendar month preceding `date`.
fn days_in_previous_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap_or(date);
    next.signed_duration_since(first).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn whole_years() {
        let age = calculate_age_in_units(dt(1990, 5, 1), dt(2025, 5, 1));
        assert_eq!(age.age_years, 35);
        assert_eq!(age.full_months, 35 * 12);
    }

    #[test]
    fn borrows_month_when_day_is_earlier() {
        // Born on the 20th, evaluated on the 10th: the current month has not
        // completed, so one month is borrowed.
        let age = calculate_age_in_units(dt(2000, 3, 20), dt(2024, 4, 10));
        assert_eq!(age.age_years, 24);
        assert_eq!(age.full_months, 24 * 12);
    }

    #[test]
    fn borrows_year_when_month_is_earlier() {
        let age = calculate_age_in_units(dt(2000, 10, 15), dt(2024, 3, 15));
        assert_eq!(age.age_years, 23);
        assert_eq!(age.full_months, 23 * 12 + 5);
    }

    #[test]
    fn newborn_sub_year_units() {
        let age = calculate_age_in_units(dt(2024, 1, 1), dt(2024, 1, 15));
        assert_eq!(age.age_years, 0);
        assert_eq!(age.full_months, 0);
        assert_eq!(age.full_days, 14);
        assert_eq!(age.full_weeks, 2);
        assert_eq!(age.full_hours, 14 * 24);
    }

    #[test]
    fn linear_and_calendar_days_may_disagree() {
        // 2024 is a leap year: one calendar year but 366 linear days.
        let age = calculate_age_in_units(dt(2024, 1, 1), dt(2025, 1, 1));
        assert_eq!(age.age_years, 1);
        assert_eq!(age.full_days, 366);
    }

    #[test]
    fn future_birth_date_clamps_to_zero() {
        let age = calculate_age_in_units(dt(2030, 1, 1), dt(2024, 1, 1));
        assert_eq!(age.age_years, 0);
        assert_eq!(age.full_days, 0);
    }

    #[test]
    fn borrow_across_january() {
        // Previous month relative to January is December of the prior year.
        let age = calculate_age_in_units(dt(2000, 12, 31), dt(2024, 1, 15));
        assert_eq!(age.age_years, 23);
        assert_eq!(age.full_months, 23 * 12);
    }
}
