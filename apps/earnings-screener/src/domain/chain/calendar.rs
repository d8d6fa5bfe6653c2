//! Monthly expiration calendar.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Third Friday of the month.
#[must_use]
pub fn is_third_friday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri && (15..=21).contains(&date.day())
}

/// Whether `date` is the standard monthly expiration.
///
/// The Thursday before the third Friday counts when the Friday is missing
/// from a listing that extends past it, which is how an exchange holiday
/// shows up in a chain. A listing that stops at the Thursday says nothing
/// about the Friday.
#[must_use]
pub fn is_monthly_expiration<T>(date: NaiveDate, listed: &BTreeMap<NaiveDate, T>) -> bool {
    if is_third_friday(date) {
        return true;
    }
    let friday = date + Duration::days(1);
    date.weekday() == Weekday::Thu
        && is_third_friday(friday)
        && !listed.contains_key(&friday)
        && listed.range(friday..).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn listed(dates: &[NaiveDate]) -> BTreeMap<NaiveDate, ()> {
        dates.iter().map(|d| (*d, ())).collect()
    }

    #[test_case(date(2026, 11, 20), true ; "third friday")]
    #[test_case(date(2026, 11, 13), false ; "second friday")]
    #[test_case(date(2026, 11, 27), false ; "fourth friday")]
    #[test_case(date(2026, 11, 19), false ; "thursday before listed friday")]
    fn monthly_with_friday_listed(d: NaiveDate, expected: bool) {
        let listed = listed(&[date(2026, 11, 19), date(2026, 11, 20)]);
        assert_eq!(is_monthly_expiration(d, &listed), expected);
    }

    #[test]
    fn holiday_thursday_is_monthly() {
        // Good Friday 2025 fell on the third Friday of April.
        let listed = listed(&[date(2025, 4, 17), date(2025, 5, 16)]);
        assert!(is_monthly_expiration(date(2025, 4, 17), &listed));
    }

    #[test]
    fn thursday_at_end_of_listing_is_not_monthly() {
        let listed = listed(&[date(2026, 10, 23), date(2026, 11, 19)]);
        assert!(!is_monthly_expiration(date(2026, 11, 19), &listed));
    }
}
