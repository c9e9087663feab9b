//! Price observation records and month arithmetic.

use chrono::{Datelike, NaiveDate};

/// One retail price reading for a (commodity, region, month) triple.
#[derive(Debug, Clone)]
pub struct PriceObservation {
    pub commodity: String,
    pub region: String,
    /// First day of the observation month.
    pub month: NaiveDate,
    pub retail_price: f64,
}

/// Truncate a date to the first of its month.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("day 1 is valid for every month")
}

/// Whole calendar months from `from` to `to`. Negative when `to` precedes
/// `from`. Day-of-month is ignored.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_floor_truncates() {
        assert_eq!(month_floor(date(2021, 7, 23)), date(2021, 7, 1));
        assert_eq!(month_floor(date(2021, 7, 1)), date(2021, 7, 1));
    }

    #[test]
    fn months_between_same_month() {
        assert_eq!(months_between(date(2021, 3, 1), date(2021, 3, 28)), 0);
    }

    #[test]
    fn months_between_forward() {
        assert_eq!(months_between(date(2021, 11, 1), date(2022, 1, 1)), 2);
    }

    #[test]
    fn months_between_backward_is_negative() {
        assert_eq!(months_between(date(2022, 1, 1), date(2021, 11, 1)), -2);
    }

    #[test]
    fn months_between_ignores_day() {
        // Dec 30 to Jan 2 is one calendar month apart.
        assert_eq!(months_between(date(2021, 12, 30), date(2022, 1, 2)), 1);
    }
}
