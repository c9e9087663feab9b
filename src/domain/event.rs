//! Cyclone event records.

use crate::domain::observation::month_floor;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct CycloneEvent {
    pub id: u32,
    pub name: String,
    pub par_entry: NaiveDate,
    pub category: String,
}

impl CycloneEvent {
    /// PAR-entry date truncated to the first of its month.
    pub fn entry_month(&self) -> NaiveDate {
        month_floor(self.par_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> CycloneEvent {
        CycloneEvent {
            id: 1,
            name: "Odette".into(),
            par_entry: NaiveDate::from_ymd_opt(2021, 12, 14).unwrap(),
            category: "Typhoon".into(),
        }
    }

    #[test]
    fn entry_month_truncates_to_first() {
        let event = sample_event();
        assert_eq!(
            event.entry_month(),
            NaiveDate::from_ymd_opt(2021, 12, 1).unwrap()
        );
    }

    #[test]
    fn entry_month_is_identity_on_first() {
        let mut event = sample_event();
        event.par_entry = NaiveDate::from_ymd_opt(2022, 4, 1).unwrap();
        assert_eq!(event.entry_month(), event.par_entry);
    }
}
