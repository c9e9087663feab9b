//! Cyclone-to-spike lag measurement.
//!
//! A cyclone is matched to the first spike month at or after its PAR-entry
//! month, no more than `window_months` later. Unmatched cyclones contribute
//! no sample; they are excluded, never counted as zero lag.

use crate::domain::event::CycloneEvent;
use crate::domain::observation::months_between;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct LagSample {
    pub event_id: u32,
    pub lag_months: i32,
}

/// Match one cyclone against a commodity's spike months (ascending).
pub fn match_event(
    event: &CycloneEvent,
    spike_months: &[NaiveDate],
    window_months: i32,
) -> Option<LagSample> {
    let entry = event.entry_month();
    spike_months
        .iter()
        .map(|&m| months_between(entry, m))
        .find(|&lag| lag >= 0 && lag <= window_months)
        .map(|lag| LagSample {
            event_id: event.id,
            lag_months: lag,
        })
}

/// Lag samples for every matched cyclone. Matching is independent per event:
/// two cyclones may resolve to the same spike month.
pub fn collect_lags(
    events: &[CycloneEvent],
    spike_months: &[NaiveDate],
    window_months: i32,
) -> Vec<LagSample> {
    events
        .iter()
        .filter_map(|e| match_event(e, spike_months, window_months))
        .collect()
}

pub fn mean_lag(samples: &[LagSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: i32 = samples.iter().map(|s| s.lag_months).sum();
    Some(f64::from(total) / samples.len() as f64)
}
