//! Spike detection over monthly series.
//!
//! A month is a spike when its national price exceeds
//! `median + multiplier * IQR` of the commodity's full monthly series.

use crate::domain::error::AgriPriceError;
use crate::domain::series::CommoditySeries;
use crate::domain::stats::{iqr, median};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct SpikeProfile {
    pub threshold: f64,
    /// Months flagged as spikes, ascending.
    pub spike_months: Vec<NaiveDate>,
    pub total_months: usize,
}

impl SpikeProfile {
    /// Share of months flagged, in percent.
    pub fn frequency_pct(&self) -> f64 {
        if self.total_months == 0 {
            return 0.0;
        }
        self.spike_months.len() as f64 / self.total_months as f64 * 100.0
    }
}

/// `median + multiplier * IQR` over the given prices.
pub fn spike_threshold(prices: &[f64], multiplier: f64) -> f64 {
    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);
    median(&sorted) + multiplier * iqr(&sorted)
}

/// Flag spike months for a series. The IQR is only meaningful with at least
/// `min_observations` months; shorter series fail with `InsufficientData`.
pub fn detect_spikes(
    series: &CommoditySeries,
    multiplier: f64,
    min_observations: usize,
) -> Result<SpikeProfile, AgriPriceError> {
    if series.len() < min_observations {
        return Err(AgriPriceError::InsufficientData {
            commodity: series.commodity.clone(),
            observations: series.len(),
            minimum: min_observations,
        });
    }

    let threshold = spike_threshold(&series.prices(), multiplier);
    let spike_months = series
        .points
        .iter()
        .filter(|p| p.price > threshold)
        .map(|p| p.month)
        .collect();

    Ok(SpikeProfile {
        threshold,
        spike_months,
        total_months: series.len(),
    })
}
