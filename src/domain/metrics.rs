//! Vulnerability metrics per commodity and region.

use crate::domain::error::AgriPriceError;
use crate::domain::event::CycloneEvent;
use crate::domain::lag::{collect_lags, mean_lag};
use crate::domain::observation::PriceObservation;
use crate::domain::series::CommoditySeries;
use crate::domain::spike::detect_spikes;
use crate::domain::stats::sample_stddev;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Tunable analysis parameters, loaded from the `[analysis]` config section.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub spike_multiplier: f64,
    pub lag_window_months: i32,
    pub min_observations: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            spike_multiplier: 1.5,
            lag_window_months: 2,
            min_observations: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommodityMetric {
    pub commodity: String,
    pub spike_frequency_pct: f64,
    pub volatility: f64,
    /// None when no cyclone matched a spike within the window.
    pub mean_lag_months: Option<f64>,
    pub spike_threshold: f64,
    pub spike_months: usize,
    pub total_months: usize,
    pub matched_events: usize,
}

impl CommodityMetric {
    /// Compute all three metrics for one commodity series.
    pub fn compute(
        series: &CommoditySeries,
        events: &[CycloneEvent],
        params: &AnalysisParams,
    ) -> Result<Self, AgriPriceError> {
        let profile = detect_spikes(series, params.spike_multiplier, params.min_observations)?;
        let samples = collect_lags(events, &profile.spike_months, params.lag_window_months);

        Ok(CommodityMetric {
            commodity: series.commodity.clone(),
            spike_frequency_pct: profile.frequency_pct(),
            volatility: sample_stddev(&series.prices()),
            mean_lag_months: mean_lag(&samples),
            spike_threshold: profile.threshold,
            spike_months: profile.spike_months.len(),
            total_months: profile.total_months,
            matched_events: samples.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionMetric {
    pub region: String,
    pub spike_count: usize,
}

/// Count spike observations per region: an observation is a spike when its
/// price exceeds its commodity's series threshold. Observations for
/// commodities without a threshold (excluded for insufficient data) are not
/// classified. Output is ordered by region name.
pub fn compute_region_metrics(
    observations: &[PriceObservation],
    thresholds: &HashMap<String, f64>,
) -> Vec<RegionMetric> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for obs in observations {
        let Some(&threshold) = thresholds.get(&obs.commodity) else {
            continue;
        };
        let entry = counts.entry(obs.region.as_str()).or_insert(0);
        if obs.retail_price > threshold {
            *entry += 1;
        }
    }

    counts
        .into_iter()
        .map(|(region, spike_count)| RegionMetric {
            region: region.to_string(),
            spike_count,
        })
        .collect()
}
