//! Ranked summary tables.
//!
//! All rankings sort descending by metric with ties broken by name
//! ascending, so identical inputs always produce identical output.

use crate::domain::metrics::{CommodityMetric, RegionMetric};
use std::cmp::Ordering;

fn by_metric_desc(a: f64, b: f64, name_a: &str, name_b: &str) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| name_a.cmp(name_b))
}

/// Commodities by spike frequency, most spike-prone first.
pub fn rank_by_spike_frequency(metrics: &[CommodityMetric]) -> Vec<CommodityMetric> {
    let mut ranked = metrics.to_vec();
    ranked.sort_by(|a, b| {
        by_metric_desc(
            a.spike_frequency_pct,
            b.spike_frequency_pct,
            &a.commodity,
            &b.commodity,
        )
    });
    ranked
}

/// Commodities by volatility, most volatile first.
pub fn rank_by_volatility(metrics: &[CommodityMetric]) -> Vec<CommodityMetric> {
    let mut ranked = metrics.to_vec();
    ranked.sort_by(|a, b| by_metric_desc(a.volatility, b.volatility, &a.commodity, &b.commodity));
    ranked
}

/// Commodities by mean lag, fastest-reacting first. Commodities with no
/// matched cyclone are omitted.
pub fn rank_by_mean_lag(metrics: &[CommodityMetric]) -> Vec<CommodityMetric> {
    let mut ranked: Vec<CommodityMetric> = metrics
        .iter()
        .filter(|m| m.mean_lag_months.is_some())
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        let la = a.mean_lag_months.unwrap_or(f64::MAX);
        let lb = b.mean_lag_months.unwrap_or(f64::MAX);
        la.partial_cmp(&lb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.commodity.cmp(&b.commodity))
    });
    ranked
}

/// Regions by spike count, highest-risk first.
pub fn rank_regions(regions: &[RegionMetric]) -> Vec<RegionMetric> {
    let mut ranked = regions.to_vec();
    ranked.sort_by(|a, b| {
        b.spike_count
            .cmp(&a.spike_count)
            .then_with(|| a.region.cmp(&b.region))
    });
    ranked
}
