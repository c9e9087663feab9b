//! Chart-ready derived datasets.
//!
//! Two views for external visualization layers: per-commodity price series
//! with cyclone markers for overlay plotting, and per-commodity
//! (mean lag, volatility) pairs for resilience scatter plots.

use crate::domain::event::CycloneEvent;
use crate::domain::metrics::CommodityMetric;
use crate::domain::series::CommoditySeries;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub month: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventMarker {
    pub date: NaiveDate,
    pub name: String,
    pub category: String,
}

/// A commodity's monthly national-average series joined with the cyclones
/// that entered PAR inside the series' month range.
#[derive(Debug, Clone, Serialize)]
pub struct OverlaySeries {
    pub commodity: String,
    pub points: Vec<OverlayPoint>,
    pub markers: Vec<EventMarker>,
}

pub fn build_overlay(series: &CommoditySeries, events: &[CycloneEvent]) -> OverlaySeries {
    let markers = match (series.first_month(), series.last_month()) {
        (Some(first), Some(last)) => events
            .iter()
            .filter(|e| {
                let entry = e.entry_month();
                entry >= first && entry <= last
            })
            .map(|e| EventMarker {
                date: e.par_entry,
                name: e.name.clone(),
                category: e.category.clone(),
            })
            .collect(),
        _ => Vec::new(),
    };

    OverlaySeries {
        commodity: series.commodity.clone(),
        points: series
            .points
            .iter()
            .map(|p| OverlayPoint {
                month: p.month,
                price: p.price,
            })
            .collect(),
        markers,
    }
}

/// One scatter coordinate per commodity; spike frequency rides along for
/// bubble sizing.
#[derive(Debug, Clone, Serialize)]
pub struct ResiliencePoint {
    pub commodity: String,
    pub mean_lag_months: f64,
    pub volatility: f64,
    pub spike_frequency_pct: f64,
}

/// Scatter points for every commodity with a computed mean lag.
pub fn build_resilience(metrics: &[CommodityMetric]) -> Vec<ResiliencePoint> {
    metrics
        .iter()
        .filter_map(|m| {
            m.mean_lag_months.map(|lag| ResiliencePoint {
                commodity: m.commodity.clone(),
                mean_lag_months: lag,
                volatility: m.volatility,
                spike_frequency_pct: m.spike_frequency_pct,
            })
        })
        .collect()
}
