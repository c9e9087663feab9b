//! Analysis orchestration.
//!
//! Ties the pipeline together: build monthly series, compute per-commodity
//! metrics (skipping thin series with a warning), aggregate region counts,
//! and derive both chart datasets.

use crate::domain::chart::{build_overlay, build_resilience, OverlaySeries, ResiliencePoint};
use crate::domain::error::AgriPriceError;
use crate::domain::event::CycloneEvent;
use crate::domain::metrics::{
    compute_region_metrics, AnalysisParams, CommodityMetric, RegionMetric,
};
use crate::domain::observation::PriceObservation;
use crate::domain::series::build_series;
use std::collections::HashMap;

/// A commodity left out of the rankings, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludedCommodity {
    pub commodity: String,
    pub observations: usize,
    pub minimum: usize,
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// One metric per analyzable commodity, ordered by commodity name.
    pub metrics: Vec<CommodityMetric>,
    pub excluded: Vec<ExcludedCommodity>,
    pub regions: Vec<RegionMetric>,
    pub overlays: Vec<OverlaySeries>,
    pub resilience: Vec<ResiliencePoint>,
    pub event_count: usize,
}

/// Run the full analysis over loaded observations and cyclone events.
///
/// `commodity_filter` restricts the run to a single commodity
/// (case-insensitive). Commodities with too few monthly observations are
/// excluded with a stderr warning; the run only fails when nothing survives.
pub fn run_analysis(
    observations: &[PriceObservation],
    events: &[CycloneEvent],
    params: &AnalysisParams,
    commodity_filter: Option<&str>,
) -> Result<AnalysisResult, AgriPriceError> {
    if observations.is_empty() {
        return Err(AgriPriceError::NoData {
            kind: "price".into(),
        });
    }

    let filtered: Vec<PriceObservation> = match commodity_filter {
        Some(name) => observations
            .iter()
            .filter(|o| o.commodity.eq_ignore_ascii_case(name))
            .cloned()
            .collect(),
        None => observations.to_vec(),
    };

    if filtered.is_empty() {
        return Err(AgriPriceError::NoData {
            kind: "price".into(),
        });
    }

    let series_list = build_series(&filtered);

    let mut metrics = Vec::with_capacity(series_list.len());
    let mut excluded = Vec::new();
    let mut overlays = Vec::new();

    for series in &series_list {
        match CommodityMetric::compute(series, events, params) {
            Ok(metric) => {
                overlays.push(build_overlay(series, events));
                metrics.push(metric);
            }
            Err(AgriPriceError::InsufficientData {
                commodity,
                observations,
                minimum,
            }) => {
                eprintln!(
                    "warning: excluding {} ({} monthly observations, minimum {})",
                    commodity, observations, minimum
                );
                excluded.push(ExcludedCommodity {
                    commodity,
                    observations,
                    minimum,
                });
            }
            Err(e) => return Err(e),
        }
    }

    if metrics.is_empty() {
        return Err(AgriPriceError::InsufficientData {
            commodity: "every commodity".into(),
            observations: 0,
            minimum: params.min_observations,
        });
    }

    let thresholds: HashMap<String, f64> = metrics
        .iter()
        .map(|m| (m.commodity.clone(), m.spike_threshold))
        .collect();
    let regions = compute_region_metrics(&filtered, &thresholds);
    let resilience = build_resilience(&metrics);

    Ok(AnalysisResult {
        metrics,
        excluded,
        regions,
        overlays,
        resilience,
        event_count: events.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(commodity: &str, region: &str, m: u32, price: f64) -> PriceObservation {
        PriceObservation {
            commodity: commodity.into(),
            region: region.into(),
            month: NaiveDate::from_ymd_opt(2021, m, 1).unwrap(),
            retail_price: price,
        }
    }

    fn event(id: u32, m: u32, d: u32) -> CycloneEvent {
        CycloneEvent {
            id,
            name: format!("TC-{id}"),
            par_entry: NaiveDate::from_ymd_opt(2021, m, d).unwrap(),
            category: "Typhoon".into(),
        }
    }

    fn spiky_observations(commodity: &str) -> Vec<PriceObservation> {
        vec![
            obs(commodity, "Region I", 1, 10.0),
            obs(commodity, "Region I", 2, 10.0),
            obs(commodity, "Region I", 3, 10.0),
            obs(commodity, "Region I", 4, 10.0),
            obs(commodity, "Region I", 5, 100.0),
        ]
    }

    #[test]
    fn analysis_produces_metrics_and_charts() {
        let observations = spiky_observations("Tomato");
        let events = vec![event(1, 4, 20)];
        let result =
            run_analysis(&observations, &events, &AnalysisParams::default(), None).unwrap();

        assert_eq!(result.metrics.len(), 1);
        assert_eq!(result.overlays.len(), 1);
        assert_eq!(result.resilience.len(), 1);
        assert_eq!(result.event_count, 1);
        assert_eq!(result.metrics[0].mean_lag_months, Some(1.0));
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.regions[0].spike_count, 1);
    }

    #[test]
    fn thin_commodities_are_excluded_not_fatal() {
        let mut observations = spiky_observations("Tomato");
        observations.push(obs("Garlic", "Region I", 1, 200.0));
        let result =
            run_analysis(&observations, &[], &AnalysisParams::default(), None).unwrap();

        assert_eq!(result.metrics.len(), 1);
        assert_eq!(
            result.excluded,
            vec![ExcludedCommodity {
                commodity: "Garlic".into(),
                observations: 1,
                minimum: 4,
            }]
        );
    }

    #[test]
    fn all_thin_commodities_is_an_error() {
        let observations = vec![obs("Garlic", "Region I", 1, 200.0)];
        let err =
            run_analysis(&observations, &[], &AnalysisParams::default(), None).unwrap_err();
        assert!(matches!(err, AgriPriceError::InsufficientData { .. }));
    }

    #[test]
    fn empty_observations_is_no_data() {
        let err = run_analysis(&[], &[], &AnalysisParams::default(), None).unwrap_err();
        assert!(matches!(err, AgriPriceError::NoData { .. }));
    }

    #[test]
    fn commodity_filter_is_case_insensitive() {
        let mut observations = spiky_observations("Tomato");
        observations.extend(spiky_observations("Onion"));
        let result = run_analysis(
            &observations,
            &[],
            &AnalysisParams::default(),
            Some("tomato"),
        )
        .unwrap();

        assert_eq!(result.metrics.len(), 1);
        assert_eq!(result.metrics[0].commodity, "Tomato");
    }

    #[test]
    fn unknown_commodity_filter_is_no_data() {
        let observations = spiky_observations("Tomato");
        let err = run_analysis(
            &observations,
            &[],
            &AnalysisParams::default(),
            Some("Durian"),
        )
        .unwrap_err();
        assert!(matches!(err, AgriPriceError::NoData { .. }));
    }

    #[test]
    fn metrics_are_ordered_by_commodity_name() {
        let mut observations = spiky_observations("Tomato");
        observations.extend(spiky_observations("Cabbage"));
        let result =
            run_analysis(&observations, &[], &AnalysisParams::default(), None).unwrap();

        let names: Vec<&str> = result.metrics.iter().map(|m| m.commodity.as_str()).collect();
        assert_eq!(names, vec!["Cabbage", "Tomato"]);
    }
}
