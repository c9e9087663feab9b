//! Table formatting for reports.
//!
//! Generates Typst markup for the overview block, the three leaderboards,
//! the lag table, and the insufficient-data notes.

use crate::domain::analysis::{AnalysisResult, ExcludedCommodity};
use crate::domain::leaderboard::{
    rank_by_mean_lag, rank_by_spike_frequency, rank_by_volatility, rank_regions,
};
use crate::domain::metrics::{AnalysisParams, CommodityMetric, RegionMetric};

pub fn render_overview(result: &AnalysisResult, params: &AnalysisParams) -> String {
    let total_spike_months: usize = result.metrics.iter().map(|m| m.spike_months).sum();

    let mut out = String::from("#table(\n  columns: 2,\n");
    out.push_str(&format!(
        "  [*Commodities analyzed*], [{}],\n",
        result.metrics.len()
    ));
    out.push_str(&format!(
        "  [*Excluded (insufficient data)*], [{}],\n",
        result.excluded.len()
    ));
    out.push_str(&format!("  [*Regions covered*], [{}],\n", result.regions.len()));
    out.push_str(&format!("  [*Cyclone events*], [{}],\n", result.event_count));
    out.push_str(&format!(
        "  [*Spike months flagged*], [{}],\n",
        total_spike_months
    ));
    out.push_str(&format!(
        "  [*Spike threshold*], [median + {:.1} × IQR],\n",
        params.spike_multiplier
    ));
    out.push_str(&format!(
        "  [*Lag window*], [{} months],\n",
        params.lag_window_months
    ));
    out.push(')');
    out
}

pub fn render_spike_leaderboard(metrics: &[CommodityMetric], top_n: usize) -> String {
    let ranked = rank_by_spike_frequency(metrics);
    if ranked.is_empty() {
        return "No commodities to rank.".to_string();
    }

    let mut out = String::from("#table(\n  columns: 4,\n  align: (left, right, right, right),\n");
    out.push_str("  [*Commodity*], [*Spike Frequency*], [*Spike Months*], [*Months*],\n");
    for m in ranked.iter().take(top_n) {
        out.push_str(&format!(
            "  [{}], [{:.1}%], [{}], [{}],\n",
            m.commodity, m.spike_frequency_pct, m.spike_months, m.total_months
        ));
    }
    out.push(')');
    out
}

pub fn render_volatility_leaderboard(metrics: &[CommodityMetric], top_n: usize) -> String {
    let ranked = rank_by_volatility(metrics);
    if ranked.is_empty() {
        return "No commodities to rank.".to_string();
    }

    let mut out = String::from("#table(\n  columns: 3,\n  align: (left, right, right),\n");
    out.push_str("  [*Commodity*], [*Volatility (₱)*], [*Months*],\n");
    for m in ranked.iter().take(top_n) {
        out.push_str(&format!(
            "  [{}], [{:.2}], [{}],\n",
            m.commodity, m.volatility, m.total_months
        ));
    }
    out.push(')');
    out
}

pub fn render_region_leaderboard(regions: &[RegionMetric], top_n: usize) -> String {
    let ranked = rank_regions(regions);
    if ranked.is_empty() {
        return "No regional data available.".to_string();
    }

    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str("  [*Region*], [*Spike Observations*],\n");
    for r in ranked.iter().take(top_n) {
        out.push_str(&format!("  [{}], [{}],\n", r.region, r.spike_count));
    }
    out.push(')');
    out
}

/// Commodities by mean lag, quickest price reaction first.
pub fn render_lag_table(metrics: &[CommodityMetric], top_n: usize) -> String {
    let ranked = rank_by_mean_lag(metrics);
    if ranked.is_empty() {
        return "No cyclone was followed by a price spike inside the lag window.".to_string();
    }

    let mut out = String::from("#table(\n  columns: 3,\n  align: (left, right, right),\n");
    out.push_str("  [*Commodity*], [*Mean Lag (months)*], [*Matched Cyclones*],\n");
    for m in ranked.iter().take(top_n) {
        let lag = m.mean_lag_months.unwrap_or_default();
        out.push_str(&format!(
            "  [{}], [{:.2}], [{}],\n",
            m.commodity, lag, m.matched_events
        ));
    }
    out.push(')');
    out
}

pub fn render_excluded(excluded: &[ExcludedCommodity]) -> String {
    if excluded.is_empty() {
        return String::new();
    }

    let mut out = String::from("== Excluded Commodities\n\n");
    for e in excluded {
        out.push_str(&format!(
            "- {} — only {} monthly observations (minimum {})\n",
            e.commodity, e.observations, e.minimum
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisResult;

    fn metric(commodity: &str, freq: f64, vol: f64, lag: Option<f64>) -> CommodityMetric {
        CommodityMetric {
            commodity: commodity.into(),
            spike_frequency_pct: freq,
            volatility: vol,
            mean_lag_months: lag,
            spike_threshold: 50.0,
            spike_months: 2,
            total_months: 12,
            matched_events: usize::from(lag.is_some()) * 2,
        }
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            metrics: vec![
                metric("Tomato", 16.7, 12.3, Some(1.5)),
                metric("Cabbage", 8.3, 4.1, None),
            ],
            excluded: vec![ExcludedCommodity {
                commodity: "Garlic".into(),
                observations: 2,
                minimum: 4,
            }],
            regions: vec![RegionMetric {
                region: "Region VIII".into(),
                spike_count: 5,
            }],
            overlays: vec![],
            resilience: vec![],
            event_count: 3,
        }
    }

    #[test]
    fn overview_lists_counts() {
        let result = sample_result();
        let out = render_overview(&result, &AnalysisParams::default());
        assert!(out.contains("[*Commodities analyzed*], [2]"));
        assert!(out.contains("[*Excluded (insufficient data)*], [1]"));
        assert!(out.contains("[*Cyclone events*], [3]"));
        assert!(out.contains("median + 1.5 × IQR"));
        assert!(out.contains("[2 months]"));
    }

    #[test]
    fn spike_leaderboard_ranks_and_truncates() {
        let result = sample_result();
        let out = render_spike_leaderboard(&result.metrics, 1);
        assert!(out.contains("[Tomato], [16.7%], [2], [12]"));
        assert!(!out.contains("Cabbage"));
    }

    #[test]
    fn volatility_leaderboard_formats_pesos() {
        let result = sample_result();
        let out = render_volatility_leaderboard(&result.metrics, 10);
        assert!(out.contains("[Tomato], [12.30], [12]"));
        assert!(out.contains("[Cabbage], [4.10], [12]"));
    }

    #[test]
    fn region_leaderboard_lists_counts() {
        let result = sample_result();
        let out = render_region_leaderboard(&result.regions, 10);
        assert!(out.contains("[Region VIII], [5]"));
    }

    #[test]
    fn lag_table_omits_unmatched_commodities() {
        let result = sample_result();
        let out = render_lag_table(&result.metrics, 10);
        assert!(out.contains("[Tomato], [1.50], [2]"));
        assert!(!out.contains("Cabbage"));
    }

    #[test]
    fn lag_table_empty_message() {
        let metrics = vec![metric("Cabbage", 8.3, 4.1, None)];
        let out = render_lag_table(&metrics, 10);
        assert!(out.contains("No cyclone"));
    }

    #[test]
    fn excluded_notes_render_bullets() {
        let result = sample_result();
        let out = render_excluded(&result.excluded);
        assert!(out.contains("== Excluded Commodities"));
        assert!(out.contains("- Garlic — only 2 monthly observations (minimum 4)"));
    }

    #[test]
    fn excluded_notes_empty_when_nothing_excluded() {
        assert_eq!(render_excluded(&[]), "");
    }
}
