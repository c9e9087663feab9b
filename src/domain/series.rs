//! Per-commodity national monthly price series.
//!
//! Observations are grouped by commodity and month; the national price for a
//! month is the mean of every observation of that commodity in that month
//! across regions. Duplicate rows for the same (commodity, region, month)
//! fold into the same average.

use crate::domain::observation::PriceObservation;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub price: f64,
}

/// A commodity's national monthly series, ascending by month.
#[derive(Debug, Clone)]
pub struct CommoditySeries {
    pub commodity: String,
    pub points: Vec<MonthlyPoint>,
}

impl CommoditySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn first_month(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.month)
    }

    pub fn last_month(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.month)
    }
}

/// Build one series per commodity from raw observations. Output is ordered
/// by commodity name, points by month.
pub fn build_series(observations: &[PriceObservation]) -> Vec<CommoditySeries> {
    let mut grouped: BTreeMap<&str, BTreeMap<NaiveDate, (f64, usize)>> = BTreeMap::new();

    for obs in observations {
        let entry = grouped
            .entry(obs.commodity.as_str())
            .or_default()
            .entry(obs.month)
            .or_insert((0.0, 0));
        entry.0 += obs.retail_price;
        entry.1 += 1;
    }

    grouped
        .into_iter()
        .map(|(commodity, months)| CommoditySeries {
            commodity: commodity.to_string(),
            points: months
                .into_iter()
                .map(|(month, (sum, count))| MonthlyPoint {
                    month,
                    price: sum / count as f64,
                })
                .collect(),
        })
        .collect()
}
