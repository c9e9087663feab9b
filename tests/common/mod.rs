#![allow(dead_code)]

use agriprice::domain::error::AgriPriceError;
use agriprice::domain::event::CycloneEvent;
use agriprice::domain::metrics::AnalysisParams;
use agriprice::domain::observation::PriceObservation;
use agriprice::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub struct MockDataPort {
    pub observations: Vec<PriceObservation>,
    pub events: Vec<CycloneEvent>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            observations: Vec::new(),
            events: Vec::new(),
            error: None,
        }
    }

    pub fn with_observations(mut self, observations: Vec<PriceObservation>) -> Self {
        self.observations.extend(observations);
        self
    }

    pub fn with_events(mut self, events: Vec<CycloneEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }

    fn check_error(&self) -> Result<(), AgriPriceError> {
        if let Some(reason) = &self.error {
            return Err(AgriPriceError::DataLoad {
                file: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(&self) -> Result<Vec<PriceObservation>, AgriPriceError> {
        self.check_error()?;
        Ok(self.observations.clone())
    }

    fn fetch_cyclones(&self) -> Result<Vec<CycloneEvent>, AgriPriceError> {
        self.check_error()?;
        Ok(self.events.clone())
    }

    fn list_commodities(&self) -> Result<Vec<String>, AgriPriceError> {
        self.check_error()?;
        let names: BTreeSet<String> = self
            .observations
            .iter()
            .map(|o| o.commodity.clone())
            .collect();
        Ok(names.into_iter().collect())
    }
}

pub fn month(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

pub fn make_obs(commodity: &str, region: &str, y: i32, m: u32, price: f64) -> PriceObservation {
    PriceObservation {
        commodity: commodity.to_string(),
        region: region.to_string(),
        month: month(y, m),
        retail_price: price,
    }
}

pub fn make_event(id: u32, name: &str, date: &str) -> CycloneEvent {
    CycloneEvent {
        id,
        name: name.to_string(),
        par_entry: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category: "Typhoon".to_string(),
    }
}

/// Monthly national series for one commodity in one region over 2021.
pub fn monthly_prices(commodity: &str, prices: &[f64]) -> Vec<PriceObservation> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| make_obs(commodity, "Region I", 2021, i as u32 + 1, p))
        .collect()
}

pub fn default_params() -> AnalysisParams {
    AnalysisParams::default()
}
