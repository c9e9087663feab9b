//! CSV file data adapter.
//!
//! The source spreadsheets are inconsistent about header spelling, so
//! headers are normalized (trimmed, spaces to underscores, lowercased)
//! before lookup. Rows that cannot be joined to a commodity and region, or
//! whose date or price fails to parse, are skipped with a warning; a
//! missing or malformed file is fatal.

use crate::domain::error::AgriPriceError;
use crate::domain::event::CycloneEvent;
use crate::domain::observation::{month_floor, PriceObservation};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CsvAdapter {
    price_files: Vec<PathBuf>,
    cyclone_file: PathBuf,
}

impl CsvAdapter {
    pub fn new(price_files: Vec<PathBuf>, cyclone_file: PathBuf) -> Self {
        Self {
            price_files,
            cyclone_file,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AgriPriceError> {
        let files_str =
            config
                .get_string("data", "price_files")
                .ok_or_else(|| AgriPriceError::ConfigMissing {
                    section: "data".into(),
                    key: "price_files".into(),
                })?;
        let price_files: Vec<PathBuf> = files_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
        if price_files.is_empty() {
            return Err(AgriPriceError::ConfigMissing {
                section: "data".into(),
                key: "price_files".into(),
            });
        }

        let cyclone_file =
            config
                .get_string("data", "cyclone_file")
                .ok_or_else(|| AgriPriceError::ConfigMissing {
                    section: "data".into(),
                    key: "cyclone_file".into(),
                })?;

        Ok(Self::new(price_files, PathBuf::from(cyclone_file.trim())))
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().replace(' ', "_").to_lowercase()
}

/// Prefer an exact header name, fall back to the first header containing any
/// of the given fragments.
fn locate_column(headers: &[String], exact: &str, fragments: &[&str]) -> Option<usize> {
    if let Some(i) = headers.iter().position(|h| h == exact) {
        return Some(i);
    }
    headers
        .iter()
        .position(|h| fragments.iter().any(|f| h.contains(f)))
}

fn data_err(path: &Path, reason: impl Into<String>) -> AgriPriceError {
    AgriPriceError::DataLoad {
        file: path.display().to_string(),
        reason: reason.into(),
    }
}

enum DateColumns {
    Single(usize),
    YearMonth(usize, usize),
}

fn parse_month(record: &csv::StringRecord, columns: &DateColumns) -> Option<NaiveDate> {
    match *columns {
        DateColumns::Single(i) => {
            let raw = record.get(i)?.trim();
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
            Some(month_floor(date))
        }
        DateColumns::YearMonth(y, m) => {
            let year: i32 = record.get(y)?.trim().parse().ok()?;
            let month: u32 = record.get(m)?.trim().parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
    }
}

fn load_price_file(path: &Path, out: &mut Vec<PriceObservation>) -> Result<(), AgriPriceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| data_err(path, e.to_string()))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| data_err(path, e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();

    let commodity_col = locate_column(&headers, "commodity_name", &["commodity", "product"])
        .ok_or_else(|| data_err(path, "no commodity column found"))?;
    let region_col = locate_column(&headers, "region", &["region"])
        .ok_or_else(|| data_err(path, "no region column found"))?;
    let price_col = locate_column(&headers, "retail_price", &["price"])
        .ok_or_else(|| data_err(path, "no price column found"))?;

    let date_cols = if let Some(i) = headers.iter().position(|h| h == "date") {
        DateColumns::Single(i)
    } else {
        let year = headers.iter().position(|h| h == "year");
        let month = headers.iter().position(|h| h == "month");
        match (year, month) {
            (Some(y), Some(m)) => DateColumns::YearMonth(y, m),
            _ => return Err(data_err(path, "no date or year/month columns found")),
        }
    };

    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let commodity = record.get(commodity_col).unwrap_or("").trim();
        let region = record.get(region_col).unwrap_or("").trim();
        if commodity.is_empty() || region.is_empty() {
            eprintln!(
                "warning: {}:{}: row has no commodity/region, skipped",
                path.display(),
                line
            );
            skipped += 1;
            continue;
        }

        let Some(month) = parse_month(&record, &date_cols) else {
            eprintln!(
                "warning: {}:{}: unparsable date, row skipped",
                path.display(),
                line
            );
            skipped += 1;
            continue;
        };

        let price: f64 = match record.get(price_col).unwrap_or("").trim().parse() {
            Ok(p) if f64::is_finite(p) => p,
            _ => {
                eprintln!(
                    "warning: {}:{}: unparsable price, row skipped",
                    path.display(),
                    line
                );
                skipped += 1;
                continue;
            }
        };

        out.push(PriceObservation {
            commodity: commodity.to_string(),
            region: region.to_string(),
            month,
            retail_price: price,
        });
        loaded += 1;
    }

    eprintln!(
        "  {}: {} observations ({} rows skipped)",
        path.display(),
        loaded,
        skipped
    );
    Ok(())
}

impl DataPort for CsvAdapter {
    fn fetch_prices(&self) -> Result<Vec<PriceObservation>, AgriPriceError> {
        let mut observations = Vec::new();
        for path in &self.price_files {
            load_price_file(path, &mut observations)?;
        }
        observations.sort_by(|a, b| {
            (&a.commodity, a.month, &a.region).cmp(&(&b.commodity, b.month, &b.region))
        });
        Ok(observations)
    }

    fn fetch_cyclones(&self) -> Result<Vec<CycloneEvent>, AgriPriceError> {
        let path = self.cyclone_file.as_path();
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| data_err(path, e.to_string()))?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| data_err(path, e.to_string()))?
            .iter()
            .map(normalize_header)
            .collect();

        let name_col = locate_column(&headers, "typhoon_name", &["typhoon", "name"])
            .ok_or_else(|| data_err(path, "no typhoon name column found"))?;
        let date_col = locate_column(&headers, "date_entered_par", &["par", "date"])
            .ok_or_else(|| data_err(path, "no PAR-entry date column found"))?;
        let category_col = locate_column(&headers, "classification", &["class", "intensity"]);

        let mut events = Vec::new();
        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(_) => continue,
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let name = record.get(name_col).unwrap_or("").trim();
            if name.is_empty() {
                eprintln!(
                    "warning: {}:{}: cyclone row has no name, skipped",
                    path.display(),
                    line
                );
                continue;
            }

            let raw_date = record.get(date_col).unwrap_or("").trim();
            let Ok(par_entry) = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") else {
                eprintln!(
                    "warning: {}:{}: unparsable PAR-entry date for {}, skipped",
                    path.display(),
                    line,
                    name
                );
                continue;
            };

            let category = category_col
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string();

            events.push(CycloneEvent {
                id: 0,
                name: name.to_string(),
                par_entry,
                category,
            });
        }

        // Chronological ids.
        events.sort_by_key(|e| e.par_entry);
        for (i, event) in events.iter_mut().enumerate() {
            event.id = i as u32 + 1;
        }
        Ok(events)
    }

    fn list_commodities(&self) -> Result<Vec<String>, AgriPriceError> {
        let observations = self.fetch_prices()?;
        let names: BTreeSet<String> = observations.into_iter().map(|o| o.commodity).collect();
        Ok(names.into_iter().collect())
    }
}
