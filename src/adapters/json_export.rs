//! Chart dataset export.
//!
//! Writes the two chart-ready datasets as JSON for external visualization
//! layers: `overlay.json` (per-commodity price series with cyclone markers)
//! and `resilience.json` (lag/volatility scatter points).

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::AgriPriceError;
use serde::Serialize;
use std::fs;
use std::path::Path;

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AgriPriceError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write both chart datasets into `dir`, creating it if needed.
pub fn write_chart_datasets(dir: &Path, result: &AnalysisResult) -> Result<(), AgriPriceError> {
    fs::create_dir_all(dir)?;
    write_json(&dir.join("overlay.json"), &result.overlays)?;
    write_json(&dir.join("resilience.json"), &result.resilience)?;
    Ok(())
}
