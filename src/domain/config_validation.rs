//! Configuration validation.
//!
//! Validates all config fields before an analysis runs.

use crate::domain::error::AgriPriceError;
use crate::ports::config_port::ConfigPort;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    validate_price_files(config)?;
    validate_cyclone_file(config)?;
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    validate_spike_multiplier(config)?;
    validate_lag_window(config)?;
    validate_min_observations(config)?;
    validate_top_n(config)?;
    Ok(())
}

fn validate_price_files(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    match config.get_string("data", "price_files") {
        Some(s) if s.split(',').any(|p| !p.trim().is_empty()) => Ok(()),
        _ => Err(AgriPriceError::ConfigMissing {
            section: "data".to_string(),
            key: "price_files".to_string(),
        }),
    }
}

fn validate_cyclone_file(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    match config.get_string("data", "cyclone_file") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(AgriPriceError::ConfigMissing {
            section: "data".to_string(),
            key: "cyclone_file".to_string(),
        }),
    }
}

fn validate_spike_multiplier(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    let value = config.get_double("analysis", "spike_iqr_multiplier", 1.5);
    if value <= 0.0 {
        return Err(AgriPriceError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "spike_iqr_multiplier".to_string(),
            reason: "spike_iqr_multiplier must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_lag_window(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    let value = config.get_int("analysis", "lag_window_months", 2);
    if value < 0 {
        return Err(AgriPriceError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "lag_window_months".to_string(),
            reason: "lag_window_months must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_min_observations(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    // Quartiles over fewer than 4 months are meaningless.
    let value = config.get_int("analysis", "min_observations", 4);
    if value < 4 {
        return Err(AgriPriceError::ConfigInvalid {
            section: "analysis".to_string(),
            key: "min_observations".to_string(),
            reason: "min_observations must be at least 4".to_string(),
        });
    }
    Ok(())
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), AgriPriceError> {
    let value = config.get_int("report", "top_n", 10);
    if value < 1 {
        return Err(AgriPriceError::ConfigInvalid {
            section: "report".to_string(),
            key: "top_n".to_string(),
            reason: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}
