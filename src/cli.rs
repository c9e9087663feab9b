//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_export;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::analysis::run_analysis;
use crate::domain::config_validation::{validate_analysis_config, validate_data_config};
use crate::domain::error::AgriPriceError;
use crate::domain::leaderboard::{rank_by_spike_frequency, rank_regions};
use crate::domain::metrics::AnalysisParams;
use crate::domain::series::build_series;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "agriprice",
    about = "Typhoon impact analysis for agricultural commodity prices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the analysis and write the report
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        charts_dir: Option<PathBuf>,
        #[arg(long)]
        commodity: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate an analysis configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List commodities present in the configured price data
    ListCommodities {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data coverage for commodities and cyclones
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        commodity: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            output,
            charts_dir,
            commodity,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_analyze(
                    &config,
                    output.as_ref(),
                    charts_dir.as_ref(),
                    commodity.as_deref(),
                )
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListCommodities { config } => run_list_commodities(&config),
        Command::Info { config, commodity } => run_info(&config, commodity.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = AgriPriceError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_analysis_params(config: &dyn ConfigPort) -> AnalysisParams {
    AnalysisParams {
        spike_multiplier: config.get_double("analysis", "spike_iqr_multiplier", 1.5),
        lag_window_months: config.get_int("analysis", "lag_window_months", 2) as i32,
        min_observations: config.get_int("analysis", "min_observations", 4) as usize,
    }
}

fn validate_full_config(config: &FileConfigAdapter) -> Result<(), ExitCode> {
    if let Err(e) = validate_data_config(config) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    if let Err(e) = validate_analysis_config(config) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    Ok(())
}

fn run_analyze(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    charts_dir: Option<&PathBuf>,
    commodity: Option<&str>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(code) = validate_full_config(&config) {
        return code;
    }

    let params = build_analysis_params(&config);

    // Stage 2: Build data port
    let data_port = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Load price and cyclone data
    eprintln!("Loading price data...");
    let observations = match data_port.fetch_prices() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let events = match data_port.fetch_cyclones() {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Loaded {} observations and {} cyclone events",
        observations.len(),
        events.len()
    );

    // Stage 4: Run the analysis
    let result = match run_analysis(&observations, &events, &params, commodity) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Console summary
    eprintln!("\n=== Vulnerability Summary ===");
    eprintln!("Commodities analyzed:  {}", result.metrics.len());
    eprintln!("Excluded:              {}", result.excluded.len());
    eprintln!("Cyclone events:        {}", result.event_count);

    let by_spikes = rank_by_spike_frequency(&result.metrics);
    eprintln!("\nTop commodities by spike frequency:");
    for m in by_spikes.iter().take(5) {
        eprintln!(
            "  {}: {:.1}% ({}/{} months)",
            m.commodity, m.spike_frequency_pct, m.spike_months, m.total_months
        );
    }

    let regions = rank_regions(&result.regions);
    if !regions.is_empty() {
        eprintln!("\nTop regions by spike observations:");
        for r in regions.iter().take(5) {
            eprintln!("  {}: {}", r.region, r.spike_count);
        }
    }

    // Stage 6: Write report
    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("report.typ"));

    let template = match config.get_string("report", "template_path") {
        Some(path) => match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                eprintln!("error: failed to read template {}: {}", path, e);
                return ExitCode::from(1);
            }
        },
        None => None,
    };

    let reporter = TypstReportAdapter {
        template,
        top_n: config.get_int("report", "top_n", 10) as usize,
    };
    if let Err(e) = reporter.write(&result, &params, &output.display().to_string()) {
        eprintln!("error: failed to write report: {e}");
        return (&e).into();
    }
    eprintln!("\nReport written to: {}", output.display());

    // Stage 7: Optional chart dataset export
    if let Some(dir) = charts_dir {
        if let Err(e) = json_export::write_chart_datasets(dir, &result) {
            eprintln!("error: failed to write chart datasets: {e}");
            return (&e).into();
        }
        eprintln!("Chart datasets written to: {}", dir.display());
    }

    ExitCode::SUCCESS
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(code) = validate_full_config(&config) {
        return code;
    }
    eprintln!("Config validated successfully");

    let params = build_analysis_params(&config);
    eprintln!("\nAnalysis parameters:");
    eprintln!("  spike threshold:  median + {} x IQR", params.spike_multiplier);
    eprintln!("  lag window:       {} months", params.lag_window_months);
    eprintln!("  min observations: {}", params.min_observations);

    let price_files = config
        .get_string("data", "price_files")
        .unwrap_or_default();
    eprintln!("\nData sources:");
    for file in price_files.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        eprintln!("  price file: {}", file);
    }
    if let Some(cyclones) = config.get_string("data", "cyclone_file") {
        eprintln!("  cyclone file: {}", cyclones);
    }

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(code) = validate_full_config(&config) {
        return code;
    }
    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

fn run_list_commodities(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let commodities = match data_port.list_commodities() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if commodities.is_empty() {
        eprintln!("No commodities found");
    } else {
        for name in &commodities {
            println!("{}", name);
        }
        eprintln!("{} commodities found", commodities.len());
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, commodity: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match CsvAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let observations = match data_port.fetch_prices() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for series in build_series(&observations) {
        if let Some(filter) = commodity {
            if !series.commodity.eq_ignore_ascii_case(filter) {
                continue;
            }
        }
        match (series.first_month(), series.last_month()) {
            (Some(first), Some(last)) => {
                println!(
                    "{}: {} months, {} to {}",
                    series.commodity,
                    series.len(),
                    first,
                    last
                );
            }
            _ => eprintln!("{}: no data found", series.commodity),
        }
    }

    match data_port.fetch_cyclones() {
        Ok(events) => {
            if let (Some(first), Some(last)) = (events.first(), events.last()) {
                println!(
                    "cyclones: {} events, {} to {}",
                    events.len(),
                    first.par_entry,
                    last.par_entry
                );
            } else {
                eprintln!("cyclones: no events found");
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    ExitCode::SUCCESS
}
