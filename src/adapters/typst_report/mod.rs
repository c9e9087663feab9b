//! Typst report generation.
//!
//! Resolves `{{PLACEHOLDER}}` markers in a Typst template (the built-in
//! default or a custom file) by calling helpers from `tables` and
//! `chart_svg`, and writes the final `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::AgriPriceError;
use crate::domain::metrics::AnalysisParams;
use crate::ports::report_port::ReportPort;
use std::fs;

/// Context for resolving template placeholders.
pub struct ReportContext<'a> {
    pub result: &'a AnalysisResult,
    pub params: &'a AnalysisParams,
    pub top_n: usize,
}

/// Resolve all `{{PLACEHOLDER}}`s in the template and return the final
/// Typst markup.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let mut output = template.to_string();

    let overview = tables::render_overview(ctx.result, ctx.params);
    output = output.replace("{{OVERVIEW}}", &overview);

    let spikes = tables::render_spike_leaderboard(&ctx.result.metrics, ctx.top_n);
    output = output.replace("{{SPIKE_LEADERBOARD}}", &spikes);

    let volatility = tables::render_volatility_leaderboard(&ctx.result.metrics, ctx.top_n);
    output = output.replace("{{VOLATILITY_LEADERBOARD}}", &volatility);

    let regions = tables::render_region_leaderboard(&ctx.result.regions, ctx.top_n);
    output = output.replace("{{REGION_LEADERBOARD}}", &regions);

    let lag = tables::render_lag_table(&ctx.result.metrics, ctx.top_n);
    output = output.replace("{{LAG_TABLE}}", &lag);

    let overlays: Vec<String> = ctx
        .result
        .overlays
        .iter()
        .map(chart_svg::format_overlay_chart)
        .collect();
    output = output.replace("{{OVERLAY_CHARTS}}", &overlays.join("\n"));

    let scatter = chart_svg::format_resilience_chart(&ctx.result.resilience);
    output = output.replace("{{RESILIENCE_CHART}}", &scatter);

    let excluded = tables::render_excluded(&ctx.result.excluded);
    output = output.replace("{{EXCLUDED_NOTES}}", &excluded);

    output
}

/// Writes the resolved report to disk.
pub struct TypstReportAdapter {
    /// Custom template content; `None` selects the built-in default.
    pub template: Option<String>,
    pub top_n: usize,
}

impl ReportPort for TypstReportAdapter {
    fn write(
        &self,
        result: &AnalysisResult,
        params: &AnalysisParams,
        output_path: &str,
    ) -> Result<(), AgriPriceError> {
        let template = self
            .template
            .as_deref()
            .unwrap_or_else(|| default_template::template());
        let ctx = ReportContext {
            result,
            params,
            top_n: self.top_n,
        };
        fs::write(output_path, resolve(template, &ctx))?;
        Ok(())
    }
}
