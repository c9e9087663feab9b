//! Report generation port trait.

use crate::domain::analysis::AnalysisResult;
use crate::domain::error::AgriPriceError;
use crate::domain::metrics::AnalysisParams;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(
        &self,
        result: &AnalysisResult,
        params: &AnalysisParams,
        output_path: &str,
    ) -> Result<(), AgriPriceError>;
}
