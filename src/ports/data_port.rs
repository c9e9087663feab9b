//! Data access port trait.

use crate::domain::error::AgriPriceError;
use crate::domain::event::CycloneEvent;
use crate::domain::observation::PriceObservation;

pub trait DataPort {
    /// All usable price observations, sorted by (commodity, month, region).
    fn fetch_prices(&self) -> Result<Vec<PriceObservation>, AgriPriceError>;

    /// All cyclone events with a parsable PAR-entry date, sorted by date.
    fn fetch_cyclones(&self) -> Result<Vec<CycloneEvent>, AgriPriceError>;

    /// Distinct commodity names, sorted.
    fn list_commodities(&self) -> Result<Vec<String>, AgriPriceError>;
}
