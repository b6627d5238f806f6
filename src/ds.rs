use async_trait::async_trait;

use crate::{data::series::PriceSeries, error::VtResult};

pub mod alpha_vantage;
#[cfg(test)]
pub mod memory;

/// Source of full daily closing-price histories.
///
/// Every failure, whatever its cause, surfaces as
/// [`VtError::UnrecognizedSymbol`](crate::error::VtError::UnrecognizedSymbol).
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    async fn fetch(&self, symbol: &str) -> VtResult<PriceSeries>;
}
