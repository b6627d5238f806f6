use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

use crate::{
    data::series::PriceSeries,
    ds::SeriesFetcher,
    error::{VtError, VtResult},
};

/// Fixed in-memory provider, unknown symbols fail like the remote one does
#[derive(Clone, Default)]
pub struct MemoryFetcher {
    series: HashMap<String, PriceSeries>,
    calls: Arc<AtomicUsize>,
}

impl MemoryFetcher {
    pub fn with(mut self, symbol: &str, series: PriceSeries) -> Self {
        self.series.insert(symbol.to_string(), series);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeriesFetcher for MemoryFetcher {
    async fn fetch(&self, symbol: &str) -> VtResult<PriceSeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| VtError::unrecognized(symbol))
    }
}

/// Weekday closes over `[from, to]`, price drawn from `f(day_index)`
pub fn weekday_series(from: NaiveDate, to: NaiveDate, f: impl Fn(usize) -> f64) -> PriceSeries {
    PriceSeries::from_points(
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .enumerate()
            .map(|(i, d)| (d, f(i))),
    )
}
