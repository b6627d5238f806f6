use log::debug;

use crate::{
    CONFIG,
    config::{ConfigKey, VtConfig},
    dashboard::{
        controller::{InputEvent, ReactiveController},
        state::{DashboardSnapshot, Slot},
    },
    ds::{SeriesFetcher, alpha_vantage::AlphaVantageFetcher},
    error::VtResult,
    utils::net::join_url,
};

pub struct MonthQuery {
    pub primary: String,
    pub comparison: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

pub async fn check() -> VtResult<Vec<(String, Option<String>)>> {
    let config = get_config().await;
    join_url(&config.alpha_vantage_api, "/query")?;
    let fetcher = AlphaVantageFetcher::new(&config);

    let mut status: Vec<(String, Option<String>)> = vec![];
    for symbol in [&config.primary_ticker, &config.comparison_ticker] {
        let title = format!("Alpha Vantage [{symbol}]");
        match fetcher.fetch(symbol).await {
            Ok(series) => {
                debug!("[Check] {symbol} {} days", series.len());
                status.push((title, None));
            }
            Err(err) => status.push((title, Some(err.to_string()))),
        }
    }

    Ok(status)
}

pub async fn get_config() -> VtConfig {
    CONFIG.read().await.clone()
}

pub async fn new_controller(primary: &str, comparison: &str) -> ReactiveController {
    let config = get_config().await;

    ReactiveController::new(
        Box::new(AlphaVantageFetcher::new(&config)),
        primary,
        comparison,
    )
}

/// Replays the dashboard events for one period without a window
pub async fn month_closings(query: &MonthQuery) -> DashboardSnapshot {
    let config = get_config().await;
    let comparison = query
        .comparison
        .as_deref()
        .unwrap_or(&config.comparison_ticker);

    let mut controller = new_controller(&query.primary, comparison).await;
    controller.start().await;

    if let Some(year) = &query.year {
        controller.handle(InputEvent::YearChanged(year.clone())).await;
    }
    if let Some(month) = &query.month {
        controller
            .handle(InputEvent::MonthChanged(month.clone()))
            .await;
    }
    if query.comparison.is_some() {
        controller
            .handle(InputEvent::ActiveSlotChanged(Slot::Comparison))
            .await;
    }

    controller.snapshot()
}

pub async fn set_config(key: &str, value: &str) -> VtResult<ConfigKey> {
    let mut config = CONFIG.write().await;

    let mut updated = config.clone();
    let key = updated.set(key, value)?;
    updated.store()?;

    *config = updated;

    Ok(key)
}
