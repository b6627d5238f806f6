use std::collections::HashMap;

use async_trait::async_trait;
use fake_user_agent::get_rua;
use log::{debug, warn};
use serde_json::Value;

use crate::{
    config::VtConfig,
    data::series::PriceSeries,
    ds::SeriesFetcher,
    error::{VtError, VtResult},
    utils::{datetime::date_from_str, net::http_get},
};

static TIME_SERIES_KEY: &str = "Time Series (Daily)";
static CLOSE_FIELD: &str = "4. close";

#[derive(Clone, Debug)]
pub struct AlphaVantageFetcher {
    api: String,
    key: String,
    timeout_secs: u64,
    max_retries: u32,
}

impl AlphaVantageFetcher {
    pub fn new(config: &VtConfig) -> Self {
        Self {
            api: config.alpha_vantage_api.clone(),
            key: config.alpha_vantage_key.clone(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        }
    }

    pub async fn call_api(&self, function: &str, symbol: &str) -> VtResult<Value> {
        let mut query: HashMap<String, String> = HashMap::new();
        query.insert("function".to_string(), function.to_string());
        query.insert("symbol".to_string(), symbol.to_string());
        query.insert("outputsize".to_string(), "full".to_string());
        query.insert("apikey".to_string(), self.key.to_string());

        let mut headers: HashMap<String, String> = HashMap::new();
        headers.insert(
            reqwest::header::USER_AGENT.to_string(),
            get_rua().to_string(),
        );

        let bytes = http_get(
            &self.api,
            Some("/query"),
            &query,
            &headers,
            self.timeout_secs,
            self.max_retries,
        )
        .await?;

        let json: Value = serde_json::from_slice(&bytes)?;

        Ok(json)
    }
}

#[async_trait]
impl SeriesFetcher for AlphaVantageFetcher {
    async fn fetch(&self, symbol: &str) -> VtResult<PriceSeries> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(VtError::unrecognized(symbol));
        }

        debug!("[Fetch] {symbol}");

        let json = match self.call_api("TIME_SERIES_DAILY", symbol).await {
            Ok(json) => json,
            Err(err) => {
                warn!("[Fetch] {symbol} {err}");
                return Err(VtError::unrecognized(symbol));
            }
        };

        parse_daily_series(&json, symbol)
    }
}

/// Decodes a TIME_SERIES_DAILY payload, any non-conforming shape is treated as
/// an unknown symbol
pub fn parse_daily_series(json: &Value, symbol: &str) -> VtResult<PriceSeries> {
    let Some(items) = json.get(TIME_SERIES_KEY).and_then(|v| v.as_object()) else {
        if let Some(message) = json
            .get("Error Message")
            .or_else(|| json.get("Note"))
            .or_else(|| json.get("Information"))
        {
            warn!("[Fetch] {symbol} {message}");
        }

        return Err(VtError::unrecognized(symbol));
    };

    let mut points = Vec::with_capacity(items.len());
    for (date_str, item) in items {
        let date = date_from_str(date_str).map_err(|err| {
            warn!("[Fetch] {symbol} {err}");
            VtError::unrecognized(symbol)
        })?;

        let close = match item.get(CLOSE_FIELD) {
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(Value::Number(n)) => n.as_f64(),
            _ => None,
        };

        if let Some(close) = close.filter(|c| c.is_finite()) {
            points.push((date, close));
        } else {
            warn!("[Fetch] {symbol} invalid close on {date_str}");
            return Err(VtError::unrecognized(symbol));
        }
    }

    let series = PriceSeries::from_points(points).with_symbol(symbol);
    if series.is_empty() {
        return Err(VtError::unrecognized(symbol));
    }

    debug!(
        "[Fetch] {symbol} {} days {:?}..{:?}",
        series.len(),
        series.first_date(),
        series.last_date()
    );

    Ok(series)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_daily_series() {
        let payload = json!({
            "Meta Data": {
                "1. Information": "Daily Prices (open, high, low, close) and Volumes",
                "2. Symbol": "AMZN"
            },
            "Time Series (Daily)": {
                "2024-01-02": { "1. open": "151.54", "4. close": "149.93", "5. volume": "47339424" },
                "2023-12-29": { "1. open": "153.10", "4. close": "151.94", "5. volume": "39789000" },
                "2023-12-28": { "1. open": "153.72", "4. close": "153.38", "5. volume": "34049898" }
            }
        });

        let series = parse_daily_series(&payload, "AMZN").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "AMZN");
        assert_eq!(
            series.first_date(),
            NaiveDate::from_ymd_opt(2023, 12, 28)
        );
        assert_eq!(series.closes(), vec![153.38, 151.94, 149.93]);
        assert_eq!(series.year_options(), vec!["2024", "2023"]);
    }

    #[test]
    fn test_parse_error_payload() {
        let payload = json!({
            "Error Message": "Invalid API call. Please retry or visit the documentation."
        });

        let err = parse_daily_series(&payload, "ZZZZNOPE").unwrap_err();
        assert!(matches!(err, VtError::UnrecognizedSymbol { .. }));
        assert_eq!(
            err.to_string(),
            "ZZZZNOPE is not a recognized stock ticker"
        );
    }

    #[test]
    fn test_parse_malformed_payload() {
        let bad_close = json!({
            "Time Series (Daily)": { "2024-01-02": { "4. close": "n/a" } }
        });
        assert!(parse_daily_series(&bad_close, "AMZN").is_err());

        let bad_date = json!({
            "Time Series (Daily)": { "yesterday": { "4. close": "1.0" } }
        });
        assert!(parse_daily_series(&bad_date, "AMZN").is_err());

        let empty = json!({ "Time Series (Daily)": {} });
        assert!(parse_daily_series(&empty, "AMZN").is_err());

        assert!(parse_daily_series(&json!([]), "AMZN").is_err());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_unrecognized() {
        let config = VtConfig {
            alpha_vantage_api: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let fetcher = AlphaVantageFetcher::new(&config);

        let err = fetcher.fetch("AMZN").await.unwrap_err();
        assert!(matches!(err, VtError::UnrecognizedSymbol { .. }));
    }
}
