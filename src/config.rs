use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{VtError, VtResult};

pub static API_KEY_ENV: &str = "ALPHA_VANTAGE_API";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VtConfig {
    pub alpha_vantage_api: String,
    pub alpha_vantage_key: String,
    pub primary_ticker: String,
    pub comparison_ticker: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConfigKey {
    AlphaVantageApi,
    AlphaVantageKey,
    PrimaryTicker,
    ComparisonTicker,
    TimeoutSecs,
    MaxRetries,
}

impl Default for VtConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api: "https://www.alphavantage.co".to_string(),
            alpha_vantage_key: "demo".to_string(),
            primary_ticker: "AMZN".to_string(),
            comparison_ticker: "GOOG".to_string(),
            timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl VtConfig {
    pub fn load() -> VtResult<Self> {
        let mut config: VtConfig = confy::load(env!("CARGO_PKG_NAME"), None)?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.alpha_vantage_key = key.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn store(&self) -> VtResult<()> {
        confy::store(env!("CARGO_PKG_NAME"), None, self).map_err(Into::into)
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::AlphaVantageApi => self.alpha_vantage_api.clone(),
            ConfigKey::AlphaVantageKey => self.alpha_vantage_key.clone(),
            ConfigKey::PrimaryTicker => self.primary_ticker.clone(),
            ConfigKey::ComparisonTicker => self.comparison_ticker.clone(),
            ConfigKey::TimeoutSecs => self.timeout_secs.to_string(),
            ConfigKey::MaxRetries => self.max_retries.to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> VtResult<ConfigKey> {
        let key = ConfigKey::from_str(key.trim())?;
        let value = value.trim();

        match key {
            ConfigKey::AlphaVantageApi => {
                url::Url::parse(value)?;
                self.alpha_vantage_api = value.to_string();
            }
            ConfigKey::AlphaVantageKey => self.alpha_vantage_key = value.to_string(),
            ConfigKey::PrimaryTicker => self.primary_ticker = value.to_uppercase(),
            ConfigKey::ComparisonTicker => self.comparison_ticker = value.to_uppercase(),
            ConfigKey::TimeoutSecs => self.timeout_secs = parse_number(key, value)?,
            ConfigKey::MaxRetries => self.max_retries = parse_number(key, value)?,
        }

        Ok(key)
    }
}

fn parse_number<T: FromStr>(key: ConfigKey, value: &str) -> VtResult<T> {
    value.parse::<T>().map_err(|_| VtError::Invalid {
        code: "INVALID_CONFIG_VALUE",
        message: format!("'{value}' is not a valid number for '{key}'"),
    })
}
