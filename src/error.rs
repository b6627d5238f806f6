pub type VtResult<T> = Result<T, VtError>;

#[derive(Debug, thiserror::Error)]
pub enum VtError {
    #[error("[HTTP Request Error] {0}")]
    HttpRequestError(#[from] ::reqwest::Error),

    #[error("[HTTP Middleware Error] {0}")]
    HttpMiddlewareError(#[from] ::reqwest_middleware::Error),

    #[error("[HTTP Status Error] {0}")]
    HttpStatusError(String),

    #[error("[Invalid] {message}")]
    Invalid { code: &'static str, message: String },

    #[error("No data for {symbol} in {month} of {year}")]
    NoDataForPeriod {
        symbol: String,
        month: String,
        year: String,
    },

    #[error("[Parse Config Error] {0}")]
    ParseConfigError(#[from] ::confy::ConfyError),

    #[error("[Parse DataTime Error] {0}")]
    ParseDataTimeError(#[from] chrono::ParseError),

    #[error("[Parse Enum Error] {0}")]
    ParseEnumError(#[from] ::strum::ParseError),

    #[error("[Parse URL Error] {0}")]
    ParseUrlError(#[from] url::ParseError),

    #[error("[Serde JSON Error] {0}")]
    SerdeJsonError(#[from] ::serde_json::Error),

    #[error("{symbol} is not a recognized stock ticker")]
    UnrecognizedSymbol { symbol: String },
}

impl VtError {
    pub fn no_data(symbol: &str, month: &str, year: &str) -> Self {
        Self::NoDataForPeriod {
            symbol: symbol.to_string(),
            month: month.to_string(),
            year: year.to_string(),
        }
    }

    pub fn unrecognized(symbol: &str) -> Self {
        Self::UnrecognizedSymbol {
            symbol: symbol.to_string(),
        }
    }
}
