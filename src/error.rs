use thiserror::Error;

/// Hard failures that stop a refresh before any valuation happens.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Portfolio sheet unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Missing required column '{0}' in portfolio sheet")]
    MissingColumn(String),
}

/// Failures raised by a price source. They never leave the price service;
/// they are turned into an advisory warning there.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Price source error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No prices returned for {0}")]
    NoData(String),

    #[error("Price file error: {0}")]
    File(String),
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        PipelineError::SourceUnavailable(redact_query(&e.to_string()))
    }
}

impl From<csv::Error> for PriceError {
    fn from(e: csv::Error) -> Self {
        PriceError::File(e.to_string())
    }
}

/// Strips the query string from any URL in a message. Published sheet links
/// and provider URLs carry keys in the query.
pub fn redact_query(message: &str) -> String {
    match message.find('?') {
        Some(idx) => format!("{}?<query redacted>", &message[..idx]),
        None => message.to_string(),
    }
}
