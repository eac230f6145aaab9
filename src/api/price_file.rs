use std::{collections::BTreeMap, path::PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use super::source::{LatestCloses, PriceSource};
use crate::{app::normalize::coerce_decimal, error::PriceError, models::Coerced};

const PROVIDER: &str = "Price file";

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Price")]
    price: String,
}

/// Offline prices from a `Ticker,Price` CSV file. Always answers with the
/// keyed shape, whatever the number of requested tickers.
#[derive(Clone, Debug)]
pub struct PriceFileSource {
    path: PathBuf,
}

impl PriceFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse_prices(text: &str) -> Result<BTreeMap<String, Decimal>, PriceError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut prices = BTreeMap::new();
        for row in reader.deserialize::<PriceRow>() {
            let row = row?;
            match coerce_decimal(&row.price) {
                Coerced::Parsed(price) => {
                    prices.insert(row.ticker, price);
                }
                Coerced::Defaulted { raw } => {
                    warn!(ticker = %row.ticker, price = %raw, "Ignoring unparseable price")
                }
            }
        }

        Ok(prices)
    }
}

#[async_trait]
impl PriceSource for PriceFileSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn latest_closes(&self, _tickers: &[String]) -> Result<LatestCloses, PriceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PriceError::File(format!("{}: {}", self.path.display(), e)))?;

        Ok(LatestCloses::ByTicker(Self::parse_prices(&text)?))
    }
}
