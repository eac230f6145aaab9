use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use super::source::{LatestCloses, PriceSource};
use crate::error::{PriceError, redact_query};

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance closes, no API key required. Tickers use Yahoo symbols
/// (`AAPL`, `BTC-USD`, `SHOP.TO`).
pub struct YahooPriceSource {
    connector: yahoo::YahooConnector,
}

impl YahooPriceSource {
    pub fn new() -> Result<Self, PriceError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| PriceError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    async fn latest_close(&self, symbol: &str) -> Result<Decimal, PriceError> {
        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| quote_error(symbol, e))?;

        let quote = resp.last_quote().map_err(|e| quote_error(symbol, e))?;

        Decimal::from_f64(quote.close)
            .map(|price| price.round_dp(6))
            .ok_or_else(|| PriceError::NoData(symbol.to_string()))
    }
}

fn quote_error(symbol: &str, e: yahoo::YahooError) -> PriceError {
    match e {
        yahoo::YahooError::ConnectionFailed(e) => PriceError::Network(redact_query(&e.to_string())),
        yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes => {
            PriceError::NoData(symbol.to_string())
        }
        e => PriceError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to fetch latest quote for {symbol}: {e}"),
        },
    }
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn latest_closes(&self, tickers: &[String]) -> Result<LatestCloses, PriceError> {
        if let [ticker] = tickers {
            return Ok(LatestCloses::Single(self.latest_close(ticker).await?));
        }

        let mut closes = BTreeMap::new();
        for ticker in tickers {
            match self.latest_close(ticker).await {
                Ok(price) => {
                    debug!(ticker = %ticker, %price, "Fetched latest close");
                    closes.insert(ticker.clone(), price);
                }
                Err(e) => warn!(ticker = %ticker, error = %e, "Skipping ticker without a quote"),
            }
        }

        if closes.is_empty() {
            return Err(PriceError::NoData(tickers.join(", ")));
        }

        Ok(LatestCloses::ByTicker(closes))
    }
}
