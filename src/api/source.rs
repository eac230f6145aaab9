use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{app::normalize::normalize_ticker, error::PriceError, models::PriceMap};

/// Latest closing prices as a source returns them. Asking for one ticker may
/// yield a bare reading without the symbol attached, asking for several yields
/// a keyed collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LatestCloses {
    Single(Decimal),
    ByTicker(BTreeMap<String, Decimal>),
}

impl LatestCloses {
    /// Reshapes either form into a `PriceMap` keyed by the requested tickers.
    /// `requested` must already be normalized and de-duplicated.
    pub fn into_price_map(self, requested: &[String]) -> PriceMap {
        match self {
            LatestCloses::Single(price) => match requested {
                [ticker] if price >= Decimal::ZERO => {
                    std::iter::once((ticker.clone(), price)).collect()
                }
                [ticker] => {
                    warn!(ticker = %ticker, %price, "Discarding negative price");
                    PriceMap::new()
                }
                _ => {
                    warn!(
                        requested = requested.len(),
                        "Single price reading for a multi-ticker request, discarding"
                    );
                    PriceMap::new()
                }
            },
            LatestCloses::ByTicker(prices) => prices
                .into_iter()
                .filter_map(|(ticker, price)| {
                    let ticker = normalize_ticker(&ticker);
                    if !requested.contains(&ticker) {
                        debug!(ticker = %ticker, "Ignoring price for a ticker that was not requested");
                        return None;
                    }
                    if price < Decimal::ZERO {
                        warn!(ticker = %ticker, %price, "Discarding negative price");
                        return None;
                    }
                    Some((ticker, price))
                })
                .collect(),
        }
    }
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name for logs and warnings.
    fn name(&self) -> &str;

    /// Latest trading-day close for each ticker. `tickers` is never empty.
    async fn latest_closes(&self, tickers: &[String]) -> Result<LatestCloses, PriceError>;
}
