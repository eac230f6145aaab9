use std::collections::HashSet;

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, warn};

use crate::{api::PriceSource, models::PriceMap};

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, new)]
pub struct PriceFetch {
    prices: PriceMap,
    /// Set when the source failed as a whole.
    failure: Option<String>,
}

/// Fetch boundary in front of a `PriceSource`: de-duplicates tickers, skips the
/// call when there is nothing to ask for, reshapes the response and absorbs
/// every source failure.
pub struct PriceService {
    source: Box<dyn PriceSource>,
}

impl PriceService {
    pub fn new(source: Box<dyn PriceSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub async fn fetch(&self, tickers: &[String]) -> PriceFetch {
        let unique = unique_tickers(tickers);
        if unique.is_empty() {
            debug!("No tickers to price, skipping price fetch");
            return PriceFetch::default();
        }

        info!(
            source = self.source.name(),
            tickers = unique.len(),
            "Fetching latest closes"
        );

        match self.source.latest_closes(&unique).await {
            Ok(closes) => {
                let prices = closes.into_price_map(&unique);
                info!(resolved = prices.len(), requested = unique.len(), "Prices fetched");
                PriceFetch::new(prices, None)
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Price source unavailable");
                PriceFetch::new(PriceMap::new(), Some(e.to_string()))
            }
        }
    }
}

/// First occurrence order, blanks dropped.
pub fn unique_tickers(tickers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}
