use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// Latest price per ticker for a single refresh. Unresolved tickers have no
/// entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PriceMap {
    prices: BTreeMap<String, Decimal>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ticker: impl Into<String>, price: Decimal) {
        self.prices.insert(ticker.into(), price);
    }

    pub fn get(&self, ticker: &str) -> Option<Decimal> {
        self.prices.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        let mut map = PriceMap::new();
        for (ticker, price) in iter {
            map.insert(ticker, price);
        }
        map
    }
}
