use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::Coerced;

/// A sheet row after cleaning, not yet priced.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct NormalizedHolding {
    asset_name: String,
    ticker: String,
    quantity: Coerced,
    purchase_price: Coerced,
}

/// A priced portfolio line.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Holding {
    asset_name: String,
    ticker: String,
    quantity: Decimal,
    purchase_price: Decimal,
    current_price: Decimal,
    price_resolved: bool,
    current_value: Decimal,
    gain: Decimal,
}

impl Holding {
    pub fn cost_basis(&self) -> Decimal {
        self.quantity
            .checked_mul(self.purchase_price)
            .unwrap_or(Decimal::ZERO)
    }
}
