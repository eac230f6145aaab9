use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{Coerced, NormalizedHolding, RawHolding};

static CURRENCY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$,]").expect("currency pattern is valid"));

pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Parses a possibly currency-formatted cell such as `"$1,200.50"`. Anything
/// that is not a non-negative number falls back to zero.
pub fn coerce_decimal(raw: &str) -> Coerced {
    let cleaned = CURRENCY_NOISE.replace_all(raw.trim(), "");
    let cleaned = cleaned.trim();

    let parsed = Decimal::from_str(cleaned).or_else(|_| Decimal::from_scientific(cleaned));

    match parsed {
        Ok(value) if value >= Decimal::ZERO => Coerced::Parsed(value),
        _ => Coerced::Defaulted {
            raw: raw.to_string(),
        },
    }
}

pub fn normalize_holding(raw: &RawHolding) -> NormalizedHolding {
    let ticker = normalize_ticker(raw.ticker());
    let asset_name = match raw.asset_name().trim() {
        "" => ticker.clone(),
        name => name.to_string(),
    };

    NormalizedHolding::new(
        asset_name,
        ticker,
        coerce_decimal(raw.quantity()),
        coerce_decimal(raw.purchase_price()),
    )
}

pub fn normalize_holdings(rows: &[RawHolding]) -> Vec<NormalizedHolding> {
    rows.iter().map(normalize_holding).collect()
}

pub fn defaulted_cells(holdings: &[NormalizedHolding]) -> usize {
    holdings
        .iter()
        .map(|h| h.quantity().is_defaulted() as usize + h.purchase_price().is_defaulted() as usize)
        .sum()
}
