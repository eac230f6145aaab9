use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{Holding, NormalizedHolding, PriceMap, Summary, TopPerformer};

/// Returns `(current_value, gain)`, or `None` on overflow.
fn derive_values(
    quantity: Decimal,
    purchase_price: Decimal,
    current_price: Decimal,
) -> Option<(Decimal, Decimal)> {
    let current_value = quantity.checked_mul(current_price)?;
    let cost = quantity.checked_mul(purchase_price)?;
    Some((current_value, current_value.checked_sub(cost)?))
}

pub fn value_holding(row: &NormalizedHolding, prices: &PriceMap) -> Holding {
    let quantity = row.quantity().value();
    let purchase_price = row.purchase_price().value();
    let resolved = prices.get(row.ticker());
    let current_price = resolved.unwrap_or(Decimal::ZERO);

    let (current_value, gain) = derive_values(quantity, purchase_price, current_price)
        .unwrap_or_else(|| {
            warn!(ticker = %row.ticker(), "Overflow while valuing holding, counting it as 0");
            (Decimal::ZERO, Decimal::ZERO)
        });

    Holding::new(
        row.asset_name().clone(),
        row.ticker().clone(),
        quantity,
        purchase_price,
        current_price,
        resolved.is_some(),
        current_value,
        gain,
    )
}

pub fn value_holdings(rows: &[NormalizedHolding], prices: &PriceMap) -> Vec<Holding> {
    rows.iter().map(|row| value_holding(row, prices)).collect()
}

/// Tickers of holdings that got no price, once each, in portfolio order.
pub fn unresolved_tickers(holdings: &[Holding]) -> Vec<String> {
    let mut seen = HashSet::new();
    holdings
        .iter()
        .filter(|h| !h.price_resolved())
        .filter(|h| seen.insert(h.ticker().as_str()))
        .map(|h| h.ticker().clone())
        .collect()
}

/// Holding with the highest gain; the first one wins a tie.
pub fn top_performer(holdings: &[Holding]) -> Option<TopPerformer> {
    holdings
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, &Holding)>, (idx, holding)| match best {
            Some((_, current)) if holding.gain() <= current.gain() => best,
            _ => Some((idx, holding)),
        })
        .map(|(idx, holding)| TopPerformer::new(idx, holding.asset_name().clone(), *holding.gain()))
}

pub fn summarize(holdings: &[Holding], goal: Decimal) -> Summary {
    let total_value = holdings
        .iter()
        .fold(Decimal::ZERO, |sum, h| sum.saturating_add(*h.current_value()));
    let total_cost = holdings
        .iter()
        .fold(Decimal::ZERO, |sum, h| sum.saturating_add(h.cost_basis()));
    let total_gain = total_value.saturating_sub(total_cost);
    let remaining_to_goal = goal.saturating_sub(total_value);

    // The total is never negative, so a division overflow means "very far past
    // the goal".
    let progress_ratio = if goal > Decimal::ZERO {
        total_value.checked_div(goal).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };

    // Nothing is worth anything yet, so there is no meaningful winner.
    let top_performer = if total_value > Decimal::ZERO {
        top_performer(holdings)
    } else {
        None
    };

    Summary::new(
        total_value,
        total_cost,
        total_gain,
        goal,
        remaining_to_goal,
        progress_ratio,
        top_performer,
    )
}

/// Share of the total value per asset name, rows with the same name merged,
/// in first-appearance order. Empty when the portfolio is worth nothing.
pub fn allocation(holdings: &[Holding], total_value: Decimal) -> Vec<(String, Decimal)> {
    if total_value <= Decimal::ZERO {
        return Vec::new();
    }

    let mut slices: Vec<(String, Decimal)> = Vec::new();
    for holding in holdings.iter().filter(|h| *h.current_value() > Decimal::ZERO) {
        match slices.iter_mut().find(|(name, _)| name == holding.asset_name()) {
            Some((_, value)) => *value = value.saturating_add(*holding.current_value()),
            None => slices.push((holding.asset_name().clone(), *holding.current_value())),
        }
    }

    slices
        .into_iter()
        .map(|(name, value)| {
            let share = value.checked_div(total_value).unwrap_or(Decimal::ZERO);
            (name, share)
        })
        .collect()
}
