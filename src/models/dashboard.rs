use chrono::{DateTime, Local};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Holding, Summary, Warning};

/// Immutable result of one refresh, handed to the presenters.
#[derive(Clone, Debug, Getters, Serialize, new)]
pub struct Dashboard {
    holdings: Vec<Holding>,
    summary: Summary,
    allocation: Vec<(String, Decimal)>,
    warnings: Vec<Warning>,
    refreshed_at: DateTime<Local>,
}

impl Dashboard {
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
