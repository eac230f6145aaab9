use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct TopPerformer {
    index: usize,
    asset_name: String,
    gain: Decimal,
}

/// Portfolio level aggregates for one snapshot.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Summary {
    total_value: Decimal,
    total_cost: Decimal,
    total_gain: Decimal,
    goal: Decimal,
    remaining_to_goal: Decimal,
    /// Unclamped; above 1 once the goal is exceeded.
    progress_ratio: Decimal,
    top_performer: Option<TopPerformer>,
}

impl Summary {
    /// Progress clamped to `[0, 1]` for gauges.
    pub fn display_ratio(&self) -> Decimal {
        self.progress_ratio.clamp(Decimal::ZERO, Decimal::ONE)
    }

    pub fn goal_reached(&self) -> bool {
        self.progress_ratio >= Decimal::ONE
    }
}
