pub mod coerced;
pub mod columns;
pub mod dashboard;
pub mod holding;
pub mod price_map;
pub mod raw_holding;
pub mod summary;
pub mod warning;

pub use coerced::Coerced;
pub use columns::{ColumnMap, SheetField};
pub use dashboard::Dashboard;
pub use holding::{Holding, NormalizedHolding};
pub use price_map::PriceMap;
pub use raw_holding::RawHolding;
pub use summary::{Summary, TopPerformer};
pub use warning::Warning;
