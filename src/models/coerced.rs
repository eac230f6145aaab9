use rust_decimal::Decimal;
use serde::Serialize;

/// Result of coercing a numeric cell. A malformed cell is never an error,
/// it degrades to zero and keeps the raw text around for reporting.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Coerced {
    Parsed(Decimal),
    Defaulted { raw: String },
}

impl Coerced {
    pub fn value(&self) -> Decimal {
        match self {
            Coerced::Parsed(value) => *value,
            Coerced::Defaulted { .. } => Decimal::ZERO,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Coerced::Defaulted { .. })
    }
}
