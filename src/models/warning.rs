use std::fmt;

use serde::Serialize;

/// Advisory conditions of a refresh. None of these stop the dashboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Warning {
    EmptySheet,
    RowsSkipped { count: usize },
    CellsDefaulted { count: usize },
    PricesUnresolved { tickers: Vec<String> },
    MarketUnavailable { reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptySheet => write!(f, "The portfolio sheet has no rows"),
            Warning::RowsSkipped { count } => {
                write!(f, "{} unreadable sheet row(s) were skipped", count)
            }
            Warning::CellsDefaulted { count } => {
                write!(f, "{} malformed numeric cell(s) were counted as 0", count)
            }
            Warning::PricesUnresolved { tickers } => {
                let names: Vec<&str> = tickers
                    .iter()
                    .map(|t| if t.is_empty() { "<blank>" } else { t.as_str() })
                    .collect();
                write!(f, "No price found for {} (valued at 0)", names.join(", "))
            }
            Warning::MarketUnavailable { reason } => {
                write!(f, "Market data unavailable: {}", reason)
            }
        }
    }
}
