use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use rust_decimal::Decimal;

use crate::{
    api::SheetSource,
    app::{RefreshPolicy, ui::DisplayOptions},
    models::ColumnMap,
};

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-goal-tracker",
    version,
    about = "Track a spreadsheet portfolio toward a savings goal"
)]
pub struct Args {
    /// Published CSV link of the portfolio sheet, or a local CSV path.
    #[arg(long, env = "PORTFOLIO_SHEET_URL")]
    pub sheet: String,

    /// Target amount the portfolio is saving toward.
    #[arg(long, env = "PORTFOLIO_GOAL", default_value = "1500", value_parser = parse_goal)]
    pub goal: Decimal,

    /// Seconds before the dashboard refreshes on its own.
    #[arg(long, env = "PORTFOLIO_REFRESH_SECS", default_value_t = 60)]
    pub refresh_secs: u64,

    /// Read prices from a `Ticker,Price` CSV file instead of Yahoo Finance.
    #[arg(long, env = "PORTFOLIO_PRICES_FILE")]
    pub prices_file: Option<PathBuf>,

    #[arg(long, env = "PORTFOLIO_TITLE", default_value = "Savings Mission")]
    pub title: String,

    #[arg(long, env = "PORTFOLIO_CURRENCY_SYMBOL", default_value = "$")]
    pub currency_symbol: String,

    #[arg(long, default_value = "Activo")]
    pub asset_column: String,

    #[arg(long, default_value = "Ticker")]
    pub ticker_column: String,

    #[arg(long, default_value = "Cantidad")]
    pub quantity_column: String,

    #[arg(long, default_value = "Precio_Compra")]
    pub purchase_price_column: String,

    /// Print a single text report to stdout instead of starting the dashboard.
    #[arg(long)]
    pub once: bool,

    /// With `--once`, print the snapshot as JSON.
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Log destination while the dashboard owns the terminal.
    #[arg(
        long,
        env = "PORTFOLIO_LOG_FILE",
        default_value = "portfolio-goal-tracker.log"
    )]
    pub log_file: PathBuf,
}

impl Args {
    pub fn sheet_source(&self) -> SheetSource {
        SheetSource::parse(&self.sheet)
    }

    pub fn columns(&self) -> ColumnMap {
        ColumnMap::new(
            self.asset_column.as_str(),
            self.ticker_column.as_str(),
            self.quantity_column.as_str(),
            self.purchase_price_column.as_str(),
        )
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy::new(Duration::from_secs(self.refresh_secs))
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            title: self.title.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

pub fn parse_goal(value: &str) -> Result<Decimal, String> {
    let goal = Decimal::from_str(value.trim()).map_err(|e| format!("invalid goal '{}': {}", value, e))?;
    if goal <= Decimal::ZERO {
        return Err(format!("goal must be greater than 0, got {}", goal));
    }
    Ok(goal)
}
