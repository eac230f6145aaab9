use std::time::Instant;

use chrono::Local;
use reqwest::Client;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    api::{SheetSource, sheet::load_sheet},
    app::{
        calc,
        normalize::{defaulted_cells, normalize_holdings},
        refresh::RefreshPolicy,
    },
    error::PipelineError,
    models::{ColumnMap, Dashboard, Warning},
    services::PriceService,
};

/// Runs the load, normalize, price and value pipeline and keeps the latest
/// snapshot. Each refresh replaces the previous snapshot entirely.
pub struct Portfolio {
    sheet: SheetSource,
    columns: ColumnMap,
    goal: Decimal,
    client: Client,
    price_service: PriceService,
    refresh_policy: RefreshPolicy,
    latest: Option<Result<Dashboard, PipelineError>>,
    last_refresh: Option<Instant>,
}

impl Portfolio {
    pub fn new(
        sheet: SheetSource,
        columns: ColumnMap,
        goal: Decimal,
        price_service: PriceService,
        refresh_policy: RefreshPolicy,
    ) -> Self {
        Self {
            sheet,
            columns,
            goal,
            client: Client::new(),
            price_service,
            refresh_policy,
            latest: None,
            last_refresh: None,
        }
    }

    pub fn goal(&self) -> Decimal {
        self.goal
    }

    pub fn price_source_name(&self) -> &str {
        self.price_service.source_name()
    }

    pub fn refresh_policy(&self) -> &RefreshPolicy {
        &self.refresh_policy
    }

    pub fn latest(&self) -> Option<&Result<Dashboard, PipelineError>> {
        self.latest.as_ref()
    }

    pub fn last_refresh(&self) -> Option<Instant> {
        self.last_refresh
    }

    /// Refreshes when `force` is set or the policy says the snapshot is stale.
    /// Returns whether a refresh happened.
    pub async fn refresh_if_due(&mut self, now: Instant, force: bool) -> bool {
        if !self.refresh_policy.is_due(self.last_refresh, now, force) {
            return false;
        }
        self.refresh(now).await;
        true
    }

    pub async fn refresh(&mut self, now: Instant) -> &Result<Dashboard, PipelineError> {
        let result = self.build_dashboard().await;
        match &result {
            Ok(dashboard) => info!(
                holdings = dashboard.holdings().len(),
                total_value = %dashboard.summary().total_value(),
                warnings = dashboard.warnings().len(),
                "Dashboard refreshed"
            ),
            Err(e) => warn!(sheet = %self.sheet, error = %e, "Dashboard refresh failed"),
        }
        self.last_refresh = Some(now);
        self.latest.insert(result)
    }

    /// One full pass of the pipeline. Hard failures stop before prices are
    /// requested; everything else degrades to zero-valued fields plus warnings.
    pub async fn build_dashboard(&self) -> Result<Dashboard, PipelineError> {
        let sheet = load_sheet(&self.sheet, &self.columns, &self.client).await?;

        let mut warnings = Vec::new();
        if sheet.rows().is_empty() {
            warnings.push(Warning::EmptySheet);
        }
        if *sheet.skipped() > 0 {
            warnings.push(Warning::RowsSkipped {
                count: *sheet.skipped(),
            });
        }

        let normalized = normalize_holdings(sheet.rows());
        let defaulted = defaulted_cells(&normalized);
        if defaulted > 0 {
            warn!(cells = defaulted, "Malformed numeric cells counted as 0");
            warnings.push(Warning::CellsDefaulted { count: defaulted });
        }

        let tickers: Vec<String> = normalized.iter().map(|h| h.ticker().clone()).collect();
        let fetch = self.price_service.fetch(&tickers).await;
        if let Some(reason) = fetch.failure() {
            warnings.push(Warning::MarketUnavailable {
                reason: reason.clone(),
            });
        }

        let holdings = calc::value_holdings(&normalized, fetch.prices());
        let unresolved = calc::unresolved_tickers(&holdings);
        if !unresolved.is_empty() {
            warn!(tickers = ?unresolved, "Holdings without a price are valued at 0");
            warnings.push(Warning::PricesUnresolved {
                tickers: unresolved,
            });
        }

        let summary = calc::summarize(&holdings, self.goal);
        let allocation = calc::allocation(&holdings, *summary.total_value());

        Ok(Dashboard::new(
            holdings,
            summary,
            allocation,
            warnings,
            Local::now(),
        ))
    }
}
