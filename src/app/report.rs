use crate::{
    app::utils::{format_money, format_percent, format_quantity, format_signed_money},
    error::PipelineError,
    models::Dashboard,
};

/// Plain-text rendering of a snapshot, for `--once` runs.
pub fn render_text(dashboard: &Dashboard, title: &str, symbol: &str) -> String {
    let summary = dashboard.summary();
    let mut lines = vec![
        title.to_string(),
        format!(
            "Capital: {} ({} of goal {})",
            format_money(*summary.total_value(), symbol),
            format_percent(*summary.progress_ratio()),
            format_money(*summary.goal(), symbol)
        ),
        format!(
            "Remaining: {}",
            format_money(*summary.remaining_to_goal(), symbol)
        ),
    ];

    lines.push(match summary.top_performer() {
        Some(top) => format!(
            "Top performer: {} ({})",
            top.asset_name(),
            format_signed_money(*top.gain(), symbol)
        ),
        None => "Top performer: -".to_string(),
    });

    if summary.goal_reached() {
        lines.push("Goal reached!".to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "{:<20} {:<10} {:>12} {:>14} {:>14} {:>14}",
        "Asset", "Ticker", "Quantity", "Price", "Value", "Gain"
    ));
    for holding in dashboard.holdings() {
        let price = if *holding.price_resolved() {
            format_money(*holding.current_price(), symbol)
        } else {
            "n/a".to_string()
        };
        lines.push(format!(
            "{:<20} {:<10} {:>12} {:>14} {:>14} {:>14}",
            holding.asset_name(),
            holding.ticker(),
            format_quantity(*holding.quantity()),
            price,
            format_money(*holding.current_value(), symbol),
            format_signed_money(*holding.gain(), symbol)
        ));
    }

    if !dashboard.allocation().is_empty() {
        lines.push(String::new());
        lines.push("Allocation:".to_string());
        for (name, share) in dashboard.allocation() {
            lines.push(format!("  {:<20} {:>7}", name, format_percent(*share)));
        }
    }

    if !dashboard.warnings().is_empty() {
        lines.push(String::new());
        for warning in dashboard.warnings() {
            lines.push(format!("warning: {}", warning));
        }
    }

    lines.join("\n") + "\n"
}

/// What to tell the user when a refresh produced no dashboard.
pub fn failure_hint(error: &PipelineError) -> String {
    match error {
        PipelineError::SourceUnavailable(_) => format!(
            "{}. Check that the sheet is published to the web and the link ends in 'output=csv'.",
            error
        ),
        PipelineError::MissingColumn(column) => format!(
            "{}. Make sure the header row of the sheet has a column named exactly '{}'.",
            error, column
        ),
    }
}
