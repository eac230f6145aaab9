use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        BarChart, Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table,
        TableState, Wrap,
    },
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    app::{
        Portfolio,
        report::failure_hint,
        utils::{format_money, format_percent, format_quantity, format_signed_money},
    },
    models::Dashboard,
};

#[derive(Clone, Debug)]
pub struct DisplayOptions {
    pub title: String,
    pub currency_symbol: String,
}

fn gain_color(gain: Decimal) -> Color {
    if gain >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

pub fn render(
    frame: &mut Frame,
    portfolio: &Portfolio,
    options: &DisplayOptions,
    table_state: &mut TableState,
    popup_message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_title(frame, chunks[0], portfolio, options);

    match portfolio.latest() {
        None => {
            let loading = Paragraph::new("Loading portfolio...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(loading, chunks[1]);
        }
        Some(Err(e)) => {
            let error = Paragraph::new(failure_hint(e))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Error").borders(Borders::ALL));
            frame.render_widget(error, chunks[1]);
        }
        Some(Ok(dashboard)) => render_dashboard(frame, chunks[1], dashboard, options, table_state),
    }

    let help = Paragraph::new("q quit | r/F5 refresh now | Up/Down select | Esc clear selection")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    if let Some(message) = popup_message {
        render_popup(frame, message);
    }
}

fn render_title(frame: &mut Frame, area: Rect, portfolio: &Portfolio, options: &DisplayOptions) {
    let refreshed = match portfolio.latest() {
        Some(Ok(dashboard)) => dashboard.refreshed_at().format("%H:%M:%S").to_string(),
        Some(Err(_)) => "failed".to_string(),
        None => "never".to_string(),
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            options.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  goal {}  |  prices: {}  |  refreshed: {}",
            format_money(portfolio.goal(), &options.currency_symbol),
            portfolio.price_source_name(),
            refreshed
        )),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, area);
}

fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    options: &DisplayOptions,
    table_state: &mut TableState,
) {
    let warnings_height = if dashboard.warnings().is_empty() {
        0
    } else {
        dashboard.warnings().len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(warnings_height),
        ])
        .split(area);

    render_kpis(frame, chunks[0], dashboard, options);
    render_progress(frame, chunks[1], dashboard);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_allocation(frame, middle[0], dashboard);
    render_holdings(frame, middle[1], dashboard, options, table_state);

    if !dashboard.warnings().is_empty() {
        let items: Vec<ListItem> = dashboard
            .warnings()
            .iter()
            .map(|w| ListItem::new(w.to_string()).style(Style::default().fg(Color::Yellow)))
            .collect();
        let list = List::new(items).block(Block::default().title("Warnings").borders(Borders::ALL));
        frame.render_widget(list, chunks[3]);
    }
}

fn render_kpis(frame: &mut Frame, area: Rect, dashboard: &Dashboard, options: &DisplayOptions) {
    let symbol = &options.currency_symbol;
    let summary = dashboard.summary();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    let capital = Paragraph::new(vec![
        Line::from(Span::styled(
            format_money(*summary.total_value(), symbol),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} of goal", format_percent(*summary.progress_ratio())),
            Style::default().fg(Color::Green),
        )),
    ])
    .block(Block::default().title("Capital").borders(Borders::ALL));

    let remaining = *summary.remaining_to_goal();
    let remaining_color = if remaining > Decimal::ZERO {
        Color::Red
    } else {
        Color::Green
    };
    let to_goal = Paragraph::new(Line::from(Span::styled(
        format_money(remaining, symbol),
        Style::default()
            .fg(remaining_color)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().title("Remaining to goal").borders(Borders::ALL));

    let top_lines = match summary.top_performer() {
        Some(top) => vec![
            Line::from(Span::styled(
                top.asset_name().clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format_signed_money(*top.gain(), symbol),
                Style::default().fg(gain_color(*top.gain())),
            )),
        ],
        None => vec![Line::from("-")],
    };
    let top = Paragraph::new(top_lines)
        .block(Block::default().title("Top performer").borders(Borders::ALL));

    frame.render_widget(capital, chunks[0]);
    frame.render_widget(to_goal, chunks[1]);
    frame.render_widget(top, chunks[2]);
}

fn render_progress(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let summary = dashboard.summary();
    let (title, color) = if summary.goal_reached() {
        ("Goal reached!", Color::Green)
    } else {
        ("Progress", Color::Cyan)
    };

    let ratio = summary.display_ratio().to_f64().unwrap_or(0.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format_percent(*summary.progress_ratio()));

    frame.render_widget(gauge, area);
}

fn render_allocation(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    if dashboard.allocation().is_empty() {
        let empty = Paragraph::new("Nothing to allocate yet")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("Allocation").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let data: Vec<(&str, u64)> = dashboard
        .allocation()
        .iter()
        .map(|(name, share)| {
            let percent = share
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|p| p.round().to_u64())
                .unwrap_or(0);
            (name.as_str(), percent)
        })
        .collect();

    let barchart = BarChart::default()
        .block(Block::default().title("Allocation %").borders(Borders::ALL))
        .data(&data)
        .bar_width(7)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().fg(Color::Black).bg(Color::Yellow));
    frame.render_widget(barchart, chunks[0]);

    let items: Vec<ListItem> = dashboard
        .allocation()
        .iter()
        .map(|(name, share)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", name), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:>7}", format_percent(*share)),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, chunks[1]);
}

fn render_holdings(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    options: &DisplayOptions,
    table_state: &mut TableState,
) {
    let symbol = &options.currency_symbol;

    if dashboard.is_empty() {
        let empty = Paragraph::new("No holdings in the sheet.")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("Holdings").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let header_cells = ["Asset", "Quantity", "Price", "Value", "Gain"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).style(Style::default()).height(1);

    let rows = dashboard.holdings().iter().map(|holding| {
        let price = if *holding.price_resolved() {
            Cell::from(format_money(*holding.current_price(), symbol))
        } else {
            Cell::from("n/a").style(Style::default().fg(Color::DarkGray))
        };
        let gain = *holding.gain();

        let cells = [
            Cell::from(holding.asset_name().clone()),
            Cell::from(format_quantity(*holding.quantity())),
            price,
            Cell::from(format_money(*holding.current_value(), symbol)),
            Cell::from(format_signed_money(gain, symbol)).style(Style::default().fg(gain_color(gain))),
        ];

        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Holdings").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_popup(frame: &mut Frame, message: &str) {
    let area = centered_rect(40, 5, frame.area());
    let popup = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Cyan))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
