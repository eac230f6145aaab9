use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};

use crate::app::{
    Portfolio,
    ui::{self, DisplayOptions},
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    portfolio: Portfolio,
    options: DisplayOptions,
    table_state: TableState,
    popup_message: Option<String>,
}

impl App {
    pub fn new(portfolio: Portfolio, options: DisplayOptions) -> Self {
        Self {
            portfolio,
            options,
            table_state: TableState::default(),
            popup_message: None,
        }
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            ui::render(
                frame,
                &self.portfolio,
                &self.options,
                &mut self.table_state,
                &self.popup_message,
            )
        })?;
        Ok(())
    }

    async fn refresh<B: Backend>(&mut self, terminal: &mut Terminal<B>, force: bool) -> Result<()> {
        let now = Instant::now();
        if !force
            && !self
                .portfolio
                .refresh_policy()
                .is_due(self.portfolio.last_refresh(), now, false)
        {
            return Ok(());
        }

        self.show_popup("Updating prices...");
        self.draw(terminal)?;

        self.portfolio.refresh_if_due(now, force).await;
        self.clear_popup();

        // The row count may have changed under the selection.
        let rows = self.holding_count();
        if self.table_state.selected().is_some_and(|i| i >= rows) {
            self.table_state.select(None);
        }

        Ok(())
    }

    fn holding_count(&self) -> usize {
        match self.portfolio.latest() {
            Some(Ok(dashboard)) => dashboard.holdings().len(),
            _ => 0,
        }
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.refresh(terminal, false).await?;
            self.draw(terminal)?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') | KeyCode::F(5) => {
                        self.refresh(terminal, true).await?;
                    }
                    KeyCode::Esc => self.table_state.select(None),
                    KeyCode::Down => {
                        let count = self.holding_count();
                        if count > 0 {
                            let i = match self.table_state.selected() {
                                Some(i) if i + 1 < count => i + 1,
                                _ => 0,
                            };
                            self.table_state.select(Some(i));
                        }
                    }
                    KeyCode::Up => {
                        let count = self.holding_count();
                        if count > 0 {
                            let i = match self.table_state.selected() {
                                Some(0) | None => count - 1,
                                Some(i) => i - 1,
                            };
                            self.table_state.select(Some(i));
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
