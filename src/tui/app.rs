use crate::config::Config;
use crate::event::{Event, EventResult};
use crate::export;
use crate::search::{ImageRecord, ProviderId, ProviderRegistry, SearchError, SearchSession};
use crate::tui::{InputWidget, ResultsList, Toast, ToastLevel};
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Tagged outcome of one spawned search task
type SearchOutcome = (u64, Result<Vec<ImageRecord>, SearchError>);

/// Which snippet a copy action produces
#[derive(Debug, Clone, Copy)]
enum CopyKind {
    Markup,
    Component,
    Url,
}

/// Main application state
pub struct App {
    /// Provider lookup shared with spawned search tasks
    registry: Arc<ProviderRegistry>,
    /// Query/provider/results state machine
    session: SearchSession,
    /// Search box
    pub input: InputWidget,
    /// Result list with selection
    results: ResultsList,
    /// Clipboard handle; absence degrades to an error toast
    clipboard: Option<Clipboard>,
    /// Transient notification
    toast: Option<Toast>,
    /// Channel carrying search outcomes back from spawned tasks
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SearchOutcome>,
    /// Whether the application should quit
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config, registry: ProviderRegistry) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            registry: Arc::new(registry),
            session: SearchSession::new(config.startup_provider()),
            input: InputWidget::new(),
            results: ResultsList::new(),
            clipboard: Clipboard::new().ok(),
            toast: None,
            outcome_tx,
            outcome_rx,
            should_quit: false,
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => {
                self.update_toast();
                Ok(())
            }
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Apply finished searches (non-blocking)
    pub fn poll_outcomes(&mut self) {
        while let Ok((seq, outcome)) = self.outcome_rx.try_recv() {
            match self.session.complete(seq, outcome) {
                Some(Ok(count)) => {
                    self.results.reset(count);
                    self.toast = Some(Toast::info(format!(
                        "Found {count} images for \"{}\"",
                        self.session.query
                    )));
                }
                Some(Err(err)) => {
                    self.toast = Some(Toast::error(err.to_string()));
                }
                // Superseded by a newer search; nothing to show.
                None => {}
            }
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return Ok(());
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => {
                self.session.select_provider(self.session.provider.next());
                return Ok(());
            }
            (KeyCode::BackTab, _) => {
                self.session.select_provider(self.session.provider.prev());
                return Ok(());
            }
            (KeyCode::Up, _) => {
                self.results.select_prev();
                return Ok(());
            }
            (KeyCode::Down, _) => {
                self.results.select_next(self.session.results.len());
                return Ok(());
            }
            (KeyCode::Enter, _) => {
                self.submit_search();
                return Ok(());
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.copy_selected(CopyKind::Markup);
                return Ok(());
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.copy_selected(CopyKind::Component);
                return Ok(());
            }
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => {
                self.copy_selected(CopyKind::Url);
                return Ok(());
            }
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                self.open_selected();
                return Ok(());
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.input.clear();
                return Ok(());
            }
            _ => {}
        }

        // Everything else goes to the search box.
        self.input.handle_key(key);
        Ok(())
    }

    /// Start a search for the current input text.
    ///
    /// Submitting while a search is in flight supersedes it; the older
    /// response gets discarded by its stale sequence number.
    fn submit_search(&mut self) {
        match self.session.begin_search(&self.registry, &self.input.text()) {
            Ok(ticket) => {
                self.results.reset(0);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let outcome = ticket.run().await;
                    let _ = tx.send(outcome); // receiver dropped on quit
                });
            }
            Err(err) => {
                self.toast = Some(Toast::error(err.to_string()));
            }
        }
    }

    fn selected_record(&self) -> Option<&ImageRecord> {
        self.results
            .selected()
            .and_then(|i| self.session.results.get(i))
    }

    /// Copy a snippet for the selected record to the clipboard
    fn copy_selected(&mut self, kind: CopyKind) {
        let Some(record) = self.selected_record() else {
            self.toast = Some(Toast::error("No image selected"));
            return;
        };

        let (snippet, label) = match kind {
            CopyKind::Markup => (export::format_as_markup(record), "HTML code"),
            CopyKind::Component => (export::format_as_component(record), "Component code"),
            CopyKind::Url => (export::format_as_url(record), "Image URL"),
        };

        match self.clipboard.as_mut() {
            Some(clipboard) => {
                if clipboard.set_text(&snippet).is_ok() {
                    self.toast = Some(Toast::info(format!("{label} copied to clipboard")));
                } else {
                    self.toast = Some(Toast::error("Failed to copy to clipboard"));
                }
            }
            None => {
                self.toast = Some(Toast::error("Clipboard not available"));
            }
        }
    }

    /// Open the selected record's page on the provider's site
    fn open_selected(&mut self) {
        let Some(record) = self.selected_record() else {
            self.toast = Some(Toast::error("No image selected"));
            return;
        };
        let url = record.original_url.clone();

        match open::that(&url) {
            Ok(()) => {
                self.toast = Some(Toast::info("Opening original page"));
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "failed to open browser");
                self.toast = Some(Toast::error("Failed to open browser"));
            }
        }
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Provider tabs
                Constraint::Length(3), // Search input
                Constraint::Min(5),    // Results + detail
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        self.render_tabs(frame, chunks[0]);
        self.input.render(frame, chunks[1]);
        self.render_results(frame, chunks[2]);
        self.render_status(frame, chunks[3]);
    }

    /// Render the provider selector
    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ProviderId::ALL
            .iter()
            .map(|p| Line::from(p.display_name()))
            .collect();
        let selected = ProviderId::ALL
            .iter()
            .position(|p| *p == self.session.provider)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(" Image Library ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the result list and the detail pane for the selection
    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.results.render(
            frame,
            panes[0],
            &self.session.results,
            self.session.is_loading(),
        );
        let selected = self
            .results
            .selected()
            .and_then(|i| self.session.results.get(i));
        self.results.render_detail(frame, panes[1], selected);
    }

    /// Render status bar; an active toast takes the line over
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.toast {
            Some(toast) => {
                let color = match toast.level {
                    ToastLevel::Info => Color::LightGreen,
                    ToastLevel::Error => Color::LightRed,
                };
                Line::from(Span::styled(
                    toast.message.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Yellow)),
                Span::raw(if self.session.is_loading() {
                    "Searching..."
                } else {
                    "Ready"
                }),
                Span::raw(" | "),
                Span::styled("Results: ", Style::default().fg(Color::Cyan)),
                Span::raw(self.session.results.len().to_string()),
                Span::raw(" | "),
                Span::styled(
                    "Ctrl+E",
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" html  "),
                Span::styled("Ctrl+R", Style::default().fg(Color::DarkGray)),
                Span::raw(" component  "),
                Span::styled("Ctrl+Y", Style::default().fg(Color::DarkGray)),
                Span::raw(" url  "),
                Span::styled("Ctrl+O", Style::default().fg(Color::DarkGray)),
                Span::raw(" open  "),
                Span::styled("Esc", Style::default().fg(Color::DarkGray)),
                Span::raw(" quit"),
            ]),
        };

        let status = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(status, area);
    }
}
