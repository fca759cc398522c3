pub mod app;
pub mod input;
pub mod results;
pub mod toast;

pub use app::App;
pub use input::InputWidget;
pub use results::ResultsList;
pub use toast::{Toast, ToastLevel};

use crate::config::Config;
use crate::event::Event;
use crate::search::ProviderRegistry;
use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self as term_event, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

/// Run the TUI application until the user quits
pub async fn run(config: Config, registry: ProviderRegistry) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, registry);

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.handle_event(Event::Tick)?;
        app.poll_outcomes();

        terminal.draw(|frame| app.render(frame))?;

        if term_event::poll(Duration::from_millis(16))? {
            match term_event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_event(Event::Key(key))?;
                }
                TermEvent::Resize(w, h) => {
                    app.handle_event(Event::Resize(w, h))?;
                }
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
