use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tui_textarea::TextArea;

const TITLE: &str = " 🔍 Search (Enter=search │ Tab=provider │ Ctrl+U=clear) ";

/// Single-line search box wrapper around tui-textarea
pub struct InputWidget {
    textarea: TextArea<'static>,
}

impl InputWidget {
    /// Create a new input widget
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_block(framed_block());
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("nature, technology, business...");

        Self { textarea }
    }

    /// Handle keyboard input. Enter never reaches the textarea; the caller
    /// turns it into a search instead.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let input = tui_textarea::Input::from(key);
        if input.key != tui_textarea::Key::Enter {
            self.textarea.input(input);
        }
    }

    /// Current text; the query stays visible after submitting
    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    /// Wipe the input
    pub fn clear(&mut self) {
        self.textarea = TextArea::default();
        self.textarea.set_block(framed_block());
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_placeholder_text("nature, technology, business...");
    }

    /// Render the input widget
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}

fn framed_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::DarkGray))
}

impl Default for InputWidget {
    fn default() -> Self {
        Self::new()
    }
}
