use crossterm::event::KeyEvent;

/// Events that can occur in the application
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal resize event (reserved for future use)
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Tick event for periodic updates (toast expiry, result polling)
    Tick,
    /// Request to quit the application
    Quit,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;
