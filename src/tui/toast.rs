use std::time::{Duration, Instant};

/// Severity of a toast notification, picks its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// Transient notification shown in the status bar
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info, Duration::from_secs(2))
    }

    /// Errors linger a little longer than confirmations
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error, Duration::from_secs(4))
    }

    fn new(message: impl Into<String>, level: ToastLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
