use std::fmt;

/// Structured logger scoped to one authentication attempt.
///
/// Every event carries the strategy name and the request ID (or `-` when
/// the request has none). The logger is owned rather than borrowed because
/// it travels with the completion handle, possibly to another thread.
///
/// Never pass a plaintext password to these methods. Log
/// [`Password`](crate::Password) or [`Credentials`](crate::Credentials)
/// values instead; both redact.
#[derive(Debug, Clone)]
pub struct AttemptLog {
    strategy: String,
    request_id: Option<String>,
}

impl AttemptLog {
    /// Creates a logger for one attempt.
    pub fn new(strategy: impl Into<String>, request_id: Option<&str>) -> Self {
        Self {
            strategy: strategy.into(),
            request_id: request_id.map(str::to_string),
        }
    }

    /// Returns the strategy name.
    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Returns the request ID, if the request carried one.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    fn request_id_field(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(strategy = %self.strategy, request_id = %self.request_id_field(), "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(strategy = %self.strategy, request_id = %self.request_id_field(), "{}", args);
    }

    /// Logs an error-level message.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(strategy = %self.strategy, request_id = %self.request_id_field(), "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(strategy = %self.strategy, request_id = %self.request_id_field(), "{}", args);
    }
}
