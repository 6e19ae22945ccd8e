/// Notification severity, as understood by the toast layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An action succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// An action failed.
    Error,
}

/// A fire-and-forget user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How the notice is styled.
    pub severity: Severity,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Sink for user notifications. Delivery is not acknowledged.
pub trait Notifier: Send + Sync {
    /// Show `notice` to the user.
    fn notify(&self, notice: Notice);
}
