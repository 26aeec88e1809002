//! Error Types

use thiserror::Error;

/// Fallback text when the server gave us nothing to show
pub const GENERIC_SYNC_ERROR: &str = "Error updating task status";

/// Failure of a status update request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Request never completed
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with HTTP {status}")]
    Http { status: u16 },
    /// Server answered but refused the update
    #[error("server rejected update: {message}")]
    Rejected { message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no CSRF token found on page")]
    MissingCsrfToken,
}

impl SyncError {
    /// Text for the error toast. Only a server-reported rejection carries a
    /// message worth showing.
    pub fn user_message(&self) -> &str {
        match self {
            SyncError::Rejected { message } if !message.is_empty() => message,
            _ => GENERIC_SYNC_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("status endpoint {0:?} has no {{task_id}} placeholder")]
    EndpointTemplate(String),
    #[error("toast duration must be positive")]
    ToastDuration,
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("invalid board config: {0}")]
    Parse(String),
    #[error("status table has no entry for {0}")]
    MissingStatus(&'static str),
    #[error("status table lists {0} more than once")]
    DuplicateStatus(&'static str),
    #[error("percentage {percentage} for {status} is over 100")]
    Percentage { status: &'static str, percentage: u8 },
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("no window/document available")]
    NoDocument,
    #[error("board root is not an HTML element")]
    RootNotHtml,
    #[error("already attached to this element")]
    AlreadyAttached,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_shows_server_message() {
        let err = SyncError::Rejected { message: "Task not found".into() };
        assert_eq!(err.user_message(), "Task not found");
    }

    #[test]
    fn other_failures_show_generic_text() {
        assert_eq!(SyncError::Network("offline".into()).user_message(), GENERIC_SYNC_ERROR);
        assert_eq!(SyncError::Http { status: 500 }.user_message(), GENERIC_SYNC_ERROR);
        assert_eq!(SyncError::Malformed("eof".into()).user_message(), GENERIC_SYNC_ERROR);
        assert_eq!(SyncError::Rejected { message: String::new() }.user_message(), GENERIC_SYNC_ERROR);
    }
}
