// ================================================================
// File: alerta-common/src/error.rs
// ================================================================

use thiserror::Error;
use uuid::Uuid;

/// Infrastructure-level failures: the store is unreachable, a stored
/// record is malformed, and so on. These are the only fatal category;
/// domain outcomes live in the typed enums below.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Uuid error: {0}")]
    Uuid(#[from] uuid::Error),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<chrono::format::ParseError> for Error {
    fn from(err: chrono::format::ParseError) -> Self {
        Error::Parse(err.to_string())
    }
}

/// Outcomes of a status transition attempt. All variants except
/// `Infrastructure` are expected, recoverable results the caller is
/// supposed to branch on ("someone already handled this"), never panics.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("alert {0} not found")]
    NotFound(Uuid),

    #[error("alert {0} is already terminal")]
    AlreadyTerminal(Uuid),

    #[error(transparent)]
    Infrastructure(#[from] Error),
}

/// Outcomes of an acknowledgment attempt. A duplicate acknowledgment is
/// not an error; it simply returns the alert unchanged.
#[derive(Debug, Error)]
pub enum AckError {
    #[error("alert {0} not found")]
    NotFound(Uuid),

    #[error("user {user_id} is not a recipient of alert {alert_id}")]
    NotNotified { alert_id: Uuid, user_id: Uuid },

    #[error("alert {0} is no longer active")]
    AlertTerminal(Uuid),

    #[error(transparent)]
    Infrastructure(#[from] Error),
}

/// Outcomes of chat operations scoped to one alert.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("alert {0} not found")]
    NotFound(Uuid),

    #[error("alert {0} is closed to new messages")]
    AlertTerminal(Uuid),

    #[error("message text is empty")]
    EmptyMessage,

    #[error(transparent)]
    Infrastructure(#[from] Error),
}
