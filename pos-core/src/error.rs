//! Error types shared by the widget crates.

use thiserror::Error;

/// Reasons a bulk action request is refused before any callback runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkActionError {
    #[error("Please select an action")]
    NoActionSelected,
    #[error("Please select at least one row")]
    NoRowsSelected,
    #[error("No bulk action registered with id '{0}'")]
    UnknownAction(String),
}

impl BulkActionError {
    /// Whether the failure should be shown to the user as a blocking alert.
    ///
    /// An unknown action id can only come from a page/config mismatch, so it
    /// is logged rather than surfaced.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, BulkActionError::UnknownAction(_))
    }
}

/// Failure to read the page-supplied initialization configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid widget configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid data-actions attribute on table '{table}': {source}")]
    Actions {
        table: String,
        #[source]
        source: serde_json::Error,
    },
}
