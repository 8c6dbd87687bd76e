use crate::table::TableError;

/// Reasons a validation request is rejected outright.
///
/// An error is never returned alongside outcomes: a request either yields a
/// full [`ValidationResult`](super::ValidationResult) or one of these.
#[derive(Debug, thiserror::Error)]
pub enum ModulusError {
    #[error("{field} {reason}")]
    MalformedInput { field: &'static str, reason: String },

    #[error("weighting table could not be loaded: {0}")]
    TableLoad(#[from] TableError),

    #[error("no matching weighting rule for sort code {sort_code}")]
    NoMatchingRule { sort_code: String },
}
