use std::path::PathBuf;

/// Why a single weighting record could not be turned into a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("expected at least 17 tokens, found {0}")]
    TooFewTokens(usize),

    #[error("expected at most 18 tokens, found {0}")]
    TooManyTokens(usize),

    #[error("invalid range {which} '{token}'")]
    InvalidRangeBound { which: &'static str, token: String },

    #[error("range start {start} is greater than range end {end}")]
    InvertedRange { start: i32, end: i32 },

    #[error("unknown method '{0}' (expected MOD10, MOD11 or DBLAL)")]
    UnknownMethod(String),

    #[error("invalid weight '{token}' at position {position}")]
    InvalidWeight { position: usize, token: String },
}

/// Errors raised while building a [`WeightingTable`](super::WeightingTable).
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read weighting table at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid weighting record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RuleError,
    },
}
