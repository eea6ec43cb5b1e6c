/// Failure kinds raised by the seed scanning core.
///
/// Every variant is scoped to a single candidate, seed or input artifact;
/// the batch driver logs and skips candidate-level failures.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("no alignment record matches identifier fragment '{fragment}'")]
    AnchorNotFound { fragment: String },

    #[error("identifier fragment '{fragment}' matches {} records: {}", .matches.len(), .matches.join(", "))]
    AmbiguousAnchor {
        fragment: String,
        matches: Vec<String>,
    },

    #[error("malformed candidate '{sequence}': {reason}")]
    MalformedCandidate { sequence: String, reason: String },

    #[error("seed at position {position} maps to columns {column}..{end} past alignment width {width}")]
    WindowOutOfBounds {
        position: usize,
        column: usize,
        end: usize,
        width: usize,
    },

    #[error("record '{id}' has aligned length {found}, expected {expected}")]
    RaggedAlignment {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("alignment contains no records")]
    EmptyAlignment,

    #[error("record '{id}' has invalid symbol '{symbol}' at column {column}")]
    InvalidSymbol {
        id: String,
        symbol: char,
        column: usize,
    },

    #[error("malformed {field} list: {value}")]
    MalformedList { field: &'static str, value: String },
}
