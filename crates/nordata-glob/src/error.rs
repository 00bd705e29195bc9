use thiserror::Error;

/// Errors produced when parsing a key pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern has no `*`; it names a single literal key.
    #[error("pattern has no wildcard: {0}")]
    NoWildcard(String),

    /// The pattern has more than one `*`.
    #[error("pattern {pattern:?} has {count} wildcards, at most one is allowed")]
    MultipleWildcards { pattern: String, count: usize },
}
