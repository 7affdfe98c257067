//! Error types for the rank-overlap crate.
//!
//! Messages are stable lowercase strings so callers can match on them
//! in tests and surface them to users unchanged.

/// Errors raised while building or reading ranked lists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankError {
    /// A non-positive position was passed to 1-indexed access.
    #[error("invalid position {0}: ranked lists are 1-indexed")]
    InvalidPosition(i64),

    /// A position past the end of the list was requested.
    #[error("position {position} out of range for list of length {len}")]
    PositionOutOfRange {
        /// Requested 1-based position.
        position: i64,
        /// Number of entries in the list.
        len: usize,
    },

    /// The list mixes bare identifiers and structured records.
    #[error("inconsistent entry shape at position {position}: expected {expected}, found {found}")]
    InconsistentEntryShape {
        /// 1-based position of the first entry that disagrees with the list shape.
        position: usize,
        /// Shape established by the first entry.
        expected: &'static str,
        /// Shape of the offending entry.
        found: &'static str,
    },

    /// A structured record has no identifier under the configured field.
    #[error("record at position {position} has no `{field}` identifier field")]
    MissingIdentifier {
        /// 1-based position of the record.
        position: usize,
        /// Identifier field that was looked up.
        field: String,
    },

    /// An entry (or record identifier) is not a string or number.
    #[error("invalid identifier at position {position}: {reason}")]
    InvalidIdentifier {
        /// 1-based position of the entry.
        position: usize,
        /// What was found instead.
        reason: String,
    },

    /// The raw value is neither a sequence nor a wrapper holding one.
    #[error("not a ranked sequence: {0}")]
    NotASequence(String),

    /// Invalid scorer configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for rank-overlap results.
pub type Result<T> = std::result::Result<T, RankError>;
