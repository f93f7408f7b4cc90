//! Errors for parsing grid configuration names from text.

/// Error type for grid configuration lookups.
///
/// Building column sets never fails; only turning user-supplied names
/// (route segments, environment variables) into typed values can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("Unknown layout variant: {0}")]
    UnknownLayoutVariant(String),
}
