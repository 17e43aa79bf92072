use thiserror::Error;

/// Errors raised while building the text tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizerError {
    /// Tags can only be impressed onto a string with the same character count
    /// as the tag-free text they were extracted from
    #[error("length mismatch: tag-free text has {expected} chars, replacement has {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
}
