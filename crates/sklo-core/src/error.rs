//! # Error Types
//!
//! The pricing and sizing engines are total - malformed numbers degrade to
//! zero or minimum-clamped values instead of failing, so there is no error
//! taxonomy for them. The one fallible surface is parsing selector strings
//! (side mode, back material) arriving as free text, and that is all this
//! module covers.

use thiserror::Error;

/// Failure to parse a selector string at the text boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// Side-mode strings are `none`, `left`, `right` or `both`.
    #[error("unknown side mode: {0}")]
    UnknownSideMode(String),

    /// Back-material strings are `glass6` or `board8`.
    #[error("unknown back panel material: {0}")]
    UnknownMaterial(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_the_offending_token() {
        let err = SelectorError::UnknownSideMode("top".to_string());
        assert_eq!(err.to_string(), "unknown side mode: top");

        let err = SelectorError::UnknownMaterial("plywood".to_string());
        assert_eq!(err.to_string(), "unknown back panel material: plywood");
    }
}
