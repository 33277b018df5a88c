//! Error types for position-code lookups.

use thiserror::Error;

/// Failure outcomes of the codec.
///
/// These are expected, recoverable results: callers branch on them rather
/// than treat them as exceptional. The keystroke session never surfaces them;
/// a failed resolution there becomes `Action::CommitFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Zone or position outside 1..=94.
    #[error("position code {zone:02}{position:02} is out of range (zone and position must be 1-94)")]
    OutOfRange { zone: u32, position: u32 },

    /// Valid coordinates with no assigned, printable character.
    #[error("no character at zone {zone:02} position {position:02}")]
    NotFound { zone: u32, position: u32 },

    /// A key payload that is not an ASCII decimal digit.
    #[error("invalid digit: {0:?}")]
    InvalidDigit(char),

    /// Text that is not exactly four ASCII digits.
    #[error("malformed position code: {0:?} (expected four digits)")]
    MalformedCode(String),
}

impl CodeError {
    /// True for the `NotFound` outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodeError::NotFound { .. })
    }

    /// True for the `OutOfRange` outcome.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, CodeError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, CodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_coordinates() {
        let err = CodeError::NotFound { zone: 1, position: 1 };
        assert_eq!(err.to_string(), "no character at zone 01 position 01");

        let err = CodeError::OutOfRange { zone: 95, position: 1 };
        assert!(err.to_string().starts_with("position code 9501"));
    }

    #[test]
    fn test_kind_predicates() {
        assert!(CodeError::NotFound { zone: 1, position: 1 }.is_not_found());
        assert!(CodeError::OutOfRange { zone: 0, position: 1 }.is_out_of_range());
        assert!(!CodeError::InvalidDigit('x').is_not_found());
    }
}
