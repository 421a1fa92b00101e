//! Ledger error types for draft editing.
//!
//! These are raised by builder operations that the user invoked with
//! incomplete input. Structural problems of a whole draft are reported by
//! `validation::ValidationErrors` instead.

use std::fmt;

use thiserror::Error;

/// Transaction-level field required to generate a balanced pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedField {
    /// Description is empty.
    Description,
    /// Date is not set.
    Date,
    /// Amount is missing or not positive.
    Amount,
    /// Currency is not selected.
    Currency,
}

impl fmt::Display for SeedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => write!(f, "description"),
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "positive amount"),
            Self::Currency => write!(f, "currency"),
        }
    }
}

fn join_fields(fields: &[SeedField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur while editing a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Line index does not exist.
    #[error("Line {index} does not exist (draft has {len} lines)")]
    LineOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of lines in the draft.
        len: usize,
    },

    /// Removing a line would leave fewer than the minimum.
    #[error("A transaction needs at least {min} lines")]
    MinimumLines {
        /// Minimum number of lines.
        min: usize,
    },

    /// Balanced-pair generation is missing inputs.
    #[error("Cannot generate lines, please fill in: {}", join_fields(.missing))]
    IncompleteSeed {
        /// Every missing field, in form order.
        missing: Vec<SeedField>,
    },
}

impl LedgerError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::LineOutOfRange { .. } => "LINE_OUT_OF_RANGE",
            Self::MinimumLines { .. } => "MINIMUM_LINES",
            Self::IncompleteSeed { .. } => "INCOMPLETE_SEED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::LineOutOfRange { index: 3, len: 2 }.error_code(),
            "LINE_OUT_OF_RANGE"
        );
        assert_eq!(LedgerError::MinimumLines { min: 2 }.error_code(), "MINIMUM_LINES");
        assert_eq!(
            LedgerError::IncompleteSeed { missing: vec![] }.error_code(),
            "INCOMPLETE_SEED"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::LineOutOfRange { index: 3, len: 2 }.to_string(),
            "Line 3 does not exist (draft has 2 lines)"
        );
        assert_eq!(
            LedgerError::IncompleteSeed {
                missing: vec![SeedField::Description, SeedField::Amount],
            }
            .to_string(),
            "Cannot generate lines, please fill in: description, positive amount"
        );
    }
}
