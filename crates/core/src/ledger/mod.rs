//! Double-entry transaction drafting.
//!
//! This module implements the form-side ledger logic:
//! - Draft and line types
//! - Draft construction and line editing
//! - Balance computation
//! - Rule validation with per-line violations
//! - The submission payload sent to the backend

pub mod balance;
pub mod draft;
pub mod error;
pub mod payload;
pub mod types;
pub mod validation;

#[cfg(test)]
mod draft_props;
#[cfg(test)]
mod validation_props;

pub use balance::{BalanceSummary, compute_balance};
pub use draft::generate_balanced_pair;
pub use error::{LedgerError, SeedField};
pub use payload::{LinePayload, TransactionPayload, to_submission_payload};
pub use types::{
    DraftDefaults, EntrySide, LineEdit, MIN_LINES, StoredLine, StoredTransaction,
    TransactionDraft, TransactionLine,
};
pub use validation::{ValidatedLine, ValidatedTransaction, ValidationErrors, Violation, validate};
