//! Draft construction and line editing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::CurrencyId;
use tracing::{debug, warn};

use super::balance::{BalanceSummary, compute_balance};
use super::error::{LedgerError, SeedField};
use super::types::{
    DraftDefaults, LineEdit, MIN_LINES, StoredTransaction, TransactionDraft, TransactionLine,
};

impl DraftDefaults {
    /// Reconstructs form defaults from a persisted transaction.
    ///
    /// The date is the earliest line date and the amount is the larger of
    /// total debit and total credit.
    #[must_use]
    pub fn from_stored(stored: &StoredTransaction) -> Self {
        let lines: Vec<TransactionLine> = stored.lines.iter().map(TransactionLine::from).collect();
        let amount = compute_balance(&lines).display_amount();

        Self {
            description: stored.description.clone(),
            date: stored.lines.iter().map(|l| l.date).min(),
            amount: (amount > Decimal::ZERO).then_some(amount),
            currency_id: Some(stored.currency_id),
        }
    }
}

/// Generates a debit line and a credit line of the same amount.
///
/// This is a convenience seed, not a validation gate: the lines have no
/// account yet.
///
/// # Errors
///
/// Returns `LedgerError::IncompleteSeed` listing every missing input.
pub fn generate_balanced_pair(
    description: &str,
    date: Option<NaiveDate>,
    amount: Option<Decimal>,
    currency_id: Option<CurrencyId>,
) -> Result<[TransactionLine; 2], LedgerError> {
    let mut missing = Vec::new();
    if description.trim().is_empty() {
        missing.push(SeedField::Description);
    }
    if date.is_none() {
        missing.push(SeedField::Date);
    }
    let amount = amount.filter(|a| *a > Decimal::ZERO);
    if amount.is_none() {
        missing.push(SeedField::Amount);
    }
    if currency_id.is_none() {
        missing.push(SeedField::Currency);
    }

    match (date, amount) {
        (Some(date), Some(amount)) if missing.is_empty() => Ok([
            TransactionLine {
                debit: Some(amount),
                date: Some(date),
                ..TransactionLine::default()
            },
            TransactionLine {
                credit: Some(amount),
                date: Some(date),
                ..TransactionLine::default()
            },
        ]),
        _ => Err(LedgerError::IncompleteSeed { missing }),
    }
}

impl TransactionDraft {
    /// Creates a draft with two blank lines, optionally pre-seeded.
    #[must_use]
    pub fn initialize(defaults: Option<DraftDefaults>) -> Self {
        let defaults = defaults.unwrap_or_default();
        Self {
            description: defaults.description,
            currency_id: defaults.currency_id,
            default_date: defaults.date,
            default_amount: defaults.amount,
            lines: vec![TransactionLine::blank(defaults.date); MIN_LINES],
        }
    }

    /// Creates an edit draft from a persisted transaction, keeping its lines.
    #[must_use]
    pub fn from_stored(stored: &StoredTransaction) -> Self {
        let mut draft = Self::initialize(Some(DraftDefaults::from_stored(stored)));
        if !stored.lines.is_empty() {
            draft.lines = stored.lines.iter().map(TransactionLine::from).collect();
        }
        draft
    }

    /// Replaces the lines with a balanced debit/credit pair.
    ///
    /// On success the transaction-level fields take the given values. On
    /// failure the draft is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::IncompleteSeed` when an input is missing.
    pub fn seed_balanced_pair(
        &mut self,
        description: &str,
        date: Option<NaiveDate>,
        amount: Option<Decimal>,
        currency_id: Option<CurrencyId>,
    ) -> Result<(), LedgerError> {
        let pair = generate_balanced_pair(description, date, amount, currency_id).inspect_err(
            |err| warn!(error = %err, "Balanced pair not generated"),
        )?;

        self.description = description.to_string();
        self.default_date = date;
        self.default_amount = amount;
        self.currency_id = currency_id;
        self.lines = pair.to_vec();
        debug!(amount = ?amount, "Generated balanced pair");
        Ok(())
    }

    /// Replaces the lines with a balanced pair built from the draft's own fields.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::IncompleteSeed` when a field is missing.
    pub fn seed_from_defaults(&mut self) -> Result<(), LedgerError> {
        let description = self.description.clone();
        self.seed_balanced_pair(
            &description,
            self.default_date,
            self.default_amount,
            self.currency_id,
        )
    }

    /// Applies a single-field edit to one line.
    ///
    /// A positive debit clears the credit on the same line and vice versa.
    /// Selecting a different account clears the classification.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::LineOutOfRange` for an unknown index.
    pub fn set_line_field(&mut self, index: usize, edit: LineEdit) -> Result<(), LedgerError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(LedgerError::LineOutOfRange { index, len })?;

        match edit {
            LineEdit::Account(account_id) => {
                if line.account_id != account_id {
                    line.classification_id = None;
                }
                line.account_id = account_id;
            }
            LineEdit::Debit(amount) => {
                if amount.is_some_and(|a| a > Decimal::ZERO) {
                    line.credit = None;
                }
                line.debit = amount;
            }
            LineEdit::Credit(amount) => {
                if amount.is_some_and(|a| a > Decimal::ZERO) {
                    line.debit = None;
                }
                line.credit = amount;
            }
            LineEdit::Date(date) => line.date = date,
            LineEdit::Classification(classification_id) => {
                line.classification_id = classification_id;
            }
        }

        debug!(line = index, edit = ?edit, "Line edited");
        Ok(())
    }

    /// Appends a blank line dated with the draft's default date.
    ///
    /// Returns the index of the new line.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(TransactionLine::blank(self.default_date));
        self.lines.len() - 1
    }

    /// Removes a line, refusing to go below the minimum line count.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::LineOutOfRange` for an unknown index and
    /// `LedgerError::MinimumLines` when only two lines remain.
    pub fn remove_line(&mut self, index: usize) -> Result<TransactionLine, LedgerError> {
        let len = self.lines.len();
        if index >= len {
            return Err(LedgerError::LineOutOfRange { index, len });
        }
        if len <= MIN_LINES {
            return Err(LedgerError::MinimumLines { min: MIN_LINES });
        }
        Ok(self.lines.remove(index))
    }

    /// Returns the live balance of the draft's lines.
    #[must_use]
    pub fn balance(&self) -> BalanceSummary {
        compute_balance(&self.lines)
    }
}
