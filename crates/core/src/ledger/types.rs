//! Ledger domain types for transaction drafting.
//!
//! A draft is the mutable, possibly-invalid state of the add/edit form.
//! Nothing in here is guaranteed to balance; see `validation` for that.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, ClassificationId, CurrencyId, TransactionId};

/// Minimum number of lines a double-entry transaction can have.
pub const MIN_LINES: usize = 2;

/// Side of a ledger line.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit line.
    Debit,
    /// Credit line.
    Credit,
}

/// A single line of a transaction draft.
///
/// Every field is optional while the user is still typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionLine {
    /// The account to post to.
    pub account_id: Option<AccountId>,
    /// Debit amount, positive when present.
    pub debit: Option<Decimal>,
    /// Credit amount, positive when present.
    pub credit: Option<Decimal>,
    /// Posting date of this line.
    pub date: Option<NaiveDate>,
    /// Optional classification, scoped to `account_id`.
    pub classification_id: Option<ClassificationId>,
}

impl TransactionLine {
    /// Creates a line with no account and no amount.
    #[must_use]
    pub fn blank(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Returns the debit amount if it is positive, zero otherwise.
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        positive_or_zero(self.debit)
    }

    /// Returns the credit amount if it is positive, zero otherwise.
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        positive_or_zero(self.credit)
    }

    /// Returns the positive-or-zero amount on the given side.
    #[must_use]
    pub fn amount_on(&self, side: EntrySide) -> Decimal {
        match side {
            EntrySide::Debit => self.debit_amount(),
            EntrySide::Credit => self.credit_amount(),
        }
    }

    /// Returns the side of the line when exactly one side carries a positive amount.
    #[must_use]
    pub fn side(&self) -> Option<EntrySide> {
        let has_debit = self.debit_amount() > Decimal::ZERO;
        let has_credit = self.credit_amount() > Decimal::ZERO;
        let debit_present = self.debit.is_some_and(|d| !d.is_zero());
        let credit_present = self.credit.is_some_and(|c| !c.is_zero());

        match (has_debit, has_credit) {
            (true, false) if !credit_present => Some(EntrySide::Debit),
            (false, true) if !debit_present => Some(EntrySide::Credit),
            _ => None,
        }
    }
}

fn positive_or_zero(amount: Option<Decimal>) -> Decimal {
    amount.filter(|a| *a > Decimal::ZERO).unwrap_or(Decimal::ZERO)
}

/// A single-field edit applied to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEdit {
    /// Select (or clear) the account.
    Account(Option<AccountId>),
    /// Enter (or clear) the debit amount.
    Debit(Option<Decimal>),
    /// Enter (or clear) the credit amount.
    Credit(Option<Decimal>),
    /// Pick (or clear) the posting date.
    Date(Option<NaiveDate>),
    /// Pick (or clear) the classification.
    Classification(Option<ClassificationId>),
}

/// Transaction-level values a draft can be pre-seeded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftDefaults {
    /// Transaction description.
    pub description: String,
    /// Date used for generated and newly added lines.
    pub date: Option<NaiveDate>,
    /// Amount used when generating a balanced pair.
    pub amount: Option<Decimal>,
    /// Transaction currency.
    pub currency_id: Option<CurrencyId>,
}

/// The in-progress state of the add/edit transaction form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Transaction description (required).
    pub description: String,
    /// Transaction currency (required).
    pub currency_id: Option<CurrencyId>,
    /// Default date for generated and newly added lines.
    pub default_date: Option<NaiveDate>,
    /// Default amount for the balanced-pair shortcut.
    pub default_amount: Option<Decimal>,
    /// Ordered lines; at least two for a valid transaction.
    pub lines: Vec<TransactionLine>,
}

/// A line as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLine {
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit amount, if this is a debit line.
    #[serde(default, with = "tally_shared::types::money::wire_option")]
    pub debit: Option<Decimal>,
    /// Credit amount, if this is a credit line.
    #[serde(default, with = "tally_shared::types::money::wire_option")]
    pub credit: Option<Decimal>,
    /// Posting date.
    pub date: NaiveDate,
    /// Classification, if any.
    #[serde(default)]
    pub classification_id: Option<ClassificationId>,
}

/// A transaction as persisted by the backend, used to seed edit sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTransaction {
    /// Server-assigned ID.
    pub id: TransactionId,
    /// Transaction description.
    pub description: String,
    /// Transaction currency.
    pub currency_id: CurrencyId,
    /// Persisted lines.
    #[serde(default)]
    pub lines: Vec<StoredLine>,
}

impl From<&StoredLine> for TransactionLine {
    fn from(stored: &StoredLine) -> Self {
        Self {
            account_id: Some(stored.account_id),
            debit: stored.debit,
            credit: stored.credit,
            date: Some(stored.date),
            classification_id: stored.classification_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(debit: Option<Decimal>, credit: Option<Decimal>) -> TransactionLine {
        TransactionLine {
            debit,
            credit,
            ..TransactionLine::default()
        }
    }

    #[test]
    fn test_side_single_debit() {
        assert_eq!(line(Some(dec!(10)), None).side(), Some(EntrySide::Debit));
    }

    #[test]
    fn test_side_single_credit() {
        assert_eq!(line(None, Some(dec!(10))).side(), Some(EntrySide::Credit));
    }

    #[test]
    fn test_side_zero_other_side_is_ignored() {
        assert_eq!(
            line(Some(dec!(10)), Some(dec!(0))).side(),
            Some(EntrySide::Debit)
        );
    }

    #[test]
    fn test_side_rejects_both_neither_and_negative() {
        assert_eq!(line(Some(dec!(10)), Some(dec!(5))).side(), None);
        assert_eq!(line(None, None).side(), None);
        assert_eq!(line(Some(dec!(0)), None).side(), None);
        assert_eq!(line(Some(dec!(-10)), None).side(), None);
        assert_eq!(line(Some(dec!(10)), Some(dec!(-3))).side(), None);
    }

    #[test]
    fn test_amounts_ignore_non_positive_values() {
        let l = line(Some(dec!(-4)), Some(dec!(7.25)));
        assert_eq!(l.debit_amount(), Decimal::ZERO);
        assert_eq!(l.credit_amount(), dec!(7.25));
    }

    #[test]
    fn test_stored_line_deserializes_numeric_amounts() {
        let stored: StoredLine = serde_json::from_str(
            r#"{"account_id": 10, "debit": 45.5, "credit": null, "date": "2024-03-01"}"#,
        )
        .unwrap();

        assert_eq!(stored.account_id, AccountId::new(10));
        assert_eq!(stored.debit, Some(dec!(45.5)));
        assert_eq!(stored.credit, None);
        assert_eq!(stored.classification_id, None);
    }
}
