//! Wire shape of a transaction sent to the backend.
//!
//! ```json
//! {"description": "Groceries", "currency_id": 1,
//!  "lines": [{"account_id": 10, "debit": 45.5, "credit": null,
//!             "date": "2024-03-01", "classification_id": null}]}
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, ClassificationId, CurrencyId};

use super::types::EntrySide;
use super::validation::ValidatedTransaction;

/// One line of the submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePayload {
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit amount, `null` on credit lines.
    #[serde(with = "tally_shared::types::money::wire_option")]
    pub debit: Option<Decimal>,
    /// Credit amount, `null` on debit lines.
    #[serde(with = "tally_shared::types::money::wire_option")]
    pub credit: Option<Decimal>,
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Classification, `null` when unset.
    pub classification_id: Option<ClassificationId>,
}

/// Body of `POST /transactions` and `PUT /transactions/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// Transaction description.
    pub description: String,
    /// Transaction currency.
    pub currency_id: CurrencyId,
    /// At least two balanced lines.
    pub lines: Vec<LinePayload>,
}

/// Maps a validated transaction to the backend's wire shape.
#[must_use]
pub fn to_submission_payload(transaction: &ValidatedTransaction) -> TransactionPayload {
    let lines = transaction
        .lines()
        .iter()
        .map(|line| {
            let (debit, credit) = match line.side {
                EntrySide::Debit => (Some(line.amount), None),
                EntrySide::Credit => (None, Some(line.amount)),
            };
            LinePayload {
                account_id: line.account_id,
                debit,
                credit,
                date: line.date,
                classification_id: line.classification_id,
            }
        })
        .collect();

    TransactionPayload {
        description: transaction.description().to_string(),
        currency_id: transaction.currency_id(),
        lines,
    }
}
