//! Plain-text rendering of drafts and listings.

use rust_decimal::Decimal;
use tally_core::ledger::{BalanceSummary, TransactionDraft, ValidationErrors};
use tally_core::reference::{Account, Classification};
use tally_shared::types::round_money;

/// Formats an amount with two decimal places.
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Renders the live balance line shown under a draft.
pub fn balance(summary: &BalanceSummary) -> String {
    let status = if summary.overflowed {
        "totals too large".to_string()
    } else if summary.is_balanced {
        "balanced".to_string()
    } else {
        format!("off by {}", money(summary.difference().abs()))
    };
    format!(
        "Debit {}  Credit {}  ({status})",
        money(summary.total_debit),
        money(summary.total_credit)
    )
}

/// Renders draft lines, resolving account and classification names.
pub fn draft(
    draft: &TransactionDraft,
    accounts: &[Account],
    classifications: &[Classification],
) -> String {
    let mut rows = vec![format!("Description: {}", draft.description)];
    if let Some(date) = draft.default_date {
        rows.push(format!("Date:        {date}"));
    }
    if let Some(amount) = draft.default_amount {
        rows.push(format!("Amount:      {}", money(amount)));
    }

    for (index, line) in draft.lines.iter().enumerate() {
        let account = line.account_id.map_or_else(
            || "(no account)".to_string(),
            |id| {
                accounts
                    .iter()
                    .find(|a| a.id == id)
                    .map_or_else(|| format!("#{id}"), |a| a.name.clone())
            },
        );
        let classification = line
            .classification_id
            .and_then(|id| classifications.iter().find(|c| c.id == id))
            .map(|c| format!(" [{}]", c.name))
            .unwrap_or_default();
        let date = line.date.map(|d| d.to_string()).unwrap_or_default();
        rows.push(format!(
            "{:>3}. {date:<10}  {account:<24} {:>12} {:>12}{classification}",
            index + 1,
            line.debit.map(money).unwrap_or_default(),
            line.credit.map(money).unwrap_or_default(),
        ));
    }

    rows.push(balance(&draft.balance()));
    rows.join("\n")
}

/// Renders validation failures one per line.
pub fn violations(errors: &ValidationErrors) -> String {
    errors
        .violations()
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
