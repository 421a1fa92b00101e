//! Property-based tests for draft editing.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, ClassificationId, CurrencyId};

use super::draft::generate_balanced_pair;
use super::balance::compute_balance;
use super::types::{LineEdit, TransactionDraft};

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate calendar dates in 2020-2029.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A generated pair always balances at exactly the requested amount.
    #[test]
    fn prop_generated_pair_is_balanced(
        amount in positive_amount(),
        date in any_date(),
        currency in 1i64..50,
    ) {
        let lines = generate_balanced_pair(
            "Groceries",
            Some(date),
            Some(amount),
            Some(CurrencyId::new(currency)),
        )
        .unwrap();

        let summary = compute_balance(&lines);
        prop_assert!(summary.is_balanced);
        prop_assert_eq!(summary.total_debit, amount);
        prop_assert_eq!(summary.total_credit, amount);
        prop_assert!(lines.iter().all(|l| l.date == Some(date) && l.account_id.is_none()));
    }

    /// Setting a positive debit clears the credit; applying it twice changes nothing.
    #[test]
    fn prop_debit_clears_credit_idempotently(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        let mut draft = TransactionDraft::initialize(None);
        draft.set_line_field(0, LineEdit::Credit(Some(credit))).unwrap();

        draft.set_line_field(0, LineEdit::Debit(Some(debit))).unwrap();
        let once = draft.clone();
        draft.set_line_field(0, LineEdit::Debit(Some(debit))).unwrap();

        prop_assert_eq!(draft.lines[0].debit, Some(debit));
        prop_assert_eq!(draft.lines[0].credit, None);
        prop_assert_eq!(&draft, &once);
    }

    /// Setting a positive credit clears the debit.
    #[test]
    fn prop_credit_clears_debit(debit in positive_amount(), credit in positive_amount()) {
        let mut draft = TransactionDraft::initialize(None);
        draft.set_line_field(1, LineEdit::Debit(Some(debit))).unwrap();
        draft.set_line_field(1, LineEdit::Credit(Some(credit))).unwrap();

        prop_assert_eq!(draft.lines[1].debit, None);
        prop_assert_eq!(draft.lines[1].credit, Some(credit));
    }

    /// Switching to a different account always drops the classification.
    #[test]
    fn prop_account_change_clears_classification(
        first in 1i64..1_000,
        offset in 1i64..1_000,
        classification in 1i64..1_000,
    ) {
        let mut draft = TransactionDraft::initialize(None);
        draft.set_line_field(0, LineEdit::Account(Some(AccountId::new(first)))).unwrap();
        draft
            .set_line_field(0, LineEdit::Classification(Some(ClassificationId::new(classification))))
            .unwrap();

        draft
            .set_line_field(0, LineEdit::Account(Some(AccountId::new(first + offset))))
            .unwrap();

        prop_assert_eq!(draft.lines[0].classification_id, None);
    }
}
