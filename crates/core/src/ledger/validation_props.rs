//! Property-based tests for draft validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, CurrencyId};

use super::types::{TransactionDraft, TransactionLine};
use super::payload::{TransactionPayload, to_submission_payload};
use super::validation::{Violation, validate};

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a complete, single-sided line.
fn valid_line() -> impl Strategy<Value = TransactionLine> {
    (positive_amount(), any::<bool>(), 1i64..1_000i64).prop_map(|(amount, is_debit, account)| {
        TransactionLine {
            account_id: Some(AccountId::new(account)),
            debit: is_debit.then_some(amount),
            credit: (!is_debit).then_some(amount),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            classification_id: None,
        }
    })
}

fn make_draft(lines: Vec<TransactionLine>) -> TransactionDraft {
    TransactionDraft {
        description: "Test transaction".to_string(),
        currency_id: Some(CurrencyId::new(1)),
        default_date: None,
        default_amount: None,
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Fewer than two lines is rejected regardless of balance.
    #[test]
    fn prop_fewer_than_two_lines_rejected(lines in prop::collection::vec(valid_line(), 0..2)) {
        let count = lines.len();
        let result = validate(&make_draft(lines));

        prop_assert!(result.is_err());
        let errors = result.unwrap_err();
        prop_assert!(
            errors.contains(|v| *v == Violation::InsufficientLines { count }),
            "Expected InsufficientLines, got: {:?}",
            errors
        );
    }

    /// Any set of lines whose totals differ is rejected as unbalanced.
    #[test]
    fn prop_unequal_totals_rejected(lines in prop::collection::vec(valid_line(), 2..8)) {
        let debit: Decimal = lines.iter().map(TransactionLine::debit_amount).sum();
        let credit: Decimal = lines.iter().map(TransactionLine::credit_amount).sum();
        prop_assume!(debit != credit);

        let errors = validate(&make_draft(lines)).unwrap_err();
        let unbalanced = errors.contains(|v| *v == Violation::Unbalanced { debit, credit });
        prop_assert!(unbalanced, "Expected Unbalanced, got: {:?}", errors);
    }

    /// Equal totals built from a split debit are accepted.
    #[test]
    fn prop_split_debit_balanced_accepted(a in positive_amount(), b in positive_amount()) {
        let mut lines = vec![
            TransactionLine { debit: Some(a), ..base_line(1) },
            TransactionLine { debit: Some(b), ..base_line(2) },
            TransactionLine { credit: Some(a + b), ..base_line(3) },
        ];
        lines.rotate_left(usize::try_from(a.mantissa() % 3).unwrap_or(0));

        let validated = validate(&make_draft(lines));
        prop_assert!(validated.is_ok(), "Expected valid, got: {:?}", validated);
        prop_assert_eq!(validated.unwrap().total(), a + b);
    }

    /// Zero totals are rejected even though debit == credit.
    #[test]
    fn prop_zero_totals_rejected(count in 2usize..6) {
        let lines = (0..count).map(|i| base_line(i64::try_from(i).unwrap_or(1) + 1)).collect();
        let errors = validate(&make_draft(lines)).unwrap_err();
        prop_assert!(errors.contains(|v| *v == Violation::ZeroTotal));
    }
}

fn base_line(account: i64) -> TransactionLine {
    TransactionLine {
        account_id: Some(AccountId::new(account)),
        date: NaiveDate::from_ymd_opt(2024, 1, 15),
        ..TransactionLine::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any in-range amount reaches the wire with its exact decimal digits.
    #[test]
    fn prop_payload_amounts_survive_json(cents in 1i64..=99_999_999_999_999i64) {
        let amount = Decimal::new(cents, 2);
        let draft = make_draft(vec![
            TransactionLine { debit: Some(amount), ..base_line(1) },
            TransactionLine { credit: Some(amount), ..base_line(2) },
        ]);
        let payload = to_submission_payload(&validate(&draft).unwrap());

        let json = serde_json::to_string(&payload).unwrap();
        let back: TransactionPayload = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, payload);
    }
}
