//! Business rule validation for transaction drafts.
//!
//! Every rule is checked and every violation is reported, so the form can
//! show all problems at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, ClassificationId, CurrencyId, check_amount};
use thiserror::Error;

use super::balance::compute_balance;
use super::types::{EntrySide, MIN_LINES, TransactionDraft};

/// A single broken rule, optionally tied to a line index (0-based).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Fewer than two lines.
    #[error("Transaction must have at least 2 lines, found {count}")]
    InsufficientLines {
        /// Number of lines in the draft.
        count: usize,
    },

    /// Debit and credit totals differ.
    #[error("Transaction is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Totals are equal but zero.
    #[error("Transaction total cannot be zero")]
    ZeroTotal,

    /// A debit or credit total is too large to compute.
    #[error("Transaction totals are too large to add up")]
    TotalOverflow,

    /// Line has both, neither, or a non-positive amount.
    #[error("Line {}: enter exactly one positive debit or credit amount", .line + 1)]
    AmountSide {
        /// Offending line index.
        line: usize,
    },

    /// Line amount has sub-cent precision or exceeds the maximum.
    #[error("Line {}: amount must have at most 2 decimal places and not exceed 999,999,999,999.99", .line + 1)]
    AmountOutOfRange {
        /// Offending line index.
        line: usize,
    },

    /// Line has no account.
    #[error("Line {}: account is required", .line + 1)]
    MissingAccount {
        /// Offending line index.
        line: usize,
    },

    /// Line has no date.
    #[error("Line {}: date is required", .line + 1)]
    MissingDate {
        /// Offending line index.
        line: usize,
    },

    /// Description is blank.
    #[error("Description is required")]
    EmptyDescription,

    /// No currency selected.
    #[error("Currency is required")]
    MissingCurrency,
}

impl Violation {
    /// Returns the offending line index, if the rule is per-line.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::AmountSide { line }
            | Self::AmountOutOfRange { line }
            | Self::MissingAccount { line }
            | Self::MissingDate { line } => Some(*line),
            _ => None,
        }
    }

    /// Returns the stable error code for the broken rule.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines { .. } => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_TRANSACTION",
            Self::ZeroTotal => "ZERO_TOTAL",
            Self::TotalOverflow => "TOTAL_OVERFLOW",
            Self::AmountSide { .. } => "INVALID_AMOUNT_SIDE",
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::MissingAccount { .. } => "MISSING_ACCOUNT",
            Self::MissingDate { .. } => "MISSING_DATE",
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::MissingCurrency => "MISSING_CURRENCY",
        }
    }
}

/// All violations found in a draft. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transaction failed validation with {} problem(s)", .0.len())]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// Returns the violations in rule order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Returns the violations tied to the given line.
    pub fn for_line(&self, line: usize) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.line() == Some(line))
    }

    /// Returns true if any violation matches the predicate.
    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.0.iter().any(predicate)
    }
}

/// A line that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLine {
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: EntrySide,
    /// Positive amount on `side`.
    pub amount: Decimal,
    /// Posting date.
    pub date: NaiveDate,
    /// Classification, if any.
    pub classification_id: Option<ClassificationId>,
}

/// A draft that satisfied every rule. Only `validate` constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    description: String,
    currency_id: CurrencyId,
    lines: Vec<ValidatedLine>,
    total: Decimal,
}

impl ValidatedTransaction {
    /// Returns the trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the transaction currency.
    #[must_use]
    pub fn currency_id(&self) -> CurrencyId {
        self.currency_id
    }

    /// Returns the validated lines in draft order.
    #[must_use]
    pub fn lines(&self) -> &[ValidatedLine] {
        &self.lines
    }

    /// Returns the balanced total (debits == credits).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// Validates a draft against every double-entry rule.
///
/// Rules, in report order:
/// 1. at least two lines
/// 2. equal, non-zero debit and credit totals that do not overflow
/// 3. each line has exactly one positive side, within the money bounds
/// 4. each line has an account
/// 5. each line has a date
/// 6. description and currency are set
///
/// # Errors
///
/// Returns `ValidationErrors` holding every violation found.
pub fn validate(draft: &TransactionDraft) -> Result<ValidatedTransaction, ValidationErrors> {
    let mut violations = Vec::new();

    if draft.lines.len() < MIN_LINES {
        violations.push(Violation::InsufficientLines {
            count: draft.lines.len(),
        });
    }

    let balance = compute_balance(&draft.lines);
    if balance.overflowed {
        violations.push(Violation::TotalOverflow);
    } else if balance.total_debit != balance.total_credit {
        violations.push(Violation::Unbalanced {
            debit: balance.total_debit,
            credit: balance.total_credit,
        });
    } else if balance.total_debit.is_zero() {
        violations.push(Violation::ZeroTotal);
    }

    for (line, entry) in draft.lines.iter().enumerate() {
        match entry.side() {
            None => violations.push(Violation::AmountSide { line }),
            Some(side) => {
                if check_amount(entry.amount_on(side)).is_err() {
                    violations.push(Violation::AmountOutOfRange { line });
                }
            }
        }
    }
    for (line, entry) in draft.lines.iter().enumerate() {
        if entry.account_id.is_none() {
            violations.push(Violation::MissingAccount { line });
        }
    }
    for (line, entry) in draft.lines.iter().enumerate() {
        if entry.date.is_none() {
            violations.push(Violation::MissingDate { line });
        }
    }

    let description = draft.description.trim();
    if description.is_empty() {
        violations.push(Violation::EmptyDescription);
    }
    if draft.currency_id.is_none() {
        violations.push(Violation::MissingCurrency);
    }

    match (violations.is_empty(), draft.currency_id) {
        (true, Some(currency_id)) => {
            let lines = draft
                .lines
                .iter()
                .filter_map(|entry| {
                    let side = entry.side()?;
                    Some(ValidatedLine {
                        account_id: entry.account_id?,
                        side,
                        amount: entry.amount_on(side),
                        date: entry.date?,
                        classification_id: entry.classification_id,
                    })
                })
                .collect();

            Ok(ValidatedTransaction {
                description: description.to_string(),
                currency_id,
                lines,
                total: balance.total_debit,
            })
        }
        _ => Err(ValidationErrors(violations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::TransactionLine;
    use rust_decimal_macros::dec;

    fn day() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, 1)
    }

    fn line(account: Option<i64>, debit: Option<Decimal>, credit: Option<Decimal>) -> TransactionLine {
        TransactionLine {
            account_id: account.map(AccountId::new),
            debit,
            credit,
            date: day(),
            classification_id: None,
        }
    }

    fn draft(lines: Vec<TransactionLine>) -> TransactionDraft {
        TransactionDraft {
            description: "Test transaction".into(),
            currency_id: Some(CurrencyId::new(1)),
            default_date: day(),
            default_amount: None,
            lines,
        }
    }

    #[test]
    fn test_balanced_draft_is_valid() {
        let validated = validate(&draft(vec![
            line(Some(10), Some(dec!(45.50)), None),
            line(Some(20), None, Some(dec!(45.50))),
        ]))
        .unwrap();

        assert_eq!(validated.total(), dec!(45.50));
        assert_eq!(validated.lines().len(), 2);
        assert_eq!(validated.lines()[0].side, EntrySide::Debit);
        assert_eq!(validated.lines()[1].side, EntrySide::Credit);
    }

    #[test]
    fn test_unbalanced_draft() {
        let errors = validate(&draft(vec![
            line(Some(1), Some(dec!(30)), None),
            line(Some(2), None, Some(dec!(25))),
        ]))
        .unwrap_err();

        assert_eq!(
            errors.violations(),
            &[Violation::Unbalanced {
                debit: dec!(30),
                credit: dec!(25),
            }]
        );
    }

    #[test]
    fn test_missing_account_names_line() {
        let errors = validate(&draft(vec![
            line(Some(1), Some(dec!(10)), None),
            line(None, None, Some(dec!(10))),
        ]))
        .unwrap_err();

        assert_eq!(errors.violations(), &[Violation::MissingAccount { line: 1 }]);
        assert_eq!(errors.violations()[0].to_string(), "Line 2: account is required");
        assert_eq!(errors.for_line(1).count(), 1);
        assert_eq!(errors.for_line(0).count(), 0);
    }

    #[test]
    fn test_single_line_rejected_even_if_it_looks_fine() {
        let errors = validate(&draft(vec![line(Some(1), Some(dec!(10)), None)])).unwrap_err();
        assert!(errors.contains(|v| matches!(v, Violation::InsufficientLines { count: 1 })));
    }

    #[test]
    fn test_zero_total_rejected() {
        let errors = validate(&draft(vec![line(Some(1), None, None), line(Some(2), None, None)]))
            .unwrap_err();

        assert_eq!(
            errors.violations(),
            &[
                Violation::ZeroTotal,
                Violation::AmountSide { line: 0 },
                Violation::AmountSide { line: 1 },
            ]
        );
    }

    #[test]
    fn test_both_sides_on_one_line_rejected() {
        let errors = validate(&draft(vec![
            line(Some(1), Some(dec!(10)), Some(dec!(10))),
            line(Some(2), Some(dec!(5)), None),
            line(Some(3), None, Some(dec!(5))),
        ]))
        .unwrap_err();

        assert!(errors.contains(|v| *v == Violation::AmountSide { line: 0 }));
    }

    #[test]
    fn test_collects_every_violation_in_rule_order() {
        let mut d = draft(vec![line(None, None, None)]);
        d.description = "   ".into();
        d.currency_id = None;
        d.lines[0].date = None;

        let codes: Vec<_> = validate(&d)
            .unwrap_err()
            .violations()
            .iter()
            .map(Violation::error_code)
            .collect();

        assert_eq!(
            codes,
            vec![
                "INSUFFICIENT_LINES",
                "ZERO_TOTAL",
                "INVALID_AMOUNT_SIDE",
                "MISSING_ACCOUNT",
                "MISSING_DATE",
                "EMPTY_DESCRIPTION",
                "MISSING_CURRENCY",
            ]
        );
    }

    #[test]
    fn test_overflowing_totals_are_reported_not_panicking() {
        let errors = validate(&draft(vec![
            line(Some(1), Some(Decimal::MAX), None),
            line(Some(2), Some(Decimal::MAX), None),
            line(Some(3), None, Some(dec!(1))),
        ]))
        .unwrap_err();

        assert_eq!(
            errors.violations(),
            &[
                Violation::TotalOverflow,
                Violation::AmountOutOfRange { line: 0 },
                Violation::AmountOutOfRange { line: 1 },
            ]
        );
    }

    #[test]
    fn test_sub_cent_amounts_rejected() {
        let errors = validate(&draft(vec![
            line(Some(1), Some(dec!(10.005)), None),
            line(Some(2), None, Some(dec!(10.005))),
        ]))
        .unwrap_err();

        assert_eq!(errors.for_line(0).count(), 1);
        assert!(errors.contains(|v| *v == Violation::AmountOutOfRange { line: 1 }));
        assert_eq!(errors.violations()[0].error_code(), "AMOUNT_OUT_OF_RANGE");
    }

    #[test]
    fn test_largest_amount_is_valid() {
        let max = dec!(999999999999.99);
        let validated = validate(&draft(vec![
            line(Some(1), Some(max), None),
            line(Some(2), None, Some(max)),
        ]))
        .unwrap();
        assert_eq!(validated.total(), max);

        let errors = validate(&draft(vec![
            line(Some(1), Some(max + dec!(0.01)), None),
            line(Some(2), None, Some(max + dec!(0.01))),
        ]))
        .unwrap_err();
        assert_eq!(errors.violations().len(), 2);
    }

    #[test]
    fn test_description_is_trimmed() {
        let mut d = draft(vec![
            line(Some(1), Some(dec!(1)), None),
            line(Some(2), None, Some(dec!(1))),
        ]);
        d.description = "  Lunch ".into();
        assert_eq!(validate(&d).unwrap().description(), "Lunch");
    }
}
