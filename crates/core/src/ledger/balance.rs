//! Balance computation for transaction drafts.

use rust_decimal::Decimal;

use super::types::TransactionLine;

/// Debit and credit totals of a set of lines.
///
/// Recomputed on every line edit for live feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSummary {
    /// Sum of positive debit amounts.
    pub total_debit: Decimal,
    /// Sum of positive credit amounts.
    pub total_credit: Decimal,
    /// True when totals are equal and non-zero.
    pub is_balanced: bool,
    /// True when a total exceeded `Decimal::MAX` and was capped there.
    pub overflowed: bool,
}

impl BalanceSummary {
    /// Creates a summary from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit && total_debit > Decimal::ZERO,
            overflowed: false,
        }
    }

    fn overflowed(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: false,
            overflowed: true,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }

    /// Returns the transaction amount shown to the user: the larger side.
    #[must_use]
    pub fn display_amount(&self) -> Decimal {
        self.total_debit.max(self.total_credit)
    }
}

/// Computes debit/credit totals for a set of lines.
///
/// Exact decimal equality decides balance; no tolerance is applied. A total
/// that overflows is capped at `Decimal::MAX` and never counts as balanced.
#[must_use]
pub fn compute_balance(lines: &[TransactionLine]) -> BalanceSummary {
    let total_debit = checked_total(lines.iter().map(TransactionLine::debit_amount));
    let total_credit = checked_total(lines.iter().map(TransactionLine::credit_amount));

    match (total_debit, total_credit) {
        (Some(debit), Some(credit)) => BalanceSummary::new(debit, credit),
        (debit, credit) => BalanceSummary::overflowed(
            debit.unwrap_or(Decimal::MAX),
            credit.unwrap_or(Decimal::MAX),
        ),
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, Decimal::checked_add)
}
