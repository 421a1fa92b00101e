//! Reference data consumed by the transaction form.

pub mod cache;
pub mod types;

use std::collections::BTreeMap;

pub use cache::ClassificationCache;
pub use types::{Account, Category, Classification, Currency, TransactionSummary};

/// Groups accounts by category name for account selection.
///
/// Categories are sorted by name; accounts keep their backend order.
#[must_use]
pub fn group_by_category(accounts: &[Account]) -> BTreeMap<&str, Vec<&Account>> {
    let mut groups: BTreeMap<&str, Vec<&Account>> = BTreeMap::new();
    for account in accounts {
        groups.entry(account.category.as_str()).or_default().push(account);
    }
    groups
}
