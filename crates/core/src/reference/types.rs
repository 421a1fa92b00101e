//! Backend-owned reference entities.
//!
//! These are read-only inputs to the form. Field defaults mirror what the
//! backend fills in when a column is null.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, CategoryId, ClassificationId, CurrencyId, TransactionId};

/// An account in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account name.
    pub name: String,
    /// Category name the account is grouped under.
    #[serde(alias = "category_name")]
    pub category: String,
    /// Default currency name, if any.
    #[serde(default, alias = "currency_name")]
    pub currency: Option<String>,
    /// Debit/credit nature.
    #[serde(default = "default_nature", deserialize_with = "null_as_default_nature")]
    pub nature: String,
    /// Short/long term marker.
    #[serde(default = "default_term", deserialize_with = "null_as_default_term")]
    pub term: String,
    /// Whether this account is a credit card.
    #[serde(default)]
    pub is_credit_card: bool,
    /// Credit limit for credit cards.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub credit_limit: Option<Decimal>,
    /// Statement close day for credit cards.
    #[serde(default)]
    pub close_day: Option<u8>,
    /// Payment due day for credit cards.
    #[serde(default)]
    pub due_day: Option<u8>,
}

fn default_nature() -> String {
    "both".to_string()
}

fn default_term() -> String {
    "undefined".to_string()
}

fn null_as_default_nature<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_nature))
}

fn null_as_default_term<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_term))
}

/// A currency with its rate to the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Currency ID.
    pub id: CurrencyId,
    /// Currency name (e.g. "USD").
    pub name: String,
    /// Exchange rate to the base currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub exchange_rate: Decimal,
}

/// A classification tag that lines can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Classification ID.
    pub id: ClassificationId,
    /// Classification name.
    pub name: String,
}

/// An account category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

/// A row of the transaction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Transaction ID.
    pub id: TransactionId,
    /// Description.
    pub description: String,
    /// Currency name.
    #[serde(default = "default_currency_name", deserialize_with = "null_as_usd")]
    pub currency_name: String,
    /// Earliest line date.
    pub date: NaiveDate,
    /// Signed amount (debits minus credits).
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Comma-separated account names.
    #[serde(default = "default_accounts", deserialize_with = "null_as_unknown")]
    pub accounts: String,
}

fn default_currency_name() -> String {
    "USD".to_string()
}

fn default_accounts() -> String {
    "Unknown".to_string()
}

fn null_as_usd<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency_name))
}

fn null_as_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_accounts))
}
