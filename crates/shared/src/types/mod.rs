//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{MAX_AMOUNT, MONEY_SCALE, MoneyError, check_amount, parse_amount, round_money};
