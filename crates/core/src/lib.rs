//! Core transaction-form logic for Tally.
//!
//! This crate contains the double-entry rules with ZERO HTTP dependencies.
//! The backend is reached only through the `LedgerBackend` trait.
//!
//! # Modules
//!
//! - `ledger` - Draft building, balance computation, validation, payload
//! - `reference` - Accounts, currencies, classifications, and their cache
//! - `backend` - The persistence/reference-data collaborator trait
//! - `session` - One add/edit form session owning a draft

pub mod backend;
pub mod ledger;
pub mod reference;
pub mod session;

pub use backend::LedgerBackend;
pub use session::{FormSession, SaveTarget, SubmitError};
