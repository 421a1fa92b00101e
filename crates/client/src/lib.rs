//! HTTP client for the Tally bookkeeping backend.
//!
//! This crate provides:
//! - `ApiClient`, a `reqwest` client configured from `ApiConfig`
//! - The `LedgerBackend` implementation used by form sessions
//! - Listing and link endpoints used by the command-line front end

mod backend;
pub mod client;
mod response;

pub use client::{ApiClient, TransactionList};
