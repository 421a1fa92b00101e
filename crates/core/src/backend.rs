//! Backend collaborator seam.
//!
//! The form never talks HTTP directly; it goes through this trait so the
//! transport can be swapped (the `tally-client` crate, or a fake in tests).

use async_trait::async_trait;
use tally_shared::AppResult;
use tally_shared::types::{AccountId, TransactionId};

use crate::ledger::{StoredTransaction, TransactionPayload};
use crate::reference::{Account, Classification, Currency};

/// Reference-data and persistence operations the transaction form needs.
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Lists every account.
    async fn list_accounts(&self) -> AppResult<Vec<Account>>;

    /// Lists every currency.
    async fn list_currencies(&self) -> AppResult<Vec<Currency>>;

    /// Lists every classification.
    async fn list_classifications(&self) -> AppResult<Vec<Classification>>;

    /// Lists the classifications linked to one account.
    async fn account_classifications(&self, account_id: AccountId)
    -> AppResult<Vec<Classification>>;

    /// Fetches a persisted transaction with its lines.
    async fn get_transaction(&self, id: TransactionId) -> AppResult<StoredTransaction>;

    /// Persists a new transaction, returning its server-assigned ID.
    async fn create_transaction(&self, payload: &TransactionPayload) -> AppResult<TransactionId>;

    /// Replaces an existing transaction.
    async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &TransactionPayload,
    ) -> AppResult<()>;
}
