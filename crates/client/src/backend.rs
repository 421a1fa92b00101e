//! `LedgerBackend` over HTTP.

use async_trait::async_trait;
use tally_core::LedgerBackend;
use tally_core::ledger::{StoredTransaction, TransactionPayload};
use tally_core::reference::{Account, Classification, Currency};
use tally_shared::AppResult;
use tally_shared::types::{AccountId, TransactionId};

use crate::client::ApiClient;

#[async_trait]
impl LedgerBackend for ApiClient {
    async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.accounts().await
    }

    async fn list_currencies(&self) -> AppResult<Vec<Currency>> {
        self.currencies().await
    }

    async fn list_classifications(&self) -> AppResult<Vec<Classification>> {
        self.classifications().await
    }

    async fn account_classifications(
        &self,
        account_id: AccountId,
    ) -> AppResult<Vec<Classification>> {
        self.classifications_of(account_id).await
    }

    async fn get_transaction(&self, id: TransactionId) -> AppResult<StoredTransaction> {
        self.transaction(id).await
    }

    async fn create_transaction(&self, payload: &TransactionPayload) -> AppResult<TransactionId> {
        self.create(payload).await
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &TransactionPayload,
    ) -> AppResult<()> {
        self.update(id, payload).await
    }
}
