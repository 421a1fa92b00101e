//! Transaction form session.
//!
//! A session owns exactly one draft from the moment the add/edit form opens
//! until it is saved or discarded. Reference data is fetched once when the
//! session opens and dropped with it.

use std::collections::BTreeMap;
use std::sync::Arc;

use tally_shared::types::{AccountId, CurrencyId, TransactionId};
use tally_shared::{AppError, AppResult};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::backend::LedgerBackend;
use crate::ledger::{
    BalanceSummary, DraftDefaults, TransactionDraft, ValidatedTransaction, ValidationErrors,
    to_submission_payload, validate,
};
use crate::reference::{
    Account, Classification, ClassificationCache, Currency, group_by_category,
};

/// Where a successful submission goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// `POST /transactions`.
    Create,
    /// `PUT /transactions/{id}`.
    Update(TransactionId),
}

/// Errors returned by `FormSession::submit`.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft broke at least one rule; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// The backend rejected the request or could not be reached.
    #[error("Failed to save transaction")]
    SaveFailed(#[source] AppError),

    /// The session already produced a persisted transaction.
    #[error("Transaction already saved as #{0}")]
    AlreadySaved(TransactionId),
}

impl SubmitError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "VALIDATION_FAILED",
            Self::SaveFailed(_) => "SAVE_FAILED",
            Self::AlreadySaved(_) => "ALREADY_SAVED",
        }
    }
}

/// State of one add/edit transaction form.
pub struct FormSession<B> {
    backend: Arc<B>,
    target: SaveTarget,
    draft: TransactionDraft,
    accounts: Vec<Account>,
    currencies: Vec<Currency>,
    classifications: Vec<Classification>,
    classification_cache: ClassificationCache,
    saved: Option<TransactionId>,
}

impl<B: LedgerBackend> FormSession<B> {
    /// Opens an "add transaction" form.
    ///
    /// # Errors
    ///
    /// Returns the backend error if reference data cannot be fetched.
    pub async fn open_create(backend: Arc<B>, defaults: Option<DraftDefaults>) -> AppResult<Self> {
        let (accounts, currencies, classifications) = Self::load_reference(&backend).await?;
        debug!(accounts = accounts.len(), "Opened create session");

        Ok(Self {
            backend,
            target: SaveTarget::Create,
            draft: TransactionDraft::initialize(defaults),
            accounts,
            currencies,
            classifications,
            classification_cache: ClassificationCache::new(),
            saved: None,
        })
    }

    /// Opens an "edit transaction" form seeded from the stored transaction.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the transaction or reference data
    /// cannot be fetched.
    pub async fn open_edit(backend: Arc<B>, id: TransactionId) -> AppResult<Self> {
        let (stored, (accounts, currencies, classifications)) =
            tokio::try_join!(backend.get_transaction(id), Self::load_reference(&backend))?;
        debug!(%id, lines = stored.lines.len(), "Opened edit session");

        Ok(Self {
            backend,
            target: SaveTarget::Update(id),
            draft: TransactionDraft::from_stored(&stored),
            accounts,
            currencies,
            classifications,
            classification_cache: ClassificationCache::new(),
            saved: None,
        })
    }

    async fn load_reference(
        backend: &B,
    ) -> AppResult<(Vec<Account>, Vec<Currency>, Vec<Classification>)> {
        tokio::try_join!(
            backend.list_accounts(),
            backend.list_currencies(),
            backend.list_classifications(),
        )
    }

    /// Replaces the per-session classification cache.
    #[must_use]
    pub fn with_classification_cache(mut self, cache: ClassificationCache) -> Self {
        self.classification_cache = cache;
        self
    }

    /// Returns where a submission will be sent.
    #[must_use]
    pub fn target(&self) -> SaveTarget {
        self.target
    }

    /// Returns the draft.
    #[must_use]
    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// Returns the draft for editing.
    pub fn draft_mut(&mut self) -> &mut TransactionDraft {
        &mut self.draft
    }

    /// Returns the ID assigned by the backend after a successful submit.
    #[must_use]
    pub fn saved_id(&self) -> Option<TransactionId> {
        self.saved
    }

    /// Returns every account.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Returns accounts grouped by category for selection.
    #[must_use]
    pub fn accounts_by_category(&self) -> BTreeMap<&str, Vec<&Account>> {
        group_by_category(&self.accounts)
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Returns every currency.
    #[must_use]
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Looks up a currency by ID.
    #[must_use]
    pub fn currency(&self, id: CurrencyId) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.id == id)
    }

    /// Returns every classification.
    #[must_use]
    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    /// Returns the classifications selectable for an account.
    ///
    /// Fetched once per account and memoized for the session.
    ///
    /// # Errors
    ///
    /// Returns the backend error on a failed fetch.
    pub async fn classifications_for(
        &self,
        account_id: AccountId,
    ) -> AppResult<Arc<Vec<Classification>>> {
        let backend = Arc::clone(&self.backend);
        self.classification_cache
            .get_or_fetch(account_id, || async move {
                backend.account_classifications(account_id).await
            })
            .await
    }

    /// Returns the live balance of the draft.
    #[must_use]
    pub fn balance(&self) -> BalanceSummary {
        self.draft.balance()
    }

    /// Validates the draft without submitting it.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<ValidatedTransaction, ValidationErrors> {
        validate(&self.draft)
    }

    /// Validates the draft and sends it to the backend.
    ///
    /// The exclusive borrow keeps a second submission from starting while
    /// one is in flight. On failure the draft is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `SubmitError::Invalid` if any rule is violated (nothing is sent)
    /// - `SubmitError::SaveFailed` if the backend call fails
    /// - `SubmitError::AlreadySaved` if this session was already saved
    pub async fn submit(&mut self) -> Result<TransactionId, SubmitError> {
        if let Some(id) = self.saved {
            return Err(SubmitError::AlreadySaved(id));
        }

        let validated = self.validate()?;
        let payload = to_submission_payload(&validated);

        let result = match self.target {
            SaveTarget::Create => self.backend.create_transaction(&payload).await,
            SaveTarget::Update(id) => self
                .backend
                .update_transaction(id, &payload)
                .await
                .map(|()| id),
        };

        match result {
            Ok(id) => {
                info!(%id, total = %validated.total(), lines = payload.lines.len(), "Transaction saved");
                self.saved = Some(id);
                Ok(id)
            }
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "Failed to save transaction");
                Err(SubmitError::SaveFailed(err))
            }
        }
    }
}
