//! Subcommand handlers.

use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Local;
use tally_client::ApiClient;
use tally_core::ledger::{DraftDefaults, EntrySide, LineEdit};
use tally_core::{FormSession, LedgerBackend, SubmitError};
use tally_core::reference::ClassificationCache;
use tally_shared::AppError;
use tally_shared::config::CacheConfig;
use tally_shared::types::{AccountId, ClassificationId, TransactionId};
use tracing::error;

use crate::cli::{AddArgs, LineSpec};
use crate::render;

pub async fn ping(client: &ApiClient) -> anyhow::Result<()> {
    let message = client
        .ping()
        .await
        .with_context(|| format!("Backend at {} is unreachable", client.root_url()))?;
    println!("{message}");
    Ok(())
}

pub async fn accounts(client: &ApiClient) -> anyhow::Result<()> {
    let accounts = client.list_accounts().await?;
    for (category, accounts) in tally_core::reference::group_by_category(&accounts) {
        println!("{category}");
        for account in accounts {
            let mut extra = format!("{}, {}", account.nature, account.term);
            if let Some(currency) = &account.currency {
                extra = format!("{currency}, {extra}");
            }
            if let Some(limit) = account.credit_limit.filter(|_| account.is_credit_card) {
                extra = format!("{extra}, limit {}", render::money(limit));
            }
            println!("  {:>5}  {} ({extra})", account.id, account.name);
        }
    }
    Ok(())
}

pub async fn currencies(client: &ApiClient) -> anyhow::Result<()> {
    for currency in client.list_currencies().await? {
        println!("{:>5}  {:<6} {}", currency.id, currency.name, currency.exchange_rate);
    }
    Ok(())
}

pub async fn categories(client: &ApiClient) -> anyhow::Result<()> {
    for category in client.categories().await? {
        println!("{:>5}  {}", category.id, category.name);
    }
    Ok(())
}

pub async fn classifications(client: &ApiClient, account: Option<AccountId>) -> anyhow::Result<()> {
    let list = match account {
        Some(account_id) => client.account_classifications(account_id).await?,
        None => client.list_classifications().await?,
    };
    for classification in list {
        println!("{:>5}  {}", classification.id, classification.name);
    }
    Ok(())
}

pub async fn link(
    client: &ApiClient,
    account_id: AccountId,
    classification_id: ClassificationId,
) -> anyhow::Result<()> {
    client
        .link_classification(account_id, classification_id)
        .await
        .context("Failed to link classification")?;
    println!("Linked classification {classification_id} to account {account_id}");
    Ok(())
}

pub async fn unlink(
    client: &ApiClient,
    account_id: AccountId,
    classification_id: ClassificationId,
) -> anyhow::Result<()> {
    client
        .unlink_classification(account_id, classification_id)
        .await
        .context("Failed to unlink classification")?;
    println!("Unlinked classification {classification_id} from account {account_id}");
    Ok(())
}

pub async fn transactions(client: &ApiClient) -> anyhow::Result<()> {
    let list = client.transactions().await?;
    for row in &list.transactions {
        println!(
            "{:>5}  {}  {:<30} {:>12} {:<4} {}",
            row.id,
            row.date,
            row.description,
            render::money(row.amount),
            row.currency_name,
            row.accounts
        );
    }
    println!("{} transaction(s)", list.total);
    Ok(())
}

pub async fn show(
    client: Arc<ApiClient>,
    cache: &CacheConfig,
    id: TransactionId,
) -> anyhow::Result<()> {
    let session = FormSession::open_edit(client, id)
        .await
        .with_context(|| format!("Failed to load transaction {id}"))?
        .with_classification_cache(ClassificationCache::from_config(cache));
    println!(
        "{}",
        render::draft(session.draft(), session.accounts(), session.classifications())
    );
    Ok(())
}

pub async fn add(client: Arc<ApiClient>, cache: &CacheConfig, args: AddArgs) -> anyhow::Result<()> {
    let defaults = DraftDefaults {
        description: args.description,
        date: Some(args.date.unwrap_or_else(|| Local::now().date_naive())),
        amount: args.amount,
        currency_id: Some(args.currency),
    };
    let mut session = FormSession::open_create(client, Some(defaults))
        .await?
        .with_classification_cache(ClassificationCache::from_config(cache));

    if session.currency(args.currency).is_none() {
        bail!("Unknown currency {}", args.currency);
    }

    match (args.debit_account, args.credit_account) {
        (Some(debit_account), Some(credit_account)) => {
            let draft = session.draft_mut();
            draft.seed_from_defaults()?;
            draft.set_line_field(0, LineEdit::Account(Some(debit_account)))?;
            draft.set_line_field(1, LineEdit::Account(Some(credit_account)))?;
        }
        _ => apply_lines(&mut session, &args.lines).await?,
    }

    submit(&mut session).await
}

pub async fn edit(
    client: Arc<ApiClient>,
    cache: &CacheConfig,
    id: TransactionId,
    description: Option<String>,
    date: Option<chrono::NaiveDate>,
) -> anyhow::Result<()> {
    let mut session = FormSession::open_edit(client, id)
        .await
        .with_context(|| format!("Failed to load transaction {id}"))?
        .with_classification_cache(ClassificationCache::from_config(cache));

    let draft = session.draft_mut();
    if let Some(description) = description {
        draft.description = description;
    }
    if let Some(date) = date {
        draft.default_date = Some(date);
        for index in 0..draft.lines.len() {
            draft.set_line_field(index, LineEdit::Date(Some(date)))?;
        }
    }

    submit(&mut session).await
}

async fn apply_lines<B: LedgerBackend>(
    session: &mut FormSession<B>,
    lines: &[LineSpec],
) -> anyhow::Result<()> {
    for (index, spec) in lines.iter().enumerate() {
        if session.account(spec.account_id).is_none() {
            bail!("Line {}: unknown account {}", index + 1, spec.account_id);
        }
        if let Some(classification_id) = spec.classification_id {
            let allowed = session.classifications_for(spec.account_id).await?;
            if !allowed.iter().any(|c| c.id == classification_id) {
                bail!(
                    "Line {}: classification {classification_id} is not linked to account {}",
                    index + 1,
                    spec.account_id
                );
            }
        }

        let draft = session.draft_mut();
        if index >= draft.lines.len() {
            draft.add_line();
        }
        let amount = match spec.side {
            EntrySide::Debit => LineEdit::Debit(Some(spec.amount)),
            EntrySide::Credit => LineEdit::Credit(Some(spec.amount)),
        };
        draft.set_line_field(index, LineEdit::Account(Some(spec.account_id)))?;
        draft.set_line_field(index, amount)?;
        draft.set_line_field(index, LineEdit::Classification(spec.classification_id))?;
    }
    Ok(())
}

async fn submit<B: LedgerBackend>(session: &mut FormSession<B>) -> anyhow::Result<()> {
    println!(
        "{}",
        render::draft(session.draft(), session.accounts(), session.classifications())
    );

    match session.submit().await {
        Ok(id) => {
            println!("Saved transaction {id}");
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => {
            eprintln!("Transaction not saved:\n{}", render::violations(&errors));
            bail!("{} rule(s) violated", errors.violations().len())
        }
        Err(SubmitError::SaveFailed(source)) => {
            error!(code = source.error_code(), error = %source, "Save failed");
            bail!("Transaction not saved: {source}. {}", save_failure_hint(&source))
        }
        Err(err) => {
            error!(code = err.error_code(), error = ?err, "Submission failed");
            bail!("{err}")
        }
    }
}

fn save_failure_hint(err: &AppError) -> &'static str {
    if err.is_retryable() {
        "The backend may be busy or offline; try again."
    } else {
        "Fix the transaction and save again."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Transport("connection refused".into()), true)]
    #[case(AppError::Backend { status: 502, message: "bad gateway".into() }, true)]
    #[case(AppError::Backend { status: 422, message: "invalid".into() }, false)]
    #[case(AppError::Decode("missing id".into()), false)]
    fn test_save_failure_hint_follows_retryability(#[case] err: AppError, #[case] retry: bool) {
        let hint = save_failure_hint(&err);
        assert_eq!(hint.contains("try again"), retry, "{hint}");
    }
}
