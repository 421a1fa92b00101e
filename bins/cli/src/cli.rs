//! Command-line arguments.

use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tally_core::ledger::EntrySide;
use tally_shared::types::{
    AccountId, ClassificationId, CurrencyId, TransactionId, parse_amount,
};

/// Tally bookkeeping client
#[derive(Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// Backend base URL, overriding configuration
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the backend is reachable
    Ping,
    /// List accounts grouped by category
    Accounts,
    /// List currencies
    Currencies,
    /// List account categories
    Categories,
    /// List classifications, optionally only those linked to an account
    Classifications {
        /// Account ID
        #[arg(short, long)]
        account: Option<AccountId>,
    },
    /// Link a classification to an account
    Link {
        /// Account ID
        #[arg(short, long)]
        account: AccountId,
        /// Classification ID
        #[arg(short, long)]
        classification: ClassificationId,
    },
    /// Unlink a classification from an account
    Unlink {
        /// Account ID
        #[arg(short, long)]
        account: AccountId,
        /// Classification ID
        #[arg(short, long)]
        classification: ClassificationId,
    },
    /// List recent transactions
    Transactions,
    /// Show a transaction with its lines and balance
    Show {
        /// Transaction ID
        id: TransactionId,
    },
    /// Add a new transaction
    Add(AddArgs),
    /// Edit and re-save an existing transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New date applied to every line (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

/// Arguments of `tally add`.
#[derive(clap::Args)]
pub struct AddArgs {
    /// Description
    #[arg(short, long)]
    pub description: String,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Currency ID
    #[arg(short, long)]
    pub currency: CurrencyId,

    /// Amount for a simple two-line transaction (e.g. "45.50")
    #[arg(short = 'm', long, value_parser = parse_amount, requires = "debit_account", requires = "credit_account")]
    pub amount: Option<Decimal>,

    /// Account debited by `--amount`
    #[arg(long, requires = "amount")]
    pub debit_account: Option<AccountId>,

    /// Account credited by `--amount`
    #[arg(long, requires = "amount")]
    pub credit_account: Option<AccountId>,

    /// Line as ACCOUNT:dr|cr:AMOUNT[:CLASSIFICATION], repeatable
    #[arg(short, long = "line", conflicts_with = "amount")]
    pub lines: Vec<LineSpec>,
}

/// One `--line` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: EntrySide,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional classification for the line.
    pub classification_id: Option<ClassificationId>,
}

impl FromStr for LineSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(format!(
                "expected ACCOUNT:dr|cr:AMOUNT[:CLASSIFICATION], got `{s}`"
            ));
        }

        let account_id = parts[0]
            .parse()
            .map_err(|_| format!("invalid account ID `{}`", parts[0]))?;
        let side = match parts[1].trim().to_ascii_lowercase().as_str() {
            "dr" | "debit" => EntrySide::Debit,
            "cr" | "credit" => EntrySide::Credit,
            other => return Err(format!("side must be `dr` or `cr`, got `{other}`")),
        };
        let amount = parse_amount(parts[2]).map_err(|e| e.to_string())?;
        let classification_id = parts
            .get(3)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| format!("invalid classification ID `{raw}`"))
            })
            .transpose()?;

        Ok(Self {
            account_id,
            side,
            amount,
            classification_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_line_spec_with_classification() {
        let spec: LineSpec = "12:dr:52.50:5".parse().unwrap();
        assert_eq!(
            spec,
            LineSpec {
                account_id: AccountId::new(12),
                side: EntrySide::Debit,
                amount: dec!(52.50),
                classification_id: Some(ClassificationId::new(5)),
            }
        );
    }

    #[test]
    fn test_line_spec_without_classification() {
        let spec: LineSpec = "3:CR:1,200".parse().unwrap();
        assert_eq!(spec.side, EntrySide::Credit);
        assert_eq!(spec.amount, dec!(1200));
        assert_eq!(spec.classification_id, None);
    }

    #[rstest]
    #[case("12:dr")]
    #[case("x:dr:10")]
    #[case("12:both:10")]
    #[case("12:dr:0")]
    #[case("12:dr:-5")]
    #[case("12:dr:10:y")]
    #[case("1:dr:10:2:3")]
    fn test_line_spec_rejects(#[case] input: &str) {
        assert!(input.parse::<LineSpec>().is_err());
    }

    #[test]
    fn test_add_with_amount_requires_both_accounts() {
        let result = Cli::try_parse_from([
            "tally", "add", "-d", "Lunch", "-c", "1", "--amount", "12", "--debit-account", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_with_lines() {
        let cli = Cli::try_parse_from([
            "tally", "add", "-d", "Split", "-c", "1", "--date", "2024-03-01", "-l", "2:dr:30",
            "-l", "4:dr:20", "-l", "1:cr:50",
        ])
        .unwrap();

        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.lines.len(), 3);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(args.amount, None);
    }
}
