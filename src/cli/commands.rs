//! Shell command grammar
//!
//! Each shell or script line is split with `shell-words` and parsed by clap
//! as one of the subcommands below.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::error::{LedgerError, LedgerResult};
use crate::export::ExportFormat;
use crate::models::{Currency, Money};

/// One parsed shell line
#[derive(Parser, Debug)]
#[command(
    name = "spendbook",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set the session income
    Income {
        /// Amount (e.g. "1000" or "1000.00")
        #[arg(allow_negative_numbers = true)]
        amount: Money,
    },

    /// Change the currency label (USD, EUR, GBP, JPY, INR, KRW)
    Currency { label: Currency },

    /// Record an expense, replacing the amount if category and date already exist
    Add {
        category: String,

        #[arg(allow_negative_numbers = true)]
        amount: Money,

        /// Expense date (YYYY-MM-DD), defaults to today
        date: Option<NaiveDate>,
    },

    /// Change the amount of the expense with this category and date
    Update {
        category: String,

        #[arg(allow_negative_numbers = true)]
        amount: Money,

        /// Expense date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Remove the expense with this category and date
    #[command(alias = "rm")]
    Delete {
        category: String,

        /// Expense date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Show the ledger register
    #[command(alias = "ls")]
    List,

    /// Show income, expenses and balance
    Summary,

    /// Show spending by category
    Categories,

    /// Show daily expense totals
    Trend,

    /// Print the narrated expense breakdown
    Narrate,

    /// Export the ledger (csv, xlsx, json, yaml)
    Export {
        format: ExportFormat,

        /// Output file, defaults to expenses.<ext> in the export directory
        path: Option<PathBuf>,
    },

    /// Write the paginated finance report
    Report {
        path: PathBuf,

        /// Write JSON instead of text
        #[arg(long)]
        json: bool,

        /// PNG of the finance summary bar chart
        #[arg(long, value_name = "PNG")]
        bar: Option<PathBuf>,

        /// PNG of the expenses breakdown pie chart
        #[arg(long, value_name = "PNG")]
        pie: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What a line of input turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    /// Blank line or `#` comment
    Blank,
    /// Rendered help text
    Help(String),
    Command(ShellCommand),
}

impl ShellInput {
    /// Parse one line of shell input
    ///
    /// Clap errors other than help output come back as
    /// [`LedgerError::Parse`] carrying the rendered message.
    pub fn parse(line: &str) -> LedgerResult<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Self::Blank);
        }

        let words = shell_words::split(trimmed)
            .map_err(|e| LedgerError::Parse(format!("Could not split '{}': {}", trimmed, e)))?;

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => Ok(Self::Command(parsed.command)),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                Ok(Self::Help(e.to_string().trim_end().to_string()))
            }
            Err(e) => Err(LedgerError::Parse(e.to_string().trim_end().to_string())),
        }
    }
}
