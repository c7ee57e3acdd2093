//! Session boundary
//!
//! A [`Session`] owns one budget state for the lifetime of an interactive
//! run. Each user action arrives as a [`Command`], is handled once, and the
//! next state replaces the current one only when the handler succeeds.

use chrono::NaiveDate;

use super::ledger::{add_or_upsert, delete, set_income, update_amount, Applied, Change};
use crate::audit::{AuditEntry, AuditLogger};
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::export::{export_to_bytes, ExportFormat};
use crate::models::{BudgetState, Currency, ExpenseSelector, Money};
use crate::reports::narrative::{narrate, DEFAULT_INTRO};
use crate::reports::{
    ChartImages, DocumentReport, FinanceSummaryReport, ReportLayout, SpendingReport, TrendReport,
};

/// Which report to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    Summary,
    Categories,
    Trend,
    Narrative,
    /// Paginated document with pre-rendered chart images
    Document(ChartImages),
}

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetIncome(Money),
    SetCurrency(Currency),
    Add {
        category: String,
        amount: Money,
        date: NaiveDate,
    },
    Update {
        selector: ExpenseSelector,
        amount: Money,
    },
    Delete {
        selector: ExpenseSelector,
    },
    Export {
        format: ExportFormat,
    },
    Report(ReportKind),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetIncome(_) => "income",
            Command::SetCurrency(_) => "currency",
            Command::Add { .. } => "add",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Export { .. } => "export",
            Command::Report(_) => "report",
        }
    }
}

/// What a handled command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    IncomeSet(Money),
    CurrencySet(Currency),
    Recorded(Change),
    Exported { format: ExportFormat, bytes: Vec<u8> },
    Summary(FinanceSummaryReport),
    Spending(SpendingReport),
    Trend(TrendReport),
    Narrative(Vec<String>),
    Document(DocumentReport),
}

/// Result of a handler before it is committed
struct Outcome {
    next: Option<BudgetState>,
    audit: Option<AuditEntry>,
    output: CommandOutput,
}

impl Outcome {
    fn read_only(output: CommandOutput) -> Self {
        Self {
            next: None,
            audit: None,
            output,
        }
    }
}

/// Owns the budget state for one run
#[derive(Debug)]
pub struct Session {
    state: BudgetState,
    audit: Option<AuditLogger>,
    layout: ReportLayout,
    narration_intro: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BudgetState::new())
    }
}

impl Session {
    /// Create a session around an existing state
    pub fn new(state: BudgetState) -> Self {
        Self {
            state,
            audit: None,
            layout: ReportLayout::default(),
            narration_intro: DEFAULT_INTRO.to_string(),
        }
    }

    /// Create an empty session configured from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            state: BudgetState::with_currency(settings.default_currency),
            audit: None,
            layout: settings.report,
            narration_intro: settings.narration_intro.clone(),
        }
    }

    /// Journal accepted mutations to an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn layout(&self) -> ReportLayout {
        self.layout
    }

    /// Handle one command
    ///
    /// The session state is replaced only on success. Rejected commands are
    /// logged and returned as errors with the previous state untouched.
    pub fn execute(&mut self, command: Command) -> LedgerResult<CommandOutput> {
        let name = command.name();

        let outcome = match self.handle(command) {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_validation() {
                    tracing::warn!(command = name, error = %e, "command rejected");
                } else {
                    tracing::error!(command = name, error = %e, "command failed");
                }
                return Err(e);
            }
        };

        if let Some(next) = outcome.next {
            self.state = next;
        }

        if let (Some(logger), Some(entry)) = (&self.audit, &outcome.audit) {
            match logger.log(entry) {
                Ok(()) => tracing::debug!(
                    operation = %entry.operation,
                    entity = %entry.entity_type,
                    key = %entry.entity_key,
                    "audit entry written"
                ),
                Err(e) => {
                    tracing::warn!(error = %e, path = %logger.path().display(), "failed to write audit entry")
                }
            }
        }

        Ok(outcome.output)
    }

    fn handle(&self, command: Command) -> LedgerResult<Outcome> {
        let state = &self.state;

        match command {
            Command::SetIncome(income) => {
                let next = set_income(state, income)?;
                Ok(Outcome {
                    audit: Some(AuditEntry::income_changed(state.income, income)),
                    next: Some(next),
                    output: CommandOutput::IncomeSet(income),
                })
            }
            Command::SetCurrency(currency) => Ok(Outcome {
                next: Some(BudgetState {
                    currency,
                    ..state.clone()
                }),
                audit: None,
                output: CommandOutput::CurrencySet(currency),
            }),
            Command::Add {
                category,
                amount,
                date,
            } => {
                let applied = add_or_upsert(&state.ledger, state.income, &category, amount, date)?;
                Ok(self.committed(applied))
            }
            Command::Update { selector, amount } => {
                let applied = update_amount(&state.ledger, state.income, &selector, amount)?;
                Ok(self.committed(applied))
            }
            Command::Delete { selector } => {
                let applied = delete(&state.ledger, &selector)?;
                Ok(self.committed(applied))
            }
            Command::Export { format } => {
                let bytes = export_to_bytes(&state.ledger, format)?;
                tracing::debug!(%format, bytes = bytes.len(), "ledger exported");
                Ok(Outcome::read_only(CommandOutput::Exported { format, bytes }))
            }
            Command::Report(kind) => Ok(Outcome::read_only(self.report(kind))),
        }
    }

    fn committed(&self, applied: Applied) -> Outcome {
        Outcome {
            audit: Some(AuditEntry::from_change(&applied.change)),
            next: Some(self.state.with_ledger(applied.ledger)),
            output: CommandOutput::Recorded(applied.change),
        }
    }

    fn report(&self, kind: ReportKind) -> CommandOutput {
        let state = &self.state;
        match kind {
            ReportKind::Summary => CommandOutput::Summary(FinanceSummaryReport::generate(state)),
            ReportKind::Categories => CommandOutput::Spending(SpendingReport::generate(state)),
            ReportKind::Trend => CommandOutput::Trend(TrendReport::generate(state)),
            ReportKind::Narrative => {
                CommandOutput::Narrative(narrate(state, &self.narration_intro))
            }
            ReportKind::Document(images) => {
                CommandOutput::Document(DocumentReport::compose(state, &images, self.layout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::error::LedgerError;
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn add(category: &str, cents: i64, day: u32) -> Command {
        Command::Add {
            category: category.to_string(),
            amount: Money::from_cents(cents),
            date: date(day),
        }
    }

    fn session_with_income(cents: i64) -> Session {
        let mut session = Session::default();
        session
            .execute(Command::SetIncome(Money::from_cents(cents)))
            .unwrap();
        session
    }

    #[test]
    fn test_add_sorts_and_totals() {
        let mut session = session_with_income(100000);
        session.execute(add("Food", 20000, 5)).unwrap();
        session.execute(add("Rent", 50000, 1)).unwrap();

        let state = session.state();
        assert_eq!(state.ledger.records()[0].category, "Rent");
        assert_eq!(state.ledger.records()[1].category, "Food");

        match session.execute(Command::Report(ReportKind::Summary)).unwrap() {
            CommandOutput::Summary(summary) => {
                assert_eq!(summary.total_expenses.cents(), 70000);
                assert_eq!(summary.balance.cents(), 30000);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_rejected_command_keeps_state() {
        let mut session = session_with_income(10000);
        let before = session.state().clone();

        let err = session.execute(add("Food", 15000, 5)).unwrap_err();
        assert!(matches!(err, LedgerError::ExceedsBalance { .. }));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_update_and_delete_through_session() {
        let mut session = session_with_income(100000);
        session.execute(add("Food", 5000, 5)).unwrap();
        session.execute(add("Food", 7000, 6)).unwrap();

        let err = session
            .execute(Command::Update {
                selector: ExpenseSelector::key("Food", date(7)),
                amount: Money::from_cents(100),
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::AmbiguousOrMissingKey { matches: 0, .. }));

        session
            .execute(Command::Update {
                selector: ExpenseSelector::key("Food", date(6)),
                amount: Money::from_cents(100),
            })
            .unwrap();
        session
            .execute(Command::Delete {
                selector: ExpenseSelector::key("Food", date(5)),
            })
            .unwrap();

        let records = session.state().ledger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.cents(), 100);
    }

    #[test]
    fn test_currency_changes_labels_only() {
        let mut session = session_with_income(100000);
        session.execute(add("Food", 20000, 5)).unwrap();
        session
            .execute(Command::SetCurrency(Currency::Jpy))
            .unwrap();

        match session.execute(Command::Report(ReportKind::Narrative)).unwrap() {
            CommandOutput::Narrative(lines) => {
                assert_eq!(lines[1], "For Food, you spent JPY 200.00");
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(session.state().income.cents(), 100000);
    }

    #[test]
    fn test_export_does_not_mutate() {
        let mut session = session_with_income(100000);
        session.execute(add("Food", 20000, 5)).unwrap();
        let before = session.state().clone();

        let output = session
            .execute(Command::Export {
                format: ExportFormat::Csv,
            })
            .unwrap();
        match output {
            CommandOutput::Exported { format, bytes } => {
                assert_eq!(format, ExportFormat::Csv);
                assert!(String::from_utf8(bytes).unwrap().contains("Food,200.00,2024-01-05"));
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_audit_entries_written_for_mutations() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut session = Session::default().with_audit(logger.clone());

        session
            .execute(Command::SetIncome(Money::from_cents(100000)))
            .unwrap();
        session.execute(add("Food", 20000, 5)).unwrap();
        session.execute(add("Food", 25000, 5)).unwrap();
        let _ = session.execute(add("Food", 999999, 6));
        session.execute(Command::Report(ReportKind::Trend)).unwrap();

        let entries: Vec<crate::audit::AuditEntry> =
            std::fs::read_to_string(logger.path())
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            vec![Operation::Update, Operation::Create, Operation::Update]
        );
        assert_eq!(entries[2].entity_key, "Food@2024-01-05");
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            default_currency: Currency::Krw,
            narration_intro: "Spending:".to_string(),
            ..Settings::default()
        };
        let mut session = Session::from_settings(&settings);
        assert_eq!(session.state().currency, Currency::Krw);

        match session.execute(Command::Report(ReportKind::Narrative)).unwrap() {
            CommandOutput::Narrative(lines) => assert_eq!(lines[0], "Spending:"),
            other => panic!("unexpected output {:?}", other),
        }
    }
}
