//! Interactive shell and script runner
//!
//! Both drive a [`Session`] one line at a time. Validation failures are
//! printed as warnings and the session carries on with its previous state.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use super::commands::{ShellCommand, ShellInput};
use crate::display::{format_ledger_register, format_output};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{write_atomic, write_export, ExportFormat};
use crate::models::ExpenseSelector;
use crate::reports::{ChartImage, ChartImages};
use crate::services::{Command, CommandOutput, ReportKind, Session};

const PROMPT: &str = "spendbook> ";

/// Whether the caller should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A session plus the places its files go
#[derive(Debug)]
pub struct Shell {
    session: Session,
    export_dir: PathBuf,
}

impl Shell {
    pub fn new(session: Session, export_dir: PathBuf) -> Self {
        Self {
            session,
            export_dir,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Parse and run one line, writing any output to `out`
    ///
    /// Rejected mutations are reported on `out` and do not fail the call.
    /// Parse errors and I/O failures are returned.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> LedgerResult<Flow> {
        let command = match ShellInput::parse(line)? {
            ShellInput::Blank => return Ok(Flow::Continue),
            ShellInput::Help(text) => {
                writeln!(out, "{}", text)?;
                return Ok(Flow::Continue);
            }
            ShellInput::Command(command) => command,
        };

        match self.run(command, out) {
            Ok(flow) => Ok(flow),
            Err(e) if e.is_validation() => {
                writeln!(out, "Warning: {}", e)?;
                Ok(Flow::Continue)
            }
            Err(e) => Err(e),
        }
    }

    fn run<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> LedgerResult<Flow> {
        let command = match command {
            ShellCommand::Quit => return Ok(Flow::Quit),
            ShellCommand::List => {
                write!(out, "{}", format_ledger_register(self.session.state()))?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Export { format, path } => {
                self.export(format, path.as_deref(), out)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Report {
                path,
                json,
                bar,
                pie,
            } => {
                self.report(&path, json, bar.as_deref(), pie.as_deref(), out)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Income { amount } => Command::SetIncome(amount),
            ShellCommand::Currency { label } => Command::SetCurrency(label),
            ShellCommand::Add {
                category,
                amount,
                date,
            } => Command::Add {
                category,
                amount,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
            },
            ShellCommand::Update {
                category,
                amount,
                date,
            } => Command::Update {
                selector: ExpenseSelector::key(category, date),
                amount,
            },
            ShellCommand::Delete { category, date } => Command::Delete {
                selector: ExpenseSelector::key(category, date),
            },
            ShellCommand::Summary => Command::Report(ReportKind::Summary),
            ShellCommand::Categories => Command::Report(ReportKind::Categories),
            ShellCommand::Trend => Command::Report(ReportKind::Trend),
            ShellCommand::Narrate => Command::Report(ReportKind::Narrative),
        };

        let output = self.session.execute(command)?;
        let text = format_output(&output, self.session.state().currency);
        writeln!(out, "{}", text.trim_end())?;

        Ok(Flow::Continue)
    }

    fn export<W: Write>(
        &mut self,
        format: ExportFormat,
        path: Option<&Path>,
        out: &mut W,
    ) -> LedgerResult<()> {
        let records = self.session.state().ledger.len();
        let bytes = match self.session.execute(Command::Export { format })? {
            CommandOutput::Exported { bytes, .. } => bytes,
            other => {
                return Err(LedgerError::Inconsistent(format!(
                    "export produced {:?}",
                    other
                )))
            }
        };

        let written = write_export(&self.export_dir, path, format, &bytes)?;
        writeln!(
            out,
            "Exported {} records to {}",
            records,
            written.display()
        )?;
        Ok(())
    }

    fn report<W: Write>(
        &mut self,
        path: &Path,
        json: bool,
        bar: Option<&Path>,
        pie: Option<&Path>,
        out: &mut W,
    ) -> LedgerResult<()> {
        let images = ChartImages {
            summary: bar.map(|p| load_png("Finance Summary", p)).transpose()?,
            breakdown: pie.map(|p| load_png("Expenses Breakdown", p)).transpose()?,
        };

        let report = match self
            .session
            .execute(Command::Report(ReportKind::Document(images)))?
        {
            CommandOutput::Document(report) => report,
            other => {
                return Err(LedgerError::Inconsistent(format!(
                    "document report produced {:?}",
                    other
                )))
            }
        };

        let contents = if json {
            report.to_json()?
        } else {
            report.render_text()
        };
        write_atomic(path, contents.as_bytes())?;

        writeln!(
            out,
            "Report written to {} ({} pages)",
            path.display(),
            report.page_count()
        )?;
        Ok(())
    }

    /// Read commands from `input` until it ends or `quit` is entered
    ///
    /// Every error is reported and the loop continues.
    pub fn interactive<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> LedgerResult<()> {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line, out) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "Error: {}", e)?,
            }
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Run a script, one command per line
    ///
    /// Warnings are printed and the script continues. Any other error stops
    /// the script; parse errors carry the offending line number.
    pub fn run_script<W: Write>(&mut self, script: &str, out: &mut W) -> LedgerResult<()> {
        for (idx, line) in script.lines().enumerate() {
            match self.execute_line(line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(LedgerError::Parse(msg)) => {
                    return Err(LedgerError::Parse(format!("line {}: {}", idx + 1, msg)));
                }
                Err(e) => {
                    tracing::error!(line = idx + 1, error = %e, "script stopped");
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

fn load_png(title: &str, path: &Path) -> LedgerResult<ChartImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    ChartImage::png(title, bytes)
}
