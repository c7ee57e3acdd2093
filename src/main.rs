use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use spendbook::audit::AuditLogger;
use spendbook::cli::Shell;
use spendbook::config::{paths::SpendbookPaths, settings::Settings};
use spendbook::logging::init_tracing;
use spendbook::models::{Currency, Money};
use spendbook::services::{Command, Session};

#[derive(Parser)]
#[command(
    name = "spendbook",
    author = "Kaylee Beyene",
    version,
    about = "Personal expense ledger for the terminal",
    long_about = "Spendbook records income and dated expenses, refuses entries that \
                  would overspend, and produces summaries, exports and a paginated \
                  finance report. State lives only for the length of a session."
)]
struct Cli {
    /// Starting income for the session
    #[arg(long, global = true, allow_negative_numbers = true)]
    income: Option<Money>,

    /// Currency label for the session (USD, EUR, GBP, JPY, INR, KRW)
    #[arg(long, global = true)]
    currency: Option<Currency>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Run a script of shell commands, one per line
    Run {
        /// Script file; lines starting with '#' are ignored
        script: PathBuf,
    },

    /// Write default settings and create the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = SpendbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized Spendbook at: {}", paths.base_dir().display());
            println!("Settings:    {}", paths.settings_file().display());
            println!("Exports:     {}", settings.resolve_export_dir(&paths).display());
        }
        Some(Commands::Config) => {
            println!("Spendbook Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!(
                "Export directory: {}",
                settings.resolve_export_dir(&paths).display()
            );
            println!();
            println!("Settings:");
            println!("  Default currency: {}", settings.default_currency);
            println!("  Audit enabled:    {}", settings.audit_enabled);
            println!(
                "  Report layout:    {} rows on page 1, {} per page after",
                settings.report.first_page_rows, settings.report.rows_per_page
            );
            if !paths.is_initialized() {
                println!();
                println!("Run 'spendbook init' to write these defaults to disk.");
            }
        }
        Some(Commands::Run { script }) => {
            let mut shell = build_shell(&paths, &settings, cli.income, cli.currency)?;
            let contents = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            shell
                .run_script(&contents, &mut out)
                .with_context(|| format!("Script {} failed", script.display()))?;
            out.flush()?;
        }
        Some(Commands::Shell) | None => {
            let mut shell = build_shell(&paths, &settings, cli.income, cli.currency)?;
            println!("Spendbook - type 'help' for commands, 'quit' to leave.");

            let stdin = io::stdin();
            let stdout = io::stdout();
            shell.interactive(stdin.lock(), &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn build_shell(
    paths: &SpendbookPaths,
    settings: &Settings,
    income: Option<Money>,
    currency: Option<Currency>,
) -> Result<Shell> {
    let mut session = Session::from_settings(settings);
    if settings.audit_enabled {
        session = session.with_audit(AuditLogger::new(paths.audit_log()));
    }

    if let Some(currency) = currency {
        session.execute(Command::SetCurrency(currency))?;
    }
    if let Some(income) = income {
        session
            .execute(Command::SetIncome(income))
            .context("Invalid --income")?;
    }

    Ok(Shell::new(session, settings.resolve_export_dir(paths)))
}
