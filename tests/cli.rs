use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spendbook(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spendbook").unwrap();
    cmd.env("SPENDBOOK_DATA_DIR", data_dir)
        .env("SPENDBOOK_LOG", "off");
    cmd
}

fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("session.sb");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_run_script_reports_totals() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(
        temp_dir.path(),
        "# january\nadd Food 200 2024-01-05\nadd Rent 500 2024-01-01\nlist\nsummary\n",
    );

    spendbook(temp_dir.path())
        .args(["--income", "1000", "run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01 Rent"))
        .stdout(predicate::str::contains("Total Expenses"))
        .stdout(predicate::str::contains("USD 300.00"));
}

#[test]
fn test_overspend_is_a_warning() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(
        temp_dir.path(),
        "income 100\nadd Food 150 2024-01-05\nsummary\n",
    );

    spendbook(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: Expense amount cannot exceed total balance"))
        .stdout(predicate::str::contains("USD 100.00"));
}

#[test]
fn test_upsert_and_missing_update() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(
        temp_dir.path(),
        "income 1000\n\
         add Food 50 2024-01-05\n\
         add Food 80 2024-01-05\n\
         add Food 10 2024-01-06\n\
         update Food 5 2024-01-07\n\
         categories\n",
    );

    spendbook(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated Food on 2024-01-05: USD 50.00 -> USD 80.00"))
        .stdout(predicate::str::contains(
            "No unique expense matches Food@2024-01-07 (0 matching records)",
        ))
        .stdout(predicate::str::contains("USD 90.00"));
}

#[test]
fn test_export_and_report_files() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("finance_report.json");
    let script = write_script(
        temp_dir.path(),
        &format!(
            "income 1000\nadd Food 200 2024-01-05\nexport json\nreport \"{}\" --json\n",
            report.display()
        ),
    );

    spendbook(temp_dir.path())
        .args(["--currency", "eur", "run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 records"));

    let export = fs::read_to_string(temp_dir.path().join("exports").join("expenses.json")).unwrap();
    assert!(export.contains("\"Category\": \"Food\""));

    let report = fs::read_to_string(report).unwrap();
    assert!(report.contains("Finance Report"));
    assert!(report.contains("EUR200.00"));
}

#[test]
fn test_bad_line_fails_script() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "income 100\nspend 10\n");

    spendbook(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_update_without_date_fails_script() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(
        temp_dir.path(),
        "income 100\nadd Food 10 2024-01-05\nupdate Food 20\n",
    );

    spendbook(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_audit_log_written() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "income 100\nadd Food 10 2024-01-05\n");

    spendbook(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success();

    let log = fs::read_to_string(temp_dir.path().join("audit.log")).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.contains("Food@2024-01-05"));
}

#[test]
fn test_shell_reads_stdin() {
    let temp_dir = TempDir::new().unwrap();

    spendbook(temp_dir.path())
        .write_stdin("income 500\nadd Books 25 2024-03-01\nnarrate\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("For Books, you spent USD 25.00"))
        .stdout(predicate::str::contains("Your total expenses are USD 25.00"));
}

#[test]
fn test_init_and_config() {
    let temp_dir = TempDir::new().unwrap();

    spendbook(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Spendbook"));

    assert!(temp_dir.path().join("config.json").exists());

    spendbook(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default currency: USD"))
        .stdout(predicate::str::contains("Run 'spendbook init'").not());
}
