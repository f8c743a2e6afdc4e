//! Runs the `reflections` binary in schema-tool mode (no flags) against
//! throwaway database files.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_schema_tool(dir: &TempDir, db_path: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reflections"))
        .current_dir(dir.path())
        .env("REFLECTIONS_DB_PATH", db_path)
        .output()
        .expect("failed to execute reflections")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn creates_then_reports_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("reflections.db");

    let first = run_schema_tool(&dir, &db);
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert_eq!(stdout(&first).trim(), "Database created.");

    let second = run_schema_tool(&dir, &db);
    assert!(second.status.success());
    assert_eq!(stdout(&second).trim(), "Database already up-to-date.");
}

#[test]
fn unexpected_columns_exit_with_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("reflections.db");
    rusqlite::Connection::open(&db)
        .unwrap()
        .execute_batch(
            "CREATE TABLE entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                content TEXT NOT NULL,
                legacy_tags TEXT
            );",
        )
        .unwrap();

    let output = run_schema_tool(&dir, &db);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unexpected columns: legacy_tags"));
}

#[test]
fn unopenable_path_exits_with_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("no-such-dir").join("reflections.db");

    let output = run_schema_tool(&dir, &db);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("failed to initialise database"));
    assert!(!db.exists());
}
