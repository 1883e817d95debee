//! CLI integration tests for the note commands
//!
//! Every test runs the real binary against a file store in its own
//! temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// A command isolated in `temp_dir`: no quicknote.yaml unless a test writes one, file storage
fn note_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quicknote").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env("QUICKNOTE_DATA_DIR", temp_dir.path().join("data"))
        .env("QUICKNOTE_STORAGE", "file")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Save a note and return its id
fn save(temp_dir: &TempDir, content: &str, tags: &[&str]) -> String {
    let mut cmd = note_cmd(temp_dir);
    cmd.args(["note", "save", content, "--format", "json"]);
    for tag in tags {
        cmd.args(["--tag", tag]);
    }
    let payload = json_output(&mut cmd);
    assert_eq!(payload["success"], true);
    payload["note"]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_no_command_prints_help() {
    let temp_dir = TempDir::new().unwrap();
    note_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_save_text_output() {
    let temp_dir = TempDir::new().unwrap();

    note_cmd(&temp_dir)
        .args(["note", "save", "const x = 1", "--tag", "javascript"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note saved successfully with ID: "));

    assert!(temp_dir.path().join("data").join("quick-notes.json").is_file());
}

#[test]
fn test_save_from_stdin() {
    let temp_dir = TempDir::new().unwrap();

    note_cmd(&temp_dir)
        .args(["note", "save", "-"])
        .write_stdin("line one\nline two\n")
        .assert()
        .success();

    let payload = json_output(note_cmd(&temp_dir).args(["note", "recent", "--format", "json"]));
    assert_eq!(payload["notes"][0]["content"], "line one\nline two");
}

#[test]
fn test_list_orders_newest_first_and_limits() {
    let temp_dir = TempDir::new().unwrap();
    let first = save(&temp_dir, "first", &[]);
    let second = save(&temp_dir, "second", &[]);
    let third = save(&temp_dir, "third", &[]);

    let payload = json_output(note_cmd(&temp_dir).args(["note", "list", "--format", "json"]));
    let ids: Vec<&str> = payload["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![third.as_str(), second.as_str(), first.as_str()]);

    let payload = json_output(note_cmd(&temp_dir).args([
        "note", "list", "--limit", "2", "--format", "json",
    ]));
    assert_eq!(payload["count"], 2);
}

#[test]
fn test_list_with_query_matches_content_and_tags() {
    let temp_dir = TempDir::new().unwrap();
    save(&temp_dir, "SELECT * FROM users", &["sql"]);
    save(&temp_dir, "fn main() {}", &["rust"]);
    save(&temp_dir, "notes on Rust traits", &[]);

    let payload = json_output(note_cmd(&temp_dir).args([
        "note", "list", "--query", "RUST", "--format", "json",
    ]));
    assert_eq!(payload["count"], 2);
    assert_eq!(payload["query"], "RUST");

    note_cmd(&temp_dir)
        .args(["note", "list", "--query", "sql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 note(s)"))
        .stdout(predicate::str::contains("SELECT * FROM users"))
        .stdout(predicate::str::contains("#sql"));
}

#[test]
fn test_list_empty_store() {
    let temp_dir = TempDir::new().unwrap();

    note_cmd(&temp_dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));

    note_cmd(&temp_dir)
        .args(["note", "recent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes saved yet"));
}

#[test]
fn test_recent_count() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..4 {
        save(&temp_dir, &format!("note {i}"), &[]);
    }

    let payload = json_output(note_cmd(&temp_dir).args([
        "note", "recent", "--count", "2", "--format", "json",
    ]));
    assert_eq!(payload["count"], 2);
    assert_eq!(payload["notes"][0]["content"], "note 3");
    assert_eq!(payload["notes"][1]["content"], "note 2");
}

#[test]
fn test_tag_lookup_is_substring_and_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    save(&temp_dir, "a", &["JavaScript"]);
    save(&temp_dir, "b", &["python"]);

    let payload = json_output(note_cmd(&temp_dir).args(["note", "tag", "script", "--format", "json"]));
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["notes"][0]["content"], "a");

    note_cmd(&temp_dir)
        .args(["note", "tag", "go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes tagged 'go'"));
}

#[test]
fn test_delete_existing_note() {
    let temp_dir = TempDir::new().unwrap();
    let id = save(&temp_dir, "to be removed", &[]);

    note_cmd(&temp_dir)
        .args(["note", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Note {id} deleted successfully"
        )));

    let payload = json_output(note_cmd(&temp_dir).args(["note", "list", "--format", "json"]));
    assert_eq!(payload["count"], 0);
}

#[test]
fn test_delete_missing_note_exits_with_warning() {
    let temp_dir = TempDir::new().unwrap();

    note_cmd(&temp_dir)
        .args(["note", "delete", "nonexistent"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Note nonexistent not found"));

    note_cmd(&temp_dir)
        .args(["note", "delete", "nonexistent", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"deleted\": false"));
}

#[test]
fn test_notes_persist_in_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let id = save(&temp_dir, "persisted", &["disk"]);

    let raw = fs::read_to_string(temp_dir.path().join("data").join("quick-notes.json")).unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["id"], id.as_str());
    assert_eq!(stored[0]["tags"][0], "disk");
}

#[test]
fn test_sqlite_backend_via_env() {
    let temp_dir = TempDir::new().unwrap();

    let payload = json_output(
        note_cmd(&temp_dir)
            .env("QUICKNOTE_STORAGE", "sqlite")
            .args(["note", "save", "in sqlite", "--format", "json"]),
    );
    assert_eq!(payload["note"]["content"], "in sqlite");
    assert!(temp_dir.path().join("data").join("notes.db").is_file());
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.yaml");
    fs::write(&config_path, "bind_addr: [not, a, string").unwrap();

    note_cmd(&temp_dir)
        .args(["--config", config_path.to_str().unwrap(), "note", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_discovered_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("quicknote.yaml"), "storage: [file").unwrap();

    note_cmd(&temp_dir)
        .args(["note", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quicknote.yaml"));
}

#[test]
fn test_serve_rejects_invalid_bind_override() {
    let temp_dir = TempDir::new().unwrap();

    note_cmd(&temp_dir)
        .args(["serve", "--bind", "not-an-address"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bind_addr"));
}
