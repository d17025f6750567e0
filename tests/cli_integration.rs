//! Integration tests for the `np` CLI.
//!
//! Each test seeds a temp data directory through the library, runs `np` as a
//! subprocess with `-C` pointing at it, and checks stdout, stderr and the
//! stored notes.

use std::path::{Path, PathBuf};
use std::process::Command;

use notepad::io::file_store::FileStore;
use notepad::io::recovery::{self, RecoveryCategory};
use notepad::io::store::NoteStore;
use notepad::model::{Category, NOTES_COLLECTION, NoteRef, NoteUpdate};

/// Get the path to the built `np` binary.
fn np_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_np"))
}

/// Seed two notes: 1 "Groceries" (Life, older) and 2 "Standup" (Work, newer).
fn create_test_notes(dir: &Path) {
    let mut store = FileStore::open(dir);
    for (title, body, category, at) in [
        ("Groceries", "milk\neggs", Category::Life, 1_000),
        ("Standup", "status update", Category::Work, 2_000),
    ] {
        let fields = NoteUpdate {
            title: Some(title.into()),
            body: Some(body.into()),
            category: Some(category),
            created_at: Some(at),
            modified_at: Some(at),
        };
        store.insert(NOTES_COLLECTION, fields).unwrap();
    }
}

/// Run `np` and return (stdout, stderr, success).
fn run_np(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(np_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("failed to run np");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `np` and assert success, returning stdout.
fn run_np_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_np(dir, args);
    if !success {
        panic!(
            "np {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `np` and assert failure, returning stderr.
fn run_np_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_np(dir, args);
    if success {
        panic!("np {:?} should have failed:\nstdout: {}", args, stdout);
    }
    stderr
}

fn stored(dir: &Path, id: i64) -> Option<notepad::model::Note> {
    FileStore::open(dir).get(&NoteRef::for_id(id)).unwrap()
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn test_list_newest_first() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let out = run_np_ok(tmp.path(), &["list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Standup"));
    assert!(lines[0].contains("Work"));
    assert!(lines[1].contains("Groceries"));
}

#[test]
fn test_list_category_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let out = run_np_ok(tmp.path(), &["list", "--category", "life"]);
    assert!(out.contains("Groceries"));
    assert!(!out.contains("Standup"));
}

#[test]
fn test_list_unknown_category() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let err = run_np_err(tmp.path(), &["list", "--category", "Hobby"]);
    assert!(err.contains("unknown category 'Hobby'"));
}

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_np_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "No notes.");
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let out = run_np_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let notes = parsed.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["reference"], "content://notepad/notes/2");
    assert_eq!(notes[0]["category"], "Work");
    assert_eq!(notes[1]["title"], "Groceries");
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn test_show_by_id_and_reference() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let by_id = run_np_ok(tmp.path(), &["show", "1"]);
    let by_ref = run_np_ok(tmp.path(), &["show", "content://notepad/notes/1"]);
    assert_eq!(by_id, by_ref);
    assert!(by_id.starts_with("Groceries\n"));
    assert!(by_id.contains("content://notepad/notes/1 | Life | modified"));
    assert!(by_id.ends_with("milk\neggs\n"));
}

#[test]
fn test_show_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let out = run_np_ok(tmp.path(), &["show", "2", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], 2);
    assert_eq!(parsed["body"], "status update");
    assert_eq!(parsed["modified_at"], 2_000);
}

#[test]
fn test_show_not_found() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let err = run_np_err(tmp.path(), &["show", "42"]);
    assert!(err.contains("note not found: content://notepad/notes/42"));
}

#[test]
fn test_show_rejects_invalid_references() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    for raw in [
        "content://com.google.provider.NotePad/notes/1",
        "content://contacts/people/1",
        "content://notepad/notes/-9223372036854775808",
    ] {
        let err = run_np_err(tmp.path(), &["show", raw]);
        assert!(err.contains("invalid note reference"), "{raw}: {err}");
    }
}

// ---------------------------------------------------------------------------
// edit / open (launch errors surface before the terminal is used)
// ---------------------------------------------------------------------------

#[test]
fn test_edit_invalid_reference_fails_without_touching_notes() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());
    let before = std::fs::read_to_string(FileStore::open(tmp.path()).notes_path()).unwrap();

    let err = run_np_err(
        tmp.path(),
        &["edit", "content://notepad/notes/-9223372036854775808"],
    );
    assert!(err.contains(
        "error: invalid note reference: content://notepad/notes/-9223372036854775808"
    ));

    let after = std::fs::read_to_string(FileStore::open(tmp.path()).notes_path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_edit_missing_note() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_np_err(tmp.path(), &["edit", "7"]);
    assert!(err.contains("note not found: content://notepad/notes/7"));
}

#[test]
fn test_open_unknown_action() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_np_err(tmp.path(), &["open", "share"]);
    assert!(err.contains("unknown action: share"));
}

#[test]
fn test_open_edit_without_reference() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_np_err(tmp.path(), &["open", "edit"]);
    assert!(err.contains("invalid note reference: (none)"));
}

// ---------------------------------------------------------------------------
// category / delete
// ---------------------------------------------------------------------------

#[test]
fn test_category_sets_label() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let out = run_np_ok(tmp.path(), &["category", "1", "study"]);
    assert_eq!(out.trim(), "content://notepad/notes/1: Study");

    let note = stored(tmp.path(), 1).unwrap();
    assert_eq!(note.category, Category::Study);
    assert_eq!(note.title, "Groceries");
    assert!(note.modified_at > 1_000);
}

#[test]
fn test_category_unknown_label() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let err = run_np_err(tmp.path(), &["category", "1", "Errands"]);
    assert!(err.contains("unknown category 'Errands'"));
    assert_eq!(stored(tmp.path(), 1).unwrap().category, Category::Life);
}

#[test]
fn test_delete() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_notes(tmp.path());

    let out = run_np_ok(tmp.path(), &["delete", "2"]);
    assert_eq!(out.trim(), "deleted content://notepad/notes/2");
    assert!(stored(tmp.path(), 2).is_none());
    assert!(stored(tmp.path(), 1).is_some());

    let err = run_np_err(tmp.path(), &["delete", "2"]);
    assert!(err.contains("note not found"));
}

// ---------------------------------------------------------------------------
// recovery
// ---------------------------------------------------------------------------

#[test]
fn test_recovery_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_np_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "No recovery entries.");
}

#[test]
fn test_recovery_show_and_clear() {
    let tmp = tempfile::TempDir::new().unwrap();
    recovery::log_unsaved_note(
        tmp.path(),
        RecoveryCategory::Save,
        Some("content://notepad/notes/3"),
        "Draft",
        "words that did not make it",
        "disk full",
    );
    recovery::log_unsaved_note(
        tmp.path(),
        RecoveryCategory::Delete,
        None,
        "Other",
        "",
        "locked",
    );

    let out = run_np_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("[save] note write failed"));
    assert!(out.contains("Note: content://notepad/notes/3"));
    assert!(out.contains("words that did not make it"));
    // Most recent first
    assert!(out.find("[delete]").unwrap() < out.find("[save]").unwrap());

    let out = run_np_ok(tmp.path(), &["recovery", "--limit", "1", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["category"], "delete");

    let out = run_np_ok(tmp.path(), &["recovery", "--clear"]);
    assert_eq!(out.trim(), "cleared 2 recovery entries");
    let out = run_np_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "No recovery entries.");
}
