use std::process::Command;

use tempfile::tempdir;

fn seed_alias_store(dir: &std::path::Path) {
    let aliases = serde_json::json!({
        "local": {
            "type": "mongodb",
            "host": "localhost",
            "port": 27017,
            "username": "admin",
            "password": "secret",
            "database": "uniquery"
        }
    });
    std::fs::write(dir.join("aliases.json"), aliases.to_string()).expect("write aliases.json");
}

#[test]
fn executes_a_select_against_a_seeded_alias() {
    let dir = tempdir().expect("temp dir");
    seed_alias_store(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_uniquery"))
        .env("UNIQUERY_HOME", dir.path())
        .args(["--alias", "local", "-e", "SELECT _id AS id, name FROM employees"])
        .output()
        .expect("run CLI");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn unknown_alias_fails_with_a_nonzero_exit_code() {
    let dir = tempdir().expect("temp dir");
    seed_alias_store(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_uniquery"))
        .env("UNIQUERY_HOME", dir.path())
        .args(["--alias", "missing", "-e", "SELECT 1"])
        .output()
        .expect("run CLI");

    assert!(!output.status.success());
}

#[test]
fn execute_without_an_alias_fails_cleanly() {
    let dir = tempdir().expect("temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_uniquery"))
        .env("UNIQUERY_HOME", dir.path())
        .args(["-e", "SELECT 1"])
        .output()
        .expect("run CLI");

    assert!(!output.status.success());
}
