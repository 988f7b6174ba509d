/// End-to-end CLI tests for the anchor-workbench binary
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn workbench() -> Command {
    let mut cmd = Command::cargo_bin("anchor-workbench").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    workbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("menu"))
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("trace"))
        .stdout(predicate::str::contains("pda"));
}

#[test]
fn test_version() {
    workbench()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("anchor-workbench"));
}

#[test]
fn test_completions_generate() {
    workbench()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("anchor-workbench"));
}

#[test]
fn test_unknown_subcommand_fails() {
    workbench().arg("frobnicate").assert().failure();
}

#[test]
fn test_pda_non_interactive() {
    let program_id = "07".repeat(32);
    workbench()
        .args(["pda", "--program-id", &program_id, "--seed", "lottery"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Derived address:"))
        .stdout(predicate::str::contains("bump"));
}

#[test]
fn test_pda_is_deterministic() {
    let program_id = "a1".repeat(32);
    let run = || {
        let assert = workbench()
            .args(["pda", "--program-id", &program_id, "--seed", "vault"])
            .assert()
            .success();
        String::from_utf8(assert.get_output().stdout.clone()).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_pda_rejects_bad_program_id() {
    workbench()
        .args(["pda", "--program-id", "zz", "--seed", "x"])
        .assert()
        .failure();
}

#[test]
fn test_pda_rejects_seeds_without_program() {
    workbench()
        .args(["pda", "--seed", "x"])
        .assert()
        .failure();
}

#[test]
fn test_trace_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    workbench()
        .current_dir(temp_dir.path())
        .args(["trace", "--file", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trace"));
}

#[test]
fn test_compile_unknown_program_fails() {
    let temp_dir = TempDir::new().unwrap();
    workbench()
        .current_dir(temp_dir.path())
        .args(["compile", "--program", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}
