use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn vibe(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vibe").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

#[test]
fn test_add_then_list() {
    let dir = TempDir::new().unwrap();

    vibe(&dir)
        .args(["add", "12.5", "--mood", "regretless-joy", "--note", "a|b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-12.50"));

    vibe(&dir)
        .args(["add", "100", "--income", "--mood", "😀", "--category", "Salary"])
        .assert()
        .success();

    vibe(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("a/b"))
        .stdout(predicate::str::contains("[Salary]"))
        .stdout(predicate::str::contains("+100.00"));

    let content = fs::read_to_string(dir.path().join("accounting_records.txt")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("时间|类型|价格|备注|心情"));
    assert!(lines.next().unwrap().ends_with("|支出|12.50|a/b|🥳"));
    assert!(lines.next().unwrap().ends_with("|收入|100.00|[Salary]|😀"));
}

#[test]
fn test_add_rejects_zero_amount() {
    let dir = TempDir::new().unwrap();
    vibe(&dir)
        .args(["add", "0", "--mood", "happy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_reset_with_yes() {
    let dir = TempDir::new().unwrap();
    vibe(&dir)
        .args(["add", "3", "--mood", "sad"])
        .assert()
        .success();

    vibe(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records removed"));

    vibe(&dir)
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records yet."));
}

#[test]
fn test_reset_cancelled_without_confirmation() {
    let dir = TempDir::new().unwrap();
    vibe(&dir)
        .args(["add", "3", "--mood", "sad"])
        .assert()
        .success();

    vibe(&dir)
        .arg("reset")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));

    vibe(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("-3.00"));
}

#[test]
fn test_reset_recovers_unreadable_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("accounting_records.txt");
    fs::write(&ledger, [0xff, 0xfe, b'\n']).unwrap();

    vibe(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("could not be read"))
        .stdout(predicate::str::contains("Ledger reset."));
    assert_eq!(fs::read_to_string(&ledger).unwrap(), "时间|类型|价格|备注|心情\n");
}

#[test]
fn test_reset_prompt_on_unreadable_ledger() {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("accounting_records.txt");
    fs::write(&ledger, [0xff, 0xfe, b'\n']).unwrap();

    vibe(&dir)
        .arg("reset")
        .write_stdin("Y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot be read"))
        .stdout(predicate::str::contains("Ledger reset."));
    assert_eq!(fs::read_to_string(&ledger).unwrap(), "时间|类型|价格|备注|心情\n");
}

#[test]
fn test_summary_and_path() {
    let dir = TempDir::new().unwrap();
    vibe(&dir)
        .args(["add", "20", "--mood", "impulse-tax"])
        .assert()
        .success();

    vibe(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Regret tax"))
        .stdout(predicate::str::contains("20.00"))
        .stdout(predicate::str::contains("Today's vibe  +2"));

    vibe(&dir)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("accounting_records.txt"));
}

#[test]
fn test_config_limits_recent() {
    let dir = TempDir::new().unwrap();
    vibe(&dir)
        .args(["config", "recent-limit", "1"])
        .assert()
        .success();
    for note in ["older", "newer"] {
        vibe(&dir)
            .args(["add", "1", "--mood", "neutral", "--note", note])
            .assert()
            .success();
    }

    vibe(&dir)
        .arg("recent")
        .assert()
        .success()
        .stdout(predicate::str::contains("newer"))
        .stdout(predicate::str::contains("older").not());
}
