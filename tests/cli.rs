use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn justdad(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("justdad").unwrap();
    cmd.env("JUSTDAD_HOME", home.path())
        .env_remove("JUSTDAD_CONFIG")
        .env_remove("JUSTDAD_DB")
        .env("NO_COLOR", "1");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn add_list_and_stats() {
    let home = TempDir::new().unwrap();

    for (day, text) in [
        ("2024-05-13T12:00:00+00:00", "school run #school"),
        ("2024-05-14T12:00:00+00:00", "dentist with Sam #dentist"),
        ("2024-05-15T12:00:00+00:00", "dentist follow-up #dentist"),
    ] {
        justdad(&home)
            .args(["add", text, "--date", day])
            .assert()
            .success()
            .stdout(predicate::str::contains("Saved"));
    }

    let list = json_output(justdad(&home).args(["-o", "json", "list"]));
    assert_eq!(list["count"], 3);

    let stats = json_output(justdad(&home).args([
        "-o",
        "json",
        "stats",
        "--now",
        "2024-05-15T20:00:00+00:00",
    ]));
    assert_eq!(stats["total_entries"], 3);
    assert_eq!(stats["longest_streak"], 3);
    assert_eq!(stats["current_streak"], 3);
    assert_eq!(stats["most_used_tags"][0], "dentist");
    assert!(home.path().join("justdad.db").exists());
}

#[test]
fn guided_entry_shows_in_trends() {
    let home = TempDir::new().unwrap();

    justdad(&home)
        .args([
            "add",
            "First weekend at the new place",
            "--emotion",
            "hopeful",
            "--date",
            "2024-05-15T10:00:00+00:00",
        ])
        .assert()
        .success();

    let trends = json_output(justdad(&home).args([
        "-o",
        "json",
        "stats",
        "trends",
        "--days",
        "7",
        "--now",
        "2024-05-15T20:00:00+00:00",
    ]));
    assert_eq!(trends["emotion_trends"][0]["emotion"], "hopeful");
    assert_eq!(trends["emotion_trends"][0]["weight"], 7);
}

#[test]
fn show_and_delete_missing_entry_fail() {
    let home = TempDir::new().unwrap();

    justdad(&home)
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));

    justdad(&home)
        .args(["delete", "does-not-exist"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn config_sets_default_output() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\n",
    )
    .unwrap();

    let stats = json_output(justdad(&home).args(["stats", "streak"]));
    assert_eq!(stats["current_streak"], 0);
    assert!(stats["last_entry_day"].is_null());
}

#[test]
fn empty_content_is_rejected() {
    let home = TempDir::new().unwrap();

    justdad(&home)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn streak_uses_each_entry_local_offset() {
    let home = TempDir::new().unwrap();

    // One pair straddles local midnight in winter, the other in summer.
    for instant in [
        "2024-01-10T23:30:00-05:00",
        "2024-01-11T00:30:00-05:00",
        "2024-07-10T23:30:00-04:00",
        "2024-07-11T00:30:00-04:00",
    ] {
        justdad(&home)
            .env("TZ", "EST5EDT,M3.2.0,M11.1.0")
            .args(["add", "bedtime call", "--date", instant])
            .assert()
            .success();
    }

    let streak = json_output(
        justdad(&home)
            .env("TZ", "EST5EDT,M3.2.0,M11.1.0")
            .args(["-o", "json", "stats", "streak"]),
    );
    assert_eq!(streak["longest_streak"], 2);

    justdad(&home)
        .env("TZ", "EST5EDT,M3.2.0,M11.1.0")
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-10 23:30"))
        .stdout(predicate::str::contains("2024-07-11 00:30"));
}

#[test]
fn oversized_trend_window_is_an_error() {
    let home = TempDir::new().unwrap();

    justdad(&home)
        .args(["stats", "trends", "--days", "1000000000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}
