//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = "../../data/tasks.json";

fn mathtutor() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("mathtutor").unwrap()
}

/// A command wired to the sample catalog and a private data directory.
fn tutor_in(data: &TempDir) -> Command {
    let mut cmd = mathtutor();
    cmd.env_remove("MATHTUTOR_CATALOG")
        .env_remove("MATHTUTOR_DATA_DIR")
        .arg("--catalog")
        .arg(CATALOG)
        .arg("--data-dir")
        .arg(data.path());
    cmd
}

#[test]
fn validate_sample_catalog() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 categories"))
        .stdout(predicate::str::contains("10 offered tasks"))
        .stdout(predicate::str::contains("Catalog is valid"));
}

#[test]
fn validate_missing_catalog_fails() {
    let data = TempDir::new().unwrap();
    mathtutor()
        .arg("--catalog")
        .arg("nonexistent.json")
        .arg("--data-dir")
        .arg(data.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn list_categories_and_tasks() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Algebra"))
        .stdout(predicate::str::contains("Geometry"));

    tutor_in(&data)
        .args(["list", "algebra", "linear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("algebra/linear/1"))
        .stdout(predicate::str::contains("algebra/linear/3"))
        .stdout(predicate::str::contains("algebra/linear/4").not());
}

#[test]
fn show_task_with_solution() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["show", "algebra/linear/1", "--solution"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solve the equation 2x = 6."))
        .stdout(predicate::str::contains("Answer: 3"));
}

#[test]
fn correct_answer_earns_first_steps() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/2", "2.5", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("First Steps"));

    assert!(data.path().join("math_tutor_progress.json").exists());
    assert!(data.path().join("math_tutor_stats.json").exists());
}

#[test]
fn achievements_are_announced_once() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/1", "3", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Achievement unlocked"));

    tutor_in(&data)
        .args(["answer", "algebra/linear/1", "3", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solved 2 times"))
        .stdout(predicate::str::contains("Achievement unlocked").not());
}

#[test]
fn wrong_answer_is_reported() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/3", "-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect"));
}

#[test]
fn negative_and_synonym_answers() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/3", "-2", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"));

    tutor_in(&data)
        .args(["answer", "logic/statements/1", "Yes", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"));

    tutor_in(&data)
        .args(["answer", "algebra/quadratic/1", "2;3", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"));
}

#[test]
fn blank_answer_and_unknown_task_fail() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/1", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("please enter an answer"));

    tutor_in(&data)
        .args(["answer", "algebra/linear/99", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found"));

    tutor_in(&data)
        .args(["answer", "not-a-key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid task key"));
}

#[test]
fn streak_over_consecutive_days() {
    let data = TempDir::new().unwrap();
    let days = [
        ("algebra/linear/1", "3", "2026-03-01"),
        ("algebra/linear/2", "2,5", "2026-03-02"),
        ("geometry/angles/1", "180", "2026-03-03"),
    ];
    for (task, answer, today) in days {
        tutor_in(&data)
            .args(["answer", task, answer, "--today", today])
            .assert()
            .success();
    }

    tutor_in(&data)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks solved:   3"))
        .stdout(predicate::str::contains("Current streak: 3 day(s)"))
        .stdout(predicate::str::contains("Last activity:  2026-03-03"));
}

#[test]
fn mark_difficult_shows_in_progress() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["mark", "algebra/linear/1", "difficult"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as difficult"));

    tutor_in(&data)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 0/10 tasks"))
        .stdout(predicate::str::contains("Algebra - Linear equations"));
}

#[test]
fn mark_understood_counts_as_solved() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["mark", "geometry/angles/2", "understood", "--today", "2026-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Streak started"));

    tutor_in(&data)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 1/10 tasks"));
}

#[test]
fn report_formats() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "geometry/angles/1", "180", "--today", "2026-03-01"])
        .assert()
        .success();

    tutor_in(&data)
        .args(["report", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Summary"))
        .stdout(predicate::str::contains("First Steps"));

    let out = data.path().join("report.json");
    tutor_in(&data)
        .args(["report", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["summary"]["solved_tasks"], 1);
    assert_eq!(report["summary"]["total_tasks"], 10);
}

#[test]
fn export_then_import_into_fresh_directory() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/1", "3", "--today", "2026-03-01"])
        .assert()
        .success();

    let file = data.path().join("backup.json");
    tutor_in(&data)
        .arg("export")
        .arg("--output")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 solved task(s)"));

    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert!(exported.get("exportDate").is_some());
    assert!(exported["progress"]["solvedTasks"]["algebra/linear/1"].is_object());

    let fresh = TempDir::new().unwrap();
    tutor_in(&fresh)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 solved task(s), 1 achievement(s)"));

    tutor_in(&fresh)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks solved:   1"));
}

#[test]
fn export_uses_default_file_name() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .current_dir(data.path())
        .args(["export", "--today", "2026-01-05"])
        .assert()
        .success();
    assert!(data.path().join("math-tutor-progress-2026-01-05.json").exists());
}

#[test]
fn import_rejects_incomplete_file() {
    let data = TempDir::new().unwrap();
    let file = data.path().join("bad.json");
    std::fs::write(&file, r#"{"progress": {}}"#).unwrap();

    tutor_in(&data)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing the 'stats' section"));
}

#[test]
fn reset_requires_confirmation() {
    let data = TempDir::new().unwrap();
    tutor_in(&data)
        .args(["answer", "algebra/linear/1", "3"])
        .assert()
        .success();

    tutor_in(&data)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    tutor_in(&data)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress reset"));

    tutor_in(&data)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks solved:   0"));
}

#[test]
fn missing_catalog_runs_in_reduced_mode() {
    let data = TempDir::new().unwrap();
    let reduced = |cmd: &mut Command| {
        cmd.env_remove("MATHTUTOR_CATALOG")
            .arg("--catalog")
            .arg("nonexistent.json")
            .arg("--data-dir")
            .arg(data.path());
    };

    let mut list = mathtutor();
    reduced(&mut list);
    list.arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog is not loaded"));

    let mut stats = mathtutor();
    reduced(&mut stats);
    stats
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tasks solved:   0"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    mathtutor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mathtutor.toml"))
        .stdout(predicate::str::contains("Created data/tasks.json"));

    assert!(dir.path().join("mathtutor.toml").exists());
    assert!(dir.path().join("data/tasks.json").exists());

    mathtutor()
        .current_dir(dir.path())
        .env_remove("MATHTUTOR_CATALOG")
        .env_remove("MATHTUTOR_DATA_DIR")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 offered tasks"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    mathtutor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    mathtutor()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
