use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fittrack(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fittrack").unwrap();
    cmd.env("FITTRACK_HOME", home.path())
        .env_remove("FITTRACK_LOG")
        .env_remove("FITTRACK_PASSWORD");
    cmd
}

fn logged_in() -> TempDir {
    let home = TempDir::new().unwrap();
    fittrack(&home)
        .args(["login", "demo@example.com", "--password", "password"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo User"));
    home
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    fittrack(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_commands_need_login() {
    let home = TempDir::new().unwrap();
    fittrack(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_wrong_password_is_refused() {
    let home = TempDir::new().unwrap();
    fittrack(&home)
        .args(["login", "demo@example.com", "--password", "letmein"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[test]
fn test_password_from_env() {
    let home = TempDir::new().unwrap();
    fittrack(&home)
        .env("FITTRACK_PASSWORD", "password")
        .args(["login", "demo@example.com"])
        .assert()
        .success();
    fittrack(&home).arg("whoami").assert().success();
}

#[test]
fn test_first_list_shows_seed_workouts() {
    let home = logged_in();
    let list = json_stdout(fittrack(&home).args(["-o", "json", "list"]));

    assert_eq!(list["count"], 4);
    let types: Vec<_> = list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, ["Legs", "Back", "Shoulder", "ABS"]);
    assert!(home.path().join("data").join("workouts.json").exists());
}

#[test]
fn test_add_list_and_delete() {
    let home = logged_in();

    let added = json_stdout(fittrack(&home).args([
        "add", "Running", "-m", "30", "-c", "320", "--date", "2025-04-15T12:00:00Z", "-o", "json",
    ]));
    assert_eq!(added["workout"]["type"], "Running");
    assert_eq!(added["workout"]["date"], "2025-04-15T12:00:00.000Z");
    let id = added["workout"]["id"].as_str().unwrap().to_string();

    let list = json_stdout(fittrack(&home).args(["list", "-o", "json"]));
    assert_eq!(list["count"], 5);

    let summary = json_stdout(fittrack(&home).args([
        "-o", "json", "stats", "summary", "--date", "2025-04-15",
    ]));
    assert_eq!(summary["count"], 1);
    assert_eq!(summary["total_calories"], 320);

    fittrack(&home)
        .args(["rm", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    let list = json_stdout(fittrack(&home).args(["list", "-o", "json"]));
    assert_eq!(list["count"], 4);
}

#[test]
fn test_rm_unknown_id_fails() {
    let home = logged_in();
    fittrack(&home)
        .args(["rm", "workout-404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workout 'workout-404' not found"));
}

#[test]
fn test_add_rejects_zero_duration() {
    let home = logged_in();
    fittrack(&home)
        .args(["add", "Running", "-m", "0", "-c", "320"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duration must be at least 1"));
}

#[test]
fn test_logout_ends_session() {
    let home = logged_in();
    fittrack(&home).arg("logout").assert().success();
    fittrack(&home)
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_stats_tally_and_dashboard() {
    let home = logged_in();
    let tally = json_stdout(fittrack(&home).args(["-o", "json", "stats", "tally"]));
    assert_eq!(tally["Legs"], 1);

    fittrack(&home)
        .arg("dashboard")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("WORKOUT DASHBOARD"));
}

#[test]
fn test_sqlite_backend_from_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "storage:\n  backend: sqlite\n  seed_on_first_run: false\n",
    )
    .unwrap();

    fittrack(&home)
        .args(["login", "demo@example.com", "-p", "password"])
        .assert()
        .success();
    fittrack(&home)
        .args(["add", "Cardio", "-m", "20", "-c", "150"])
        .assert()
        .success();

    let list = json_stdout(fittrack(&home).args(["list", "-o", "json"]));
    assert_eq!(list["count"], 1);
    assert!(home.path().join("fittrack.db").exists());
}

#[test]
fn test_bad_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "stats: [not, a, map]\n").unwrap();

    fittrack(&home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading settings"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    fittrack(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fittrack"));
}

#[test]
fn test_corrupt_workouts_file_is_backed_up() {
    let home = logged_in();
    let data = home.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("workouts.json"), "{not json").unwrap();

    fittrack(&home)
        .args(["add", "Running", "-m", "30", "-c", "320"])
        .assert()
        .success();

    let backup = std::fs::read_to_string(data.join("workouts_corrupt.json")).unwrap();
    assert_eq!(backup, "{not json");
    let list = json_stdout(fittrack(&home).args(["list", "-o", "json"]));
    assert_eq!(list["count"], 1);
}

#[test]
fn test_series_days_out_of_range_is_refused() {
    let home = logged_in();
    fittrack(&home)
        .args(["stats", "series", "--days", "200000000"])
        .assert()
        .failure();
}
