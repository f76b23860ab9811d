#![expect(clippy::unwrap_used, reason = "test code")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const DATASET: &str = "\
maladie,annee,region,indicateur,valeur
cancer,2018,Bretagne,prevalence,1.0
cancer,2019,Bretagne,prevalence,3.0
cancer,2019,Occitanie,prevalence,
cancer,,Bretagne,prevalence,4.0
asthme,2018,Bretagne,prevalence,
";

fn healthstat(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("healthstat").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("HEALTHSTAT_DB_PATH")
        .env("RUST_LOG", "warn")
        .arg("--db-path")
        .arg(db);
    cmd
}

fn loaded_db() -> TempDir {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("maladies.csv");
    std::fs::write(&csv, DATASET).unwrap();
    healthstat(&dir.path().join("obs.db")).arg("load").arg(&csv).assert().success();
    dir
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("healthstat").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Load and query public-health observations"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("healthstat").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_load_reports_counts() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("maladies.csv");
    std::fs::write(&csv, DATASET).unwrap();

    healthstat(&dir.path().join("obs.db"))
        .arg("load")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inserted\": 4"))
        .stdout(predicate::str::contains("\"skipped\": 1"));
}

#[test]
fn test_cli_load_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "disease,value\ncancer,1\n").unwrap();

    healthstat(&dir.path().join("obs.db"))
        .arg("load")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"));
}

#[test]
fn test_cli_query_filters() {
    let dir = loaded_db();

    healthstat(&dir.path().join("obs.db"))
        .args(["query", "--disease", "cancer", "--indicator", "prevalence", "--year", "2019"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Occitanie"))
        .stdout(predicate::str::contains("2018").not());
}

#[test]
fn test_cli_query_rejects_bad_year() {
    let dir = loaded_db();

    healthstat(&dir.path().join("obs.db"))
        .args(["query", "--year", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid filter"));
}

#[test]
fn test_cli_stats() {
    let dir = loaded_db();

    healthstat(&dir.path().join("obs.db"))
        .args(["stats", "--disease", "cancer", "--indicator", "prevalence"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 3"))
        .stdout(predicate::str::contains("\"nonNullCount\": 2"))
        .stdout(predicate::str::contains("\"mean\": 2.0"));
}

#[test]
fn test_cli_stats_unknown_pair_fails() {
    let dir = loaded_db();

    healthstat(&dir.path().join("obs.db"))
        .args(["stats", "--disease", "grippe", "--indicator", "prevalence"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no observations"));
}

#[test]
fn test_cli_ensure_index_after_load_is_noop() {
    let dir = loaded_db();

    healthstat(&dir.path().join("obs.db"))
        .arg("ensure-index")
        .assert()
        .success()
        .stdout(predicate::str::contains("already_present"));
}
