use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn crazy8s() -> Command {
    Command::cargo_bin("crazy8s").expect("binary builds")
}

#[test]
fn prints_version() {
    crazy8s()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crazy8s"));
}

#[test]
fn simulate_writes_requested_rows() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("games.jsonl");

    crazy8s()
        .args(["simulate", "--games", "6", "--players", "3", "--seed", "7", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 6 rows"))
        .stdout(predicate::str::contains("Player 3:"));

    let written = fs::read_to_string(&output).expect("output exists");
    assert_eq!(written.lines().count(), 6);
}

#[test]
fn simulate_reads_yaml_config() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("from_config.jsonl");
    let config_path = dir.path().join("crazy8s.yaml");
    fs::write(
        &config_path,
        format!(
            "simulation:\n  games: 3\n  players: 6\n  seed: 5\n  output: \"{}\"\n",
            output.display()
        ),
    )
    .expect("write config");

    crazy8s()
        .arg("--config")
        .arg(&config_path)
        .arg("simulate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Simulating 3 games with 6 players"));

    assert_eq!(fs::read_to_string(&output).expect("output").lines().count(), 3);
}

#[test]
fn play_rejects_out_of_range_bot_count() {
    crazy8s()
        .args(["play", "--bots", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("game.bots"));
}

#[test]
fn play_reprompts_then_stops_when_input_closes() {
    crazy8s()
        .arg("play")
        .write_stdin("1\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid number of bots"))
        .stderr(predicate::str::contains("input closed"));
}
