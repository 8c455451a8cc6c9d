//! Tests for the command-line binaries.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("protocol")
        .join("sitzung.xml")
}

/// Copy the fixture protocol into a scratch directory.
fn scratch_protocol(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("19215.xml");
    fs::copy(fixture_path(), &path).unwrap();
    path
}

fn extractor() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plenar-extractor"));
    cmd.env_remove("RUST_LOG")
        .env_remove("PLENAR_SPEAKER_PLACEMENT")
        .env_remove("PLENAR_INCLUDE_HONORIFIC")
        .env_remove("PLENAR_UNMATCHED_SPEECHES")
        .env_remove("PLENAR_DUPLICATE_SPEECH_IDS");
    cmd
}

fn shortener() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plenar-shorten-titles"))
}

#[test]
fn test_extract_writes_json_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = scratch_protocol(&dir);

    extractor()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    let json = fs::read_to_string(dir.path().join("19215.json")).unwrap();
    assert!(json.starts_with("[\n {\n  \"title\": "));
    assert!(json.contains("\"speaker\": \"Clara Probe\""));
    assert!(json.contains("BÜNDNIS 90/DIE GRÜNEN"));
    assert!(!json.contains("title_short"));
}

#[test]
fn test_extract_with_output_and_short_titles() {
    let dir = TempDir::new().unwrap();
    let input = scratch_protocol(&dir);
    let output = dir.path().join("reden.json");

    extractor()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--shorten-titles")
        .assert()
        .success();

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"title_short\": \"Digitale Schule\""));
    assert!(!dir.path().join("19215.json").exists());
}

#[test]
fn test_extract_strict_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = scratch_protocol(&dir);

    extractor()
        .arg(&input)
        .arg("--strict")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Speech id ID1921500100"));

    assert!(!dir.path().join("19215.json").exists());
}

#[test]
fn test_extract_missing_date_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("19215.xml");
    let xml = fs::read_to_string(fixture_path())
        .unwrap()
        .replace(r#" sitzung-datum="04.03.2021""#, "");
    fs::write(&input, xml).unwrap();

    extractor()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("sitzung-datum"));

    assert!(!dir.path().join("19215.json").exists());
}

#[test]
fn test_extract_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    extractor()
        .arg(dir.path().join("missing.xml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_shorten_titles_runs_once() {
    let dir = TempDir::new().unwrap();
    let input = scratch_protocol(&dir);
    let output = dir.path().join("19215.json");

    extractor().arg(&input).assert().success();

    shortener()
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shortened"));
    let first = fs::read(&output).unwrap();
    assert!(String::from_utf8_lossy(&first).contains("\"title_short\": \"Thema: Pflege\""));

    shortener()
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("titles already shortened"));
    assert_eq!(fs::read(&output).unwrap(), first);
}
