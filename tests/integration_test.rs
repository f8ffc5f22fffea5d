//! Integration tests for the ach-encoder CLI.
//!
//! These tests run the actual binary against the files in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Binary with a fixed originator identity
fn encoder() -> Command {
    let mut cmd = Command::cargo_bin("ach-encoder").unwrap();
    cmd.env("ACH_COMPANY_NAME", "TEST COMPANY")
        .env("ACH_COMPANY_ID", "COMPANY123")
        .env("ACH_ROUTING_NUMBER", "123456789")
        .env_remove("ACH_IMMEDIATE_DESTINATION")
        .env_remove("ACH_DESTINATION_NAME")
        .env_remove("ACH_ORIGIN_NAME")
        .env_remove("ACH_ENTRY_DESCRIPTION");
    cmd
}

/// Run the binary with the given input file and return stdout
fn run_encoder(input_file: &str) -> String {
    let assert = encoder().arg(input_file).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_sample_a_structure() {
    let output = run_encoder(&test_data_path("sample_a.csv"));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 10);
    assert!(lines.iter().all(|l| l.len() == 94));
    assert!(output.ends_with('\n'));

    let codes: String = lines.iter().map(|l| &l[0..1]).collect();
    assert_eq!(codes, "1566899999");
}

#[test]
fn test_sample_a_entries() {
    let output = run_encoder(&test_data_path("sample_a.csv"));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[2].trim_end(),
        "6221234567899876543210       0000010050CUST001        John Doe                00000001"
    );
    assert_eq!(
        lines[3].trim_end(),
        "6279876543211234567890       0000007525CUST002        Jane Smith              00000002"
    );
}

#[test]
fn test_sample_a_control_records() {
    let output = run_encoder(&test_data_path("sample_a.csv"));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[4],
        format!(
            "82000000020111111110000000007525000000010050COMPANY123{}123456780000001",
            " ".repeat(25)
        )
    );
    assert_eq!(
        lines[5].trim_end(),
        "9000001000001000000020111111110000000007525000000010050"
    );
    assert_eq!(&lines[5][43..55], "000000010050");
    assert!(lines[6..].iter().all(|l| *l == "9".repeat(94)));
}

#[test]
fn test_sample_b_whitespace_handling() {
    let output = run_encoder(&test_data_path("sample_b_whitespace.csv"));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 10);
    assert_eq!(&lines[2][0..12], "622021000021");
    assert_eq!(&lines[3][0..12], "627011000015");

    // 02100002 + 01100001 + 02100002
    assert_eq!(&lines[5][21..31], "0005300005");
    assert_eq!(&lines[5][31..43], "000000002000");
    assert_eq!(&lines[5][43..55], "000000150001");
}

#[test]
fn test_invalid_row_fails_without_output() {
    encoder()
        .arg(test_data_path("sample_c_invalid_amount.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("row 3"));
}

#[test]
fn test_empty_batch_fails() {
    encoder()
        .arg(test_data_path("sample_d_empty.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty batch"));
}

#[test]
fn test_writes_into_output_directory() {
    let dir = TempDir::new().unwrap();
    encoder()
        .arg(test_data_path("sample_a.csv"))
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with("ach_batch_"));
    assert!(entries[0].ends_with(".txt"));

    let content = fs::read_to_string(dir.path().join(&entries[0])).unwrap();
    assert_eq!(content.lines().count(), 10);
}

#[test]
fn test_writes_to_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("batch.ach");
    encoder()
        .arg(test_data_path("sample_a.csv"))
        .arg(&path)
        .assert()
        .success();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("101 123456789COMPANY123"));
}

#[test]
fn test_huge_amount_fails_with_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("huge.csv");
    fs::write(
        &input,
        "routing_number,account_number,amount,transaction_type\n\
         123456789,1,79228162514264337593543950335,CREDIT\n",
    )
    .unwrap();

    encoder()
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Invalid transaction at row 2"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_unwritable_output_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("batch.ach");

    encoder()
        .arg(test_data_path("sample_a.csv"))
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_company_identity_from_environment() {
    let assert = encoder()
        .env("ACH_COMPANY_NAME", "ACME PAYROLL")
        .env("ACH_COMPANY_ID", "9876543210")
        .arg(test_data_path("sample_a.csv"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let batch_header = output.lines().nth(1).unwrap();

    assert_eq!(&batch_header[4..20], "ACME PAYROLL    ");
    assert_eq!(&batch_header[30..40], "9876543210");
}

#[test]
fn test_invalid_environment_config_fails() {
    encoder()
        .env("ACH_ROUTING_NUMBER", "12AB")
        .arg(test_data_path("sample_a.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("routing number"));
}

#[test]
fn test_missing_file_error() {
    encoder()
        .arg("nonexistent.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    encoder()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"));
}
