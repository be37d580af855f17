//! Integration tests for the frota binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn process_json_dump_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pages.json");
    fs::write(
        &input,
        r#"[{"number":1,"lines":[
            "ABC-1234 01/02/2024 DIESEL 100,00 45,50",
            "ABC-1234 01/02/2024 ARLA 50,00 10,00"
        ]}]"#,
    )
    .unwrap();

    Command::cargo_bin("frota")
        .unwrap()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("plate,date,total_amount")
                .and(predicate::str::contains("ABC-1234"))
                .and(predicate::str::contains("150,00")),
        );
}

#[test]
fn process_plain_text_to_text_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statement.txt");
    fs::write(
        &input,
        "ABC-1234 01/02/2024 DIESEL 100,00 45,50\nXYZ0001 02/02/2024 ARLA 25,50 5,00\n",
    )
    .unwrap();

    Command::cargo_bin("frota")
        .unwrap()
        .arg("process")
        .arg(&input)
        .args(["-f", "text"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Distinct plates:   2")
                .and(predicate::str::contains("R$ 125,50")),
        );
}

#[test]
fn process_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pages.json");
    let output = dir.path().join("out.json");
    fs::write(
        &input,
        r#"[{"number":2,"tables":[[["ABC1234","05/03/2024","R$ 1.234,56"]]]}]"#,
    )
    .unwrap();

    Command::cargo_bin("frota")
        .unwrap()
        .arg("process")
        .arg(&input)
        .args(["-f", "json", "-o"])
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"plate\": \"ABC-1234\""));
    assert!(written.contains("\"total_amount\": \"1.234,56\""));
    assert!(written.contains("\"line_ref\": \"plate_ABC-1234_date_05/03/2024\""));
}

#[test]
fn process_missing_file_fails() {
    Command::cargo_bin("frota")
        .unwrap()
        .arg("process")
        .arg("nao-existe.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_writes_summary_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");
    fs::write(
        dir.path().join("a.txt"),
        "ABC-1234 01/02/2024 DIESEL 100,00 45,50\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.txt"),
        "XYZ0001 02/02/2024 ARLA 25,50 5,00\n",
    )
    .unwrap();

    Command::cargo_bin("frota")
        .unwrap()
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .args(["--summary", "-o"])
        .arg(&out)
        .assert()
        .success();

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt"));
    assert!(summary.contains("b.txt"));
    assert!(fs::read_to_string(out.join("a.csv")).unwrap().contains("ABC-1234"));
}
