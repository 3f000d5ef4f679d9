use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ORDER: &str = "Baltic Haulage UAB
Transport order
Order No: AB123456

Loading place:
Nordwerk GmbH
Loading date 12.03.2024

Delivery address:
Riga Foods Ltd
Arrival 14/03/2024

33 x EUR pallets of canned food
Truck AB12CD
Freight: 1.250,50 EUR
";

const NO_CUSTOMER: &str = "Order No: ZZ998877
Loading 12.03.2024
Delivery 13.03.2024
";

/// Command with the config directory pointed at a scratch location.
fn freight(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("freight").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn test_process_text_order_to_json() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Order_AB123456.txt");
    fs::write(&input, ORDER).unwrap();

    freight(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""order_reference": "AB123456""#))
        .stdout(predicate::str::contains(r#""company": "Baltic Haulage UAB""#))
        .stdout(predicate::str::contains(r#""datetime_from": "2024-03-12T00:00:00.000000Z""#))
        .stdout(predicate::str::contains(r#""freight_currency": "EUR""#))
        .stdout(predicate::str::contains("order_ab123456.txt"));
}

#[test]
fn test_process_writes_csv_output_file() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.txt");
    let output = dir.path().join("order.csv");
    fs::write(&input, ORDER).unwrap();

    freight(&home)
        .args(["process", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("order_reference,customer"));
    assert!(csv.contains("AB123456,Baltic Haulage UAB,Nordwerk GmbH"));
}

#[test]
fn test_process_missing_customer_fails() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.txt");
    fs::write(&input, NO_CUSTOMER).unwrap();

    freight(&home)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing customer company"));
}

#[test]
fn test_process_missing_file_fails() {
    let home = TempDir::new().unwrap();

    freight(&home)
        .args(["process", "/nonexistent/order.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_explicit_config_narrows_context_window() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("order.txt");
    let config = dir.path().join("config.json");
    fs::write(&input, ORDER).unwrap();
    fs::write(
        &config,
        r#"{"extraction": {"context_window": 1, "unknown_company": "Unresolved"}}"#,
    )
    .unwrap();

    freight(&home)
        .arg("--config")
        .arg(&config)
        .args(["process", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Order: AB123456"))
        .stdout(predicate::str::contains("  Unresolved"))
        .stdout(predicate::str::contains("Riga Foods Ltd").not());
}

#[test]
fn test_batch_continues_and_writes_summary() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), ORDER).unwrap();
    fs::write(dir.path().join("b.txt"), NO_CUSTOMER).unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());

    freight(&home)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 documents"))
        .stdout(predicate::str::contains("1 of 2 documents accepted"))
        .stdout(predicate::str::contains("common: 1"))
        .stdout(predicate::str::contains("b.txt"));

    assert!(out.join("AB123456.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("document,status,assistant,order_reference,customer,output,error"));
    assert!(summary.contains("a.txt,accepted,common,AB123456,Baltic Haulage UAB,"));
    assert!(summary.contains("b.txt,failed,"));
    assert!(summary.contains("missing customer company"));
}

#[test]
fn test_batch_keeps_orders_with_same_reference() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("order.txt"), ORDER).unwrap();
    fs::write(dir.path().join("order"), ORDER).unwrap();
    fs::write(dir.path().join("rates.csv"), "lane,price\n").unwrap();

    let pattern = format!("{}/order*", dir.path().display());

    freight(&home)
        .args(["batch", &pattern, "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 documents"));

    assert!(out.join("AB123456.json").exists());
    assert!(out.join("AB123456-2.json").exists());
}

#[test]
fn test_batch_skips_unsupported_files() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("order"), ORDER).unwrap();
    fs::write(dir.path().join("rates.csv"), "lane,price\n").unwrap();

    let pattern = format!("{}/*", dir.path().display());

    freight(&home)
        .args(["batch", &pattern])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 documents"))
        .stdout(predicate::str::contains("1 of 1 documents accepted"));
}

#[test]
fn test_batch_stops_on_first_error() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.txt"), NO_CUSTOMER).unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());

    freight(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_init_set_get() {
    let home = TempDir::new().unwrap();

    freight(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("freight"))
        .stdout(predicate::str::contains("not created"));

    freight(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("freight").join("config.json").exists());

    freight(&home)
        .args(["config", "set", "extraction.context_window", "4"])
        .assert()
        .success();

    freight(&home)
        .args(["config", "get", "extraction.context_window"])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));

    freight(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extraction.context_window = 4"))
        .stdout(predicate::str::contains("pdf.min_text_length = 20"));

    freight(&home)
        .args(["config", "set", "extraction.context_window", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context_window must be at least 1"));

    freight(&home)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
}
