//! End-to-end tests for the `freelance` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn freelance(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("freelance").unwrap();
    cmd.env("FREELANCE_DATA_DIR", dir.path())
        .env_remove("FREELANCE_LOG");
    cmd
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    freelance(&dir).arg("init").assert().success();
    freelance(&dir)
        .args(["client", "add", "Ada Lovelace", "--company", "Analytical Engines"])
        .assert()
        .success();
    dir
}

#[test]
fn init_creates_data_files() {
    let dir = TempDir::new().unwrap();

    freelance(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("settings.json").exists());
    assert!(dir.path().join("data").join("invoices.json").exists());
}

#[test]
fn create_invoice_computes_totals() {
    let dir = setup();

    freelance(&dir)
        .args([
            "invoice",
            "create",
            "Ada Lovelace",
            "--item",
            "Design:2:150",
            "--item",
            "Dev:5:100",
            "--tax-rate",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created invoice INV-001"))
        .stdout(predicate::str::contains("960.00 EUR"))
        .stdout(predicate::str::contains("800.00 EUR"));
}

#[test]
fn invoice_numbers_are_sequential() {
    let dir = setup();

    for _ in 0..2 {
        freelance(&dir)
            .args(["invoice", "create", "ada lovelace", "--item", "Work:1:100"])
            .assert()
            .success();
    }

    freelance(&dir)
        .args(["invoice", "next-number"])
        .assert()
        .success()
        .stdout("INV-003\n");

    freelance(&dir)
        .args(["invoice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-001"))
        .stdout(predicate::str::contains("INV-002"))
        .stdout(predicate::str::contains("Ada Lovelace (Analytical Engines)"));
}

#[test]
fn rejected_invoice_does_not_use_a_number() {
    let dir = setup();

    freelance(&dir)
        .args([
            "invoice",
            "create",
            "Ada Lovelace",
            "--item",
            "Design:2:150",
            "--item",
            "  :1:100",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 2: description is required"));

    freelance(&dir)
        .args(["invoice", "next-number"])
        .assert()
        .success()
        .stdout("INV-001\n");
}

#[test]
fn invalid_quantity_and_tax_rate_are_reported() {
    let dir = setup();

    freelance(&dir)
        .args(["invoice", "create", "Ada Lovelace", "--item", "Design:0:150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 1 quantity must be at least 0.01"));

    freelance(&dir)
        .args([
            "invoice",
            "create",
            "Ada Lovelace",
            "--item",
            "Design:1:150",
            "--tax-rate",
            "150",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tax rate must be between 0 and 100"));
}

#[test]
fn malformed_item_is_rejected() {
    let dir = setup();

    freelance(&dir)
        .args(["invoice", "create", "Ada Lovelace", "--item", "Design 2 150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DESCRIPTION:QUANTITY:UNIT_PRICE"));
}

#[test]
fn unknown_client_is_reported() {
    let dir = setup();

    freelance(&dir)
        .args(["invoice", "create", "Nobody", "--item", "Work:1:100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client not found: Nobody"));
}

#[test]
fn print_and_pay_invoice() {
    let dir = setup();
    let document = dir.path().join("INV-001.txt");

    freelance(&dir)
        .args(["settings", "set", "--business-name", "Studio Nine"])
        .assert()
        .success();
    freelance(&dir)
        .args(["invoice", "create", "Ada Lovelace", "--item", "Design:2:150"])
        .assert()
        .success();

    freelance(&dir)
        .args(["invoice", "print", "inv-001", "--output"])
        .arg(&document)
        .assert()
        .success();

    let text = std::fs::read_to_string(&document).unwrap();
    assert!(text.contains("Studio Nine"));
    assert!(text.contains("INVOICE INV-001"));
    assert!(text.contains("360.00 EUR"));

    freelance(&dir)
        .args(["invoice", "pay", "INV-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked as paid"));

    freelance(&dir)
        .args(["invoice", "list", "--status", "paid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-001"));
}

#[test]
fn time_logging_rejects_too_many_hours() {
    let dir = setup();

    freelance(&dir)
        .args(["project", "add", "Website", "--client", "Ada Lovelace"])
        .assert()
        .success();

    freelance(&dir)
        .args(["time", "log", "Website", "2.5", "--date", "2025-03-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 2.5h"));

    freelance(&dir)
        .args(["time", "log", "Website", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Hours exceeds the maximum of 24"));

    freelance(&dir)
        .args(["time", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2.5h across 1 entries"));
}

#[test]
fn export_json_contains_invoices() {
    let dir = setup();
    let output = dir.path().join("export.json");

    freelance(&dir)
        .args(["invoice", "create", "Ada Lovelace", "--item", "Design:1:100"])
        .assert()
        .success();
    freelance(&dir)
        .args(["export", "all"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["metadata"]["invoice_count"], 1);
    assert_eq!(json["invoices"][0]["number"], "INV-001");
}

#[test]
fn dashboard_shows_paid_revenue() {
    let dir = setup();

    freelance(&dir)
        .args(["invoice", "create", "Ada Lovelace", "--item", "Design:1:100", "--tax-rate", "0"])
        .assert()
        .success();
    freelance(&dir)
        .args(["invoice", "pay", "INV-001"])
        .assert()
        .success();

    freelance(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("100.00 EUR"))
        .stdout(predicate::str::contains("Invoices by status"))
        .stdout(predicate::str::contains("Top clients"));
}
