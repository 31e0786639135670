//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get an fdt command
pub fn fdt() -> Command {
    Command::cargo_bin("fdt").unwrap()
}

/// Helper to create a workspace in a temp directory
pub fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fdt()
        .current_dir(tmp.path())
        .args(["init", "--partner", "BKG01"])
        .assert()
        .success();
    tmp
}

/// Helper to register a company and return its code
pub fn create_company(tmp: &TempDir, code: &str, name: &str, city: &str) -> String {
    fdt()
        .current_dir(tmp.path())
        .args([
            "company", "new",
            "--code", code,
            "--name", name,
            "--contact", "S. Patel",
            "--address", "14 MG Road",
            "--city", city,
            "--pincode", "411001",
            "--phone", "9822012345",
        ])
        .assert()
        .success();
    code.to_string()
}

/// Helper to issue waybill numbers to the workspace partner
pub fn issue_numbers(tmp: &TempDir, numbers: &str) {
    fdt()
        .current_dir(tmp.path())
        .args(["inventory", "issue", "--numbers", numbers])
        .assert()
        .success();
}

/// Helper to book a waybill; returns its number from the output
pub fn book_waybill(tmp: &TempDir, from: &str, to: &str) -> String {
    let output = fdt()
        .current_dir(tmp.path())
        .args([
            "waybill", "book",
            "--from", from,
            "--to", to,
            "--sender", "ACME",
            "--receiver", "ZEN",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "booking failed: {:?}", output);

    // Output format: "✓ Booked waybill WB1001 (WB-01ABC...)"
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|l| l.contains("Booked waybill"))
        .and_then(|l| l.split_whitespace().nth(3))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Helper to create a draft manifest with a vehicle attached
pub fn create_manifest(tmp: &TempDir, no: &str) {
    fdt()
        .current_dir(tmp.path())
        .args(["manifest", "new", "--no", no, "--vehicle", "MH12AB1234"])
        .assert()
        .success();
}

/// Helper to attach a waybill to a manifest
pub fn add_to_manifest(tmp: &TempDir, manifest: &str, waybill: &str) {
    fdt()
        .current_dir(tmp.path())
        .args(["manifest", "add", manifest, waybill])
        .assert()
        .success();
}

/// Standard fixture: workspace, two companies, five issued numbers
pub fn setup_booking_fixture() -> TempDir {
    let tmp = setup_workspace();
    create_company(&tmp, "ACME", "Acme Freight Pvt Ltd", "Pune");
    create_company(&tmp, "ZEN", "Zen Traders", "Mumbai");
    issue_numbers(&tmp, "WB1001,WB1002,WB1003,WB1004,WB1005");
    tmp
}
