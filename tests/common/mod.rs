#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// May 2024 books: a cash sale, rent, a CUB to CASH transfer, one dairy
/// unit round trip on KVB, and an unpaid royalty invoice.
///
/// Closing balances are CASH 2,300, CUB 4,000 and KVB 2,500. All-time
/// revenue is 1,250 against 500 of expenses.
pub const MAY_SNAPSHOT: &str = r#"{
    "schema_version": 1,
    "opening_balances": {"CASH": "1000", "CUB": "5000", "KVB": "2000", "CAPITAL": "6000"},
    "payments": [
        {"id": "6f1c0000-0000-4000-8000-000000000001", "direction": "IN", "amount": "500",
         "date": "2024-05-02T11:00:00Z", "mode": "CASH", "category": "SALES",
         "source_id": "c-1", "source_name": "Ravi Traders"},
        {"id": "6f1c0000-0000-4000-8000-000000000002", "direction": "OUT", "amount": "200",
         "date": "2024-05-03T11:00:00Z", "mode": "CASH", "category": "RENT",
         "voucher_type": "PAYMENT", "notes": "Shop rent"},
        {"id": "6f1c0000-0000-4000-8000-000000000003", "direction": "OUT", "amount": "1000",
         "date": "2024-05-04T11:00:00Z", "mode": "CUB", "target_mode": "CASH",
         "category": "CONTRA"},
        {"id": "6f1c0000-0000-4000-8000-000000000004", "direction": "IN", "amount": "1000",
         "date": "2024-05-04T11:00:00Z", "mode": "CASH", "target_mode": "CUB",
         "category": "CONTRA"},
        {"id": "6f1c0000-0000-4000-8000-000000000005", "direction": "IN", "amount": "800",
         "date": "2024-05-10T11:00:00Z", "mode": "KVB", "category": "OTHER_BUSINESS",
         "business_unit": "Dairy"},
        {"id": "6f1c0000-0000-4000-8000-000000000006", "direction": "OUT", "amount": "300",
         "date": "2024-05-11T11:00:00Z", "mode": "KVB", "category": "OTHER_BUSINESS",
         "voucher_type": "PAYMENT", "business_unit": "Dairy"}
    ],
    "invoices": [
        {"id": "6f1c0000-0000-4000-8000-0000000000a1", "kind": "ROYALTY", "direction": "IN",
         "amount": "450", "date": "2024-05-20T11:00:00Z", "balance": "450", "status": "UNPAID"}
    ]
}"#;

/// Isolated cashbook home with the May snapshot written next to it.
pub struct TestHome {
    pub dir: TempDir,
    pub snapshot: PathBuf,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp home");
        let snapshot = dir.path().join("may.json");
        std::fs::write(&snapshot, MAY_SNAPSHOT).expect("write fixture snapshot");
        Self { dir, snapshot }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `open` line for the fixture snapshot.
    pub fn open_line(&self) -> String {
        format!("open {}", self.snapshot.display())
    }
}

/// Script-mode CLI bound to `home` with colours off.
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cashbook_cli").expect("cashbook_cli binary");
    cmd.env("CASHBOOK_CLI_SCRIPT", "1")
        .env("CASHBOOK_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

/// Runs `lines` through the CLI and returns its stdout.
pub fn run_script(home: &Path, lines: &[&str]) -> String {
    let mut input = lines.join("\n");
    input.push('\n');
    let output = cli(home).write_stdin(input).output().expect("run cashbook_cli");
    assert!(output.status.success(), "cli exited with {:?}", output.status);
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}
