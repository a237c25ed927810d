#![allow(dead_code)]

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use finance_tracker::{cli::SCRIPT_ENV, core::utils::HOME_ENV};
use tempfile::TempDir;

/// An isolated application home directory for one test.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("finances.csv")
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.path().join("config").join("config.json")
    }

    /// Writes a ledger CSV with the standard header and the given rows.
    pub fn seed(&self, rows: &[&str]) {
        let path = self.data_file();
        fs::create_dir_all(path.parent().expect("data dir")).expect("create data dir");
        let mut contents = String::from("Date,Category,Type,Amount\n");
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(path, contents).expect("seed ledger");
    }

    pub fn read_data(&self) -> String {
        fs::read_to_string(self.data_file()).expect("read ledger file")
    }

    /// The CLI binary in script mode, rooted at this home, with plain output.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("finance_tracker_cli").expect("binary built");
        cmd.env(SCRIPT_ENV, "1")
            .env(HOME_ENV, self.dir.path())
            .env("RUST_LOG", "off");
        cmd
    }

    pub fn run_script(&self, script: &str) -> assert_cmd::assert::Assert {
        self.cli().write_stdin(script.to_string()).assert()
    }
}

pub const TWO_MONTHS: &[&str] = &[
    "2024-01-05,Food,Expense,50.0",
    "2024-01-10,Salary,Income,2000.0",
    "2024-02-01,Rent,Expense,1000.0",
    "2024-02-10,Salary,Income,2000.0",
];
