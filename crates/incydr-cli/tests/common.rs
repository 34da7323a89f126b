//! Shared fixtures for CLI integration tests.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixture {
    temp_dir: TempDir,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("Failed to read output")
    }

    /// `incydr` isolated from any user config file.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("incydr").expect("Failed to find binary");
        cmd.env("INCYDR_CONFIG", self.path("config.toml"))
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path());
        cmd
    }
}

pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

pub const ALERTS_JSON: &str = r#"[
  {
    "tenantId": "MyExampleTenant",
    "type": "FED_ENDPOINT_EXFILTRATION",
    "name": "Removable Media",
    "id": "alert-1",
    "createdAt": "2020-02-19T01:57:45Z",
    "state": "OPEN",
    "watchlists": [{"name": "Leavers", "type": "DEPARTING_EMPLOYEE", "isSignificant": true}]
  },
  {
    "tenantId": "MyExampleTenant",
    "type": "FED_FILE_NAME",
    "name": "File Name",
    "id": "alert-2",
    "createdAt": "2020-02-20T08:00:00Z",
    "state": "RESOLVED"
  }
]"#;
