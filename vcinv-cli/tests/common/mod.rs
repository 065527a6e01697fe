//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary inventory file
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Connection string accepted by every test inventory.
pub const CONNECTION: &str = "administrator:secret@vc01";

/// Inventory used by most tests.
///
/// DC1 holds a folder, a standalone host and a cluster with one member.
pub const LAB_INVENTORY: &str = r"
credentials:
  user: administrator
  password: secret
certificates:
  esx09: AA:BB:CC
root:
  name: Datacenters
  kind: folder
  children:
    - name: DC1
      kind: datacenter
      children:
        - name: Folder1
          kind: folder
        - name: esx01
          kind: host_system
        - name: ClusterA
          kind: cluster
          children:
            - name: esx02
              kind: host_system
";

/// Test environment with an isolated working directory and inventory file.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the inventory file
    pub inventory: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a test environment whose inventory holds [`LAB_INVENTORY`].
    pub fn new() -> Self {
        Self::with_inventory(LAB_INVENTORY)
    }

    /// Create a test environment with the given inventory document.
    pub fn with_inventory(yaml: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let inventory = temp_path.join("inventory.yaml");
        std::fs::write(&inventory, yaml).expect("Failed to write inventory");

        Self {
            temp_dir,
            temp_path,
            inventory,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// The working directory is the temp directory and no VCINV_*
    /// variables leak in from the test runner.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("vcinv").expect("Failed to find vcinv binary");
        cmd.current_dir(&self.temp_path)
            .env("HOME", &self.temp_path)
            .env_remove("VCINV_CONNECTION")
            .env_remove("VCINV_INVENTORY")
            .env_remove("VCINV_INSECURE")
            .env_remove("VCINV_MAX_THUMBPRINT_ATTEMPTS")
            .env_remove("VCINV_LOG_MODE")
            .env_remove("VCINV_HOST_PASSWORD");
        cmd
    }

    /// Get a command builder with connection and inventory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--connection")
            .arg(CONNECTION)
            .arg("--inventory")
            .arg(&self.inventory);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Current contents of the inventory file.
    pub fn inventory_yaml(&self) -> String {
        std::fs::read_to_string(&self.inventory).expect("Failed to read inventory")
    }

    /// Run `resolve --format json` and return the parsed output.
    pub fn resolve_json(&self, path: &str) -> serde_json::Value {
        let output = self
            .command()
            .args(["resolve", path, "--format", "json"])
            .output()
            .expect("Failed to run resolve");
        assert!(
            output.status.success(),
            "resolve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Output is not JSON")
    }

    /// Names of the children of the container at `path`.
    pub fn child_names(&self, path: &str) -> Vec<String> {
        self.resolve_json(path)["children"]
            .as_array()
            .expect("children is not an array")
            .iter()
            .map(|child| child["name"].as_str().unwrap().to_string())
            .collect()
    }
}
