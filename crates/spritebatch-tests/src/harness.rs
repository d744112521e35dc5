//! Test harness utilities for running the spritebatch CLI.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

/// Result of running the spritebatch CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }

    /// Parses stdout as JSON (for `--json` runs).
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Runs the spritebatch CLI through cargo in `work_dir`.
pub fn run_cli(work_dir: &Path, args: &[&str]) -> CliResult {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--manifest-path"])
        .arg(workspace_manifest_path())
        .args(["-p", "spritebatch-cli", "--"])
        .args(args)
        .current_dir(work_dir)
        .env("RUST_LOG", "warn")
        .output();

    match output {
        Ok(out) => CliResult::from_output(out),
        Err(e) => CliResult {
            success: false,
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("Failed to run CLI: {}", e),
        },
    }
}

fn workspace_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let manifest_path = manifest_dir.join("..").join("..").join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

/// Check if Blender is available in the environment.
pub fn is_blender_available() -> bool {
    Command::new("blender")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check if Blender tests should run based on environment variable.
pub fn should_run_blender_tests() -> bool {
    std::env::var("SPRITEBATCH_RUN_BLENDER_TESTS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
