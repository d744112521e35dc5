//! Blender subprocess orchestrator.
//!
//! This module handles spawning Blender as a subprocess and managing
//! communication via JSON files.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{BlenderError, BlenderResult};
use crate::report::BlenderReport;

const EMBEDDED_ENTRYPOINT_PY: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../blender/render_batch.py"
));

/// Default timeout for Blender execution (1 hour; a full 260 frame, 16 angle
/// batch is over four thousand stills).
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Environment variable overriding the entrypoint script.
pub const ENTRYPOINT_ENV: &str = "SPRITEBATCH_BLENDER_ENTRYPOINT";

/// Configuration for the Blender orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Path to the Blender executable.
    pub blender_path: Option<PathBuf>,
    /// Path to the Python entrypoint script.
    pub entrypoint_path: PathBuf,
    /// Timeout for Blender execution.
    pub timeout: Duration,
    /// Whether to capture Blender's stderr.
    pub capture_output: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            blender_path: None,
            entrypoint_path: PathBuf::from("blender/render_batch.py"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl OrchestratorConfig {
    /// Creates a new config with the given entrypoint path.
    pub fn with_entrypoint(entrypoint_path: impl Into<PathBuf>) -> Self {
        Self {
            entrypoint_path: entrypoint_path.into(),
            ..Default::default()
        }
    }

    /// Sets the Blender executable path.
    pub fn blender_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.blender_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// The Blender subprocess orchestrator.
pub struct Orchestrator {
    config: OrchestratorConfig,
}

struct ResolvedEntrypoint {
    path: PathBuf,
    _tempfile: Option<tempfile::NamedTempFile>,
}

impl Orchestrator {
    /// Creates a new orchestrator with default configuration.
    pub fn new() -> Self {
        Self {
            config: OrchestratorConfig::default(),
        }
    }

    /// Creates a new orchestrator with the given configuration.
    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Finds the Blender executable path.
    pub fn find_blender(&self) -> BlenderResult<PathBuf> {
        // Check config override first
        if let Some(ref path) = self.config.blender_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        // Check BLENDER_PATH environment variable
        if let Ok(path) = std::env::var("BLENDER_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        let blender_names = if cfg!(windows) {
            vec!["blender.exe", "blender"]
        } else {
            vec!["blender"]
        };

        for name in blender_names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        let common_paths = if cfg!(windows) {
            vec![
                "C:\\Program Files\\Blender Foundation\\Blender 4.2\\blender.exe",
                "C:\\Program Files\\Blender Foundation\\Blender 4.0\\blender.exe",
                "C:\\Program Files\\Blender Foundation\\Blender 3.6\\blender.exe",
                "C:\\Program Files\\Blender Foundation\\Blender\\blender.exe",
            ]
        } else if cfg!(target_os = "macos") {
            vec![
                "/Applications/Blender.app/Contents/MacOS/Blender",
                "/Applications/Blender.app/Contents/MacOS/blender",
            ]
        } else {
            vec![
                "/usr/bin/blender",
                "/usr/local/bin/blender",
                "/snap/bin/blender",
            ]
        };

        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(BlenderError::BlenderNotFound)
    }

    fn resolve_entrypoint(&self) -> BlenderResult<ResolvedEntrypoint> {
        if self.config.entrypoint_path.exists() {
            return Ok(ResolvedEntrypoint {
                path: self.config.entrypoint_path.clone(),
                _tempfile: None,
            });
        }

        if let Ok(path) = std::env::var(ENTRYPOINT_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(ResolvedEntrypoint {
                    path,
                    _tempfile: None,
                });
            }
            return Err(BlenderError::EntrypointNotFound { path });
        }

        // Last resort: write embedded entrypoint to a temp file.
        let mut file = tempfile::Builder::new()
            .prefix("spritebatch_render_batch_")
            .suffix(".py")
            .tempfile()
            .map_err(BlenderError::Io)?;
        file.write_all(EMBEDDED_ENTRYPOINT_PY.as_bytes())
            .map_err(BlenderError::Io)?;
        file.flush().map_err(BlenderError::Io)?;

        Ok(ResolvedEntrypoint {
            path: file.path().to_path_buf(),
            _tempfile: Some(file),
        })
    }

    /// Runs a command batch inside Blender.
    ///
    /// # Arguments
    ///
    /// * `blend_file` - Scene to open
    /// * `batch_path` - Path to the JSON command batch
    /// * `report_path` - Path where Blender should write its report JSON
    pub fn run(
        &self,
        blend_file: &Path,
        batch_path: &Path,
        report_path: &Path,
    ) -> BlenderResult<BlenderReport> {
        if !blend_file.exists() {
            return Err(BlenderError::BlendFileNotFound {
                path: blend_file.to_path_buf(),
            });
        }

        let blender_path = self.find_blender()?;
        let entrypoint = self.resolve_entrypoint()?;

        // blender --background <blend> --python render_batch.py -- --batch <path> --report <path>
        let mut cmd = Command::new(&blender_path);
        cmd.arg("--background")
            .arg(blend_file)
            .arg("--python")
            .arg(&entrypoint.path)
            .arg("--")
            .arg("--batch")
            .arg(batch_path)
            .arg("--report")
            .arg(report_path);

        if self.config.capture_output {
            // Only stderr is surfaced; a filled stdout pipe would stall Blender.
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        info!(
            "Running {} on {}",
            blender_path.display(),
            blend_file.display()
        );
        let child = cmd.spawn().map_err(BlenderError::SpawnFailed)?;

        let (status, stderr) =
            wait_with_timeout(child, self.config.timeout, self.config.capture_output)?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(BlenderError::process_failed(exit_code, stderr));
        }
        if !stderr.is_empty() {
            debug!("Blender stderr:\n{}", stderr);
        }

        let report_content =
            std::fs::read_to_string(report_path).map_err(|e| BlenderError::ReadReportFailed {
                path: report_path.to_path_buf(),
                source: e,
            })?;

        let report: BlenderReport =
            serde_json::from_str(&report_content).map_err(BlenderError::ParseReportFailed)?;

        if !report.ok {
            return Err(BlenderError::generation_failed(
                report.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        Ok(report)
    }

    /// Runs a command batch provided as a JSON string.
    ///
    /// This creates temporary files for the batch and report, then invokes Blender.
    pub fn run_with_batch_json(
        &self,
        blend_file: &Path,
        batch_json: &str,
    ) -> BlenderResult<BlenderReport> {
        let temp_dir = tempfile::tempdir().map_err(BlenderError::Io)?;
        let batch_path = temp_dir.path().join("batch.json");
        let report_path = temp_dir.path().join("report.json");

        std::fs::write(&batch_path, batch_json).map_err(BlenderError::WriteBatchFailed)?;

        self.run(blend_file, &batch_path, &report_path)
    }
}

fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    capture_output: bool,
) -> BlenderResult<(ExitStatus, String)> {
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(BlenderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(BlenderError::SpawnFailed(e)),
        }
    };

    let stderr = if capture_output {
        let mut buf = String::new();
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_string(&mut buf);
        }
        buf
    } else {
        String::new()
    };

    Ok((status, stderr))
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
