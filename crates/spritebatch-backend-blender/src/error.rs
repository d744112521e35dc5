//! Error types for the render controller and the Blender backend.

use spritebatch_spec::{BackendError, SpriteError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for Blender backend operations.
pub type BlenderResult<T> = Result<T, BlenderError>;

/// Result type for render runs.
pub type RunResult<T> = Result<T, RunError>;

/// Errors that can occur while driving a Blender subprocess.
#[derive(Debug, Error)]
pub enum BlenderError {
    /// Blender executable not found.
    #[error("Blender executable not found. Ensure Blender is installed and in PATH, or set BLENDER_PATH environment variable")]
    BlenderNotFound,

    /// Failed to spawn Blender process.
    #[error("Failed to spawn Blender process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Blender process timed out.
    #[error("Blender process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Blender process exited with non-zero status.
    #[error("Blender process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Failed to write the command batch for Blender.
    #[error("Failed to write render batch: {0}")]
    WriteBatchFailed(#[source] std::io::Error),

    /// Failed to read report from Blender.
    #[error("Failed to read Blender report from {path}: {source}")]
    ReadReportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse report JSON from Blender.
    #[error("Failed to parse Blender report: {0}")]
    ParseReportFailed(#[source] serde_json::Error),

    /// Blender reported an error.
    #[error("Blender rendering failed: {message}")]
    GenerationFailed { message: String },

    /// Failed to serialize the command batch.
    #[error("Failed to serialize render batch: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Scene file passed to Blender does not exist.
    #[error("Blend file not found: {path}")]
    BlendFileNotFound { path: PathBuf },

    /// Python entrypoint script not found.
    #[error("Python entrypoint script not found at: {path}")]
    EntrypointNotFound { path: PathBuf },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlenderError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new generation failed error.
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }
}

impl BackendError for BlenderError {
    fn code(&self) -> &'static str {
        match self {
            BlenderError::BlenderNotFound => "BLENDER_001",
            BlenderError::SpawnFailed(_) => "BLENDER_002",
            BlenderError::Timeout { .. } => "BLENDER_003",
            BlenderError::ProcessFailed { .. } => "BLENDER_004",
            BlenderError::WriteBatchFailed(_) => "BLENDER_005",
            BlenderError::ReadReportFailed { .. } => "BLENDER_006",
            BlenderError::ParseReportFailed(_) => "BLENDER_007",
            BlenderError::GenerationFailed { .. } => "BLENDER_008",
            BlenderError::SerializeFailed(_) => "BLENDER_009",
            BlenderError::BlendFileNotFound { .. } => "BLENDER_010",
            BlenderError::EntrypointNotFound { .. } => "BLENDER_011",
            BlenderError::Io(_) => "BLENDER_012",
        }
    }

    fn category(&self) -> &'static str {
        "blender"
    }
}

/// Errors that stop a batch render or one object's part of it.
#[derive(Debug, Error)]
pub enum RunError {
    /// The object to rotate does not exist.
    #[error("Target object '{name}' not found!")]
    TargetNotFound { name: String },

    /// A selected object is not a mesh; it is skipped.
    #[error("'{name}' is not a mesh object!")]
    NotAMesh { name: String },

    /// An object has no sprite configuration.
    #[error("'{name}' has no sprite configuration")]
    MissingSpriteConfig { name: String },

    /// Frame range or sprite naming problem.
    #[error(transparent)]
    Sprite(#[from] SpriteError),

    /// The host failed to render a still.
    #[error("Failed to render '{path}': {message}")]
    RenderFailed { path: String, message: String },
}

impl RunError {
    /// Creates a new render failed error.
    pub fn render_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error only ends the current object's run; the
    /// batch continues with the next selected object.
    pub fn is_object_scoped(&self) -> bool {
        matches!(
            self,
            RunError::NotAMesh { .. }
                | RunError::MissingSpriteConfig { .. }
                | RunError::Sprite(SpriteError::InvalidSpriteName { .. })
        )
    }
}

impl BackendError for RunError {
    fn code(&self) -> &'static str {
        match self {
            RunError::TargetNotFound { .. } => "RUN_001",
            RunError::NotAMesh { .. } => "RUN_002",
            RunError::MissingSpriteConfig { .. } => "RUN_003",
            RunError::Sprite(err) => err.code(),
            RunError::RenderFailed { .. } => "RUN_004",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            RunError::Sprite(err) => err.category(),
            _ => "run",
        }
    }
}
