//! JSON output types for machine-readable CLI output.
//!
//! Every command with a `--json` flag prints exactly one of these objects to
//! stdout.

use serde::{Deserialize, Serialize};
use spritebatch_spec::{
    BackendError, RunReport, ValidationError, ValidationResult, ValidationWarning,
};

/// Error codes for CLI operations.
///
/// Validation and run errors pass their own codes through (`E001`,
/// `SPRITE_002`, `BLENDER_003`, ...).
pub mod error_codes {
    /// Project file could not be loaded
    pub const PROJECT_LOAD: &str = "CLI_001";
    /// Plan or report file could not be written
    pub const WRITE_OUTPUT: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Error category for run and Blender errors ("sprite", "run", "blender")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            category: None,
        }
    }

    /// Converts a render pipeline error, keeping its stable code.
    pub fn from_backend<E: BackendError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message(),
            path: None,
            category: Some(error.category().to_string()),
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
            category: None,
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationWarning> for JsonWarning {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Output of `validate --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
}

impl ValidateOutput {
    /// Converts a validation result.
    pub fn from_result(result: &ValidationResult) -> Self {
        Self {
            success: result.is_ok(),
            errors: result.errors.iter().map(JsonError::from).collect(),
            warnings: result.warnings.iter().map(JsonWarning::from).collect(),
        }
    }

    /// Creates a failed output from a single error.
    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

/// Output of `plan --json` and `render --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// Run report (present once validation passed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RunReport>,
    /// Stills Blender reported writing (`render` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots_rendered: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl RunOutput {
    /// Successful run.
    pub fn success(report: RunReport, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: report.is_ok(),
            errors: Vec::new(),
            warnings,
            report: Some(report),
            shots_rendered: None,
            duration_ms: None,
        }
    }

    /// Failed run.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            report: None,
            shots_rendered: None,
            duration_ms: None,
        }
    }
}

/// Prints a JSON value to stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
