//! Error types for sprite configuration, project validation, and naming.

use thiserror::Error;

use crate::frame::{MAX_FRAMES, SUBSPRITE_DIGITS};
use crate::sprite::SPRITE_NAME_LEN;

/// Error codes for project validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Sprite name is not exactly four characters
    InvalidSpriteName,
    /// E002: End frame exceeds the 260 frame ceiling
    FrameRangeTooLong,
    /// E003: Start frame is below 1
    InvalidFrameRange,
    /// E004: Target object does not exist
    TargetNotFound,
    /// E005: Two objects share a name
    DuplicateObjectName,
    /// E006: Object is missing its sprite configuration
    MissingSpriteConfig,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSpriteName => "E001",
            ErrorCode::FrameRangeTooLong => "E002",
            ErrorCode::InvalidFrameRange => "E003",
            ErrorCode::TargetNotFound => "E004",
            ErrorCode::DuplicateObjectName => "E005",
            ErrorCode::MissingSpriteConfig => "E006",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for project validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Nothing is selected, so a run renders nothing
    NoSelectedObjects,
    /// W002: A selected object is not a mesh and will be skipped
    SelectedNotMesh,
    /// W003: End frame is before start frame
    EmptyFrameRange,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::NoSelectedObjects => "W001",
            WarningCode::SelectedNotMesh => "W002",
            WarningCode::EmptyFrameRange => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "objects\[0\].sprite").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Result of project validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Errors raised while turning a configuration into frame slots and filenames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteError {
    /// Sprite base name does not have exactly four characters.
    #[error("Sprite name '{name}' must be exactly {} characters, got {actual}", SPRITE_NAME_LEN)]
    InvalidSpriteName { name: String, actual: usize },

    /// End frame is past the last addressable frame.
    #[error("Animation exceeds {} frames! (end frame is {end_frame})", MAX_FRAMES)]
    FrameRangeTooLong { end_frame: i32 },

    /// Start frame is below the first addressable frame.
    #[error("Start frame must be at least 1, got {start_frame}")]
    InvalidFrameRange { start_frame: i32 },

    /// Subsprite index ran past the digit table.
    #[error("Subsprite index {index} has no digit (only {} subsprites available)", SUBSPRITE_DIGITS.len())]
    SubspriteOverflow { index: usize },
}

impl BackendError for SpriteError {
    fn code(&self) -> &'static str {
        match self {
            SpriteError::InvalidSpriteName { .. } => "SPRITE_001",
            SpriteError::FrameRangeTooLong { .. } => "SPRITE_002",
            SpriteError::InvalidFrameRange { .. } => "SPRITE_003",
            SpriteError::SubspriteOverflow { .. } => "SPRITE_004",
        }
    }

    fn category(&self) -> &'static str {
        "sprite"
    }
}

/// Top-level error type for project loading.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Common trait for errors surfaced by the render pipeline.
///
/// Each error type implements this trait so callers get:
/// - Stable error codes for reporting
/// - Human-readable messages for users
/// - A category for grouping
///
/// # Example
///
/// ```
/// use spritebatch_spec::error::{BackendError, SpriteError};
///
/// let err = SpriteError::FrameRangeTooLong { end_frame: 261 };
/// assert_eq!(err.code(), "SPRITE_002");
/// assert_eq!(err.category(), "sprite");
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SPRITE_001" or "BLENDER_003".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::InvalidSpriteName.code(), "E001");
        assert_eq!(ErrorCode::FrameRangeTooLong.code(), "E002");
        assert_eq!(ErrorCode::TargetNotFound.code(), "E004");
        assert_eq!(ErrorCode::MissingSpriteConfig.code(), "E006");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::NoSelectedObjects.code(), "W001");
        assert_eq!(WarningCode::EmptyFrameRange.code(), "W003");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::TargetNotFound, "Target object 'Rig' not found!");
        assert_eq!(err.to_string(), "E004: Target object 'Rig' not found!");

        let err_with_path = ValidationError::with_path(
            ErrorCode::InvalidSpriteName,
            "must be 4 characters",
            "objects[1].sprite.sprite_name",
        );
        assert_eq!(
            err_with_path.to_string(),
            "E001: must be 4 characters (at objects[1].sprite.sprite_name)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_warning(ValidationWarning::new(
            WarningCode::NoSelectedObjects,
            "nothing selected",
        ));
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::FrameRangeTooLong, "too long"));
        assert!(!result.is_ok());
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }

    #[test]
    fn test_sprite_error_messages() {
        let err = SpriteError::FrameRangeTooLong { end_frame: 300 };
        assert_eq!(
            err.to_string(),
            "Animation exceeds 260 frames! (end frame is 300)"
        );

        let err = SpriteError::InvalidSpriteName {
            name: "TROOP".to_string(),
            actual: 5,
        };
        assert!(err.to_string().contains("exactly 4 characters"));
        assert_eq!(err.code(), "SPRITE_001");
    }
}
