//! Report written by the Blender entrypoint.

use serde::{Deserialize, Serialize};

/// Report from Blender execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlenderReport {
    /// Whether the batch succeeded.
    pub ok: bool,
    /// Error message if the batch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of stills Blender wrote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots_rendered: Option<u32>,
    /// Paths written, including the extension Blender appended.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,
    /// Blender version used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blender_version: Option<String>,
    /// Execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}
