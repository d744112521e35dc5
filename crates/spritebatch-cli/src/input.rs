//! Project file loading.

use std::path::Path;

use anyhow::{Context, Result};
use spritebatch_spec::Project;

/// Recognized project file extensions.
pub const PROJECT_EXTENSIONS: &[&str] = &["json"];

/// Loads a project file.
pub fn load_project(path: &Path) -> Result<Project> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !PROJECT_EXTENSIONS.contains(&extension.as_str()) {
        anyhow::bail!(
            "unsupported project file extension '{}' (expected .json): {}",
            extension,
            path.display()
        );
    }

    Project::from_file(path)
        .with_context(|| format!("Failed to load project file: {}", path.display()))
}
