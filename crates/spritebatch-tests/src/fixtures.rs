//! Project fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use spritebatch_spec::{BatchSettings, ObjectKind, Project, SceneObject, SpriteConfig};

/// Name of the rotated object in [`imp_project`].
pub const RIG: &str = "Rig";

/// A rig (empty carrying the angle flags) plus one selected mesh named
/// `sprite_name`, rendered over `frame_start..=frame_end`.
pub fn imp_project(sprite_name: &str, flags: SpriteConfig, frame_start: i32, frame_end: i32) -> Project {
    Project::new(BatchSettings::new(RIG, frame_start, frame_end))
        .object(
            SceneObject::new(RIG, ObjectKind::Empty)
                .rotation_z(0.25)
                .sprite(flags),
        )
        .object(
            SceneObject::new("Body", ObjectKind::Mesh)
                .selected(true)
                .sprite(SpriteConfig::new(sprite_name)),
        )
}

/// A project file written into a temporary directory.
pub struct ProjectFixture {
    pub root: TempDir,
    pub project_path: PathBuf,
}

impl ProjectFixture {
    /// Writes `project` as `project.json`.
    pub fn new(project: &Project) -> Self {
        let json = project.to_json_pretty().expect("Failed to serialize project");
        Self::from_json(&json)
    }

    /// Writes raw JSON as `project.json`.
    pub fn from_json(json: &str) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let project_path = root.path().join("project.json");
        fs::write(&project_path, json).expect("Failed to write project file");
        Self { root, project_path }
    }

    /// Directory holding the project file.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Project file path as a CLI argument.
    pub fn project_arg(&self) -> &str {
        self.project_path
            .to_str()
            .expect("Temp paths are valid UTF-8")
    }
}
