//! Blender host.
//!
//! Blender runs as a separate process, so the controller drives a local
//! mirror of the scene and every state change is recorded as a
//! [`BatchCommand`]. [`BlenderHost::execute`] then replays the batch inside
//! Blender in one subprocess run.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use spritebatch_spec::{ObjectKind, Project, SpriteConfig};

use crate::error::{BlenderError, BlenderResult, RunResult};
use crate::host::{RenderBackend, Scene};
use crate::memory::MemoryHost;
use crate::orchestrator::{Orchestrator, OrchestratorConfig};
use crate::report::BlenderReport;

/// One step replayed by the Blender entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchCommand {
    /// `scene.frame_set(frame)`
    SetFrame { frame: i32 },
    /// `objects[object].rotation_euler.z = z`
    SetRotation { object: String, z: f64 },
    /// Viewport redraw.
    Redraw,
    /// Render the current frame and write it to `path`.
    RenderStill { path: String },
}

/// Command batch handed to Blender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBatch {
    /// Object rotated by the batch; its rotation mode is forced to XYZ.
    pub target: String,
    pub commands: Vec<BatchCommand>,
}

impl RenderBatch {
    /// Number of stills the batch renders.
    pub fn still_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, BatchCommand::RenderStill { .. }))
            .count()
    }
}

/// Host that records commands for a later Blender run.
#[derive(Debug, Clone)]
pub struct BlenderHost {
    scene: MemoryHost,
    target: String,
    commands: Vec<BatchCommand>,
}

impl BlenderHost {
    /// Mirrors a project's objects.
    pub fn from_project(project: &Project) -> Self {
        Self {
            scene: MemoryHost::from_project(project),
            target: project.settings.target.clone(),
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[BatchCommand] {
        &self.commands
    }

    /// The recorded batch.
    pub fn batch(&self) -> RenderBatch {
        RenderBatch {
            target: self.target.clone(),
            commands: self.commands.clone(),
        }
    }

    /// Replays the recorded batch in Blender against `blend_file`.
    pub fn execute(&self, blend_file: &Path, config: OrchestratorConfig) -> BlenderResult<BlenderReport> {
        let batch = self.batch();
        let batch_json = serde_json::to_string(&batch).map_err(BlenderError::SerializeFailed)?;
        info!(
            "Executing {} commands ({} stills) in Blender",
            batch.commands.len(),
            batch.still_count()
        );
        Orchestrator::with_config(config).run_with_batch_json(blend_file, &batch_json)
    }
}

impl Scene for BlenderHost {
    fn object_kind(&self, name: &str) -> Option<ObjectKind> {
        self.scene.object_kind(name)
    }

    fn selected_objects(&self) -> Vec<String> {
        self.scene.selected_objects()
    }

    fn rotation_z(&self, name: &str) -> Option<f64> {
        self.scene.rotation_z(name)
    }

    fn set_rotation_z(&mut self, name: &str, radians: f64) {
        self.scene.set_rotation_z(name, radians);
        self.commands.push(BatchCommand::SetRotation {
            object: name.to_string(),
            z: radians,
        });
    }

    fn sprite_config(&self, name: &str) -> Option<SpriteConfig> {
        self.scene.sprite_config(name)
    }
}

impl RenderBackend for BlenderHost {
    fn frame(&self) -> i32 {
        self.scene.frame()
    }

    fn set_frame(&mut self, frame: i32) {
        self.scene.set_frame(frame);
        self.commands.push(BatchCommand::SetFrame { frame });
    }

    fn redraw_viewport(&mut self) {
        self.commands.push(BatchCommand::Redraw);
    }

    fn render_still(&mut self, filepath: &str) -> RunResult<()> {
        self.scene.render_still(filepath)?;
        self.commands.push(BatchCommand::RenderStill {
            path: filepath.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::render_batch;
    use pretty_assertions::assert_eq;
    use spritebatch_spec::{BatchSettings, SceneObject};

    fn project() -> Project {
        Project::new(BatchSettings::new("Rig", 1, 1).path("out/"))
            .object(
                SceneObject::new("Rig", ObjectKind::Empty)
                    .rotation_z(0.5)
                    .sprite(SpriteConfig::new("TEST").no_rotation(true)),
            )
            .object(
                SceneObject::new("Body", ObjectKind::Mesh)
                    .selected(true)
                    .sprite(SpriteConfig::new("TEST")),
            )
    }

    #[test]
    fn test_records_controller_commands() {
        let project = project();
        let mut host = BlenderHost::from_project(&project);
        render_batch(&mut host, &project.settings).unwrap();

        assert_eq!(
            host.commands(),
            &[
                BatchCommand::SetFrame { frame: 1 },
                BatchCommand::SetRotation {
                    object: "Rig".to_string(),
                    z: 0.5
                },
                BatchCommand::Redraw,
                BatchCommand::RenderStill {
                    path: "out/TESTA0".to_string()
                },
                BatchCommand::SetFrame { frame: 1 },
                BatchCommand::SetRotation {
                    object: "Rig".to_string(),
                    z: 0.5
                },
            ]
        );
        assert_eq!(host.batch().still_count(), 1);
    }

    #[test]
    fn test_batch_json_shape() {
        let batch = RenderBatch {
            target: "Rig".to_string(),
            commands: vec![
                BatchCommand::SetFrame { frame: 3 },
                BatchCommand::RenderStill {
                    path: "out/TESTC1".to_string(),
                },
            ],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target": "Rig",
                "commands": [
                    { "op": "set_frame", "frame": 3 },
                    { "op": "render_still", "path": "out/TESTC1" }
                ]
            })
        );
    }
}
