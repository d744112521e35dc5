//! In-memory host.
//!
//! Mirrors a project's objects and records every still instead of rendering
//! it. Used for dry runs (`spritebatch plan`), as the scene mirror of the
//! Blender host, and in tests.

use std::collections::HashMap;

use spritebatch_spec::{ObjectKind, Project, SceneObject, SpriteConfig};

use crate::error::{RunError, RunResult};
use crate::host::{RenderBackend, Scene};

/// A still the host was asked to render.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStill {
    /// Output path as passed to `render_still`.
    pub path: String,
    /// Frame cursor at render time.
    pub frame: i32,
    /// Rotations of all objects at render time, by name.
    pub rotations: HashMap<String, f64>,
}

/// Scene and backend held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    objects: Vec<SceneObject>,
    frame: i32,
    stills: Vec<RecordedStill>,
    redraws: usize,
    scheduled: HashMap<(String, i32), Option<SpriteConfig>>,
    fail_after: Option<usize>,
}

impl MemoryHost {
    /// Creates an empty host with the frame cursor on `frame`.
    pub fn new(frame: i32) -> Self {
        Self {
            frame,
            ..Default::default()
        }
    }

    /// Mirrors a project's objects and initial frame.
    pub fn from_project(project: &Project) -> Self {
        Self {
            objects: project.objects.clone(),
            frame: project.initial_frame(),
            ..Default::default()
        }
    }

    /// Adds an object.
    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Replaces `name`'s sprite configuration when the cursor reaches `frame`.
    pub fn schedule_config(&mut self, name: &str, frame: i32, config: SpriteConfig) {
        self.scheduled.insert((name.to_string(), frame), Some(config));
    }

    /// Clears `name`'s sprite configuration when the cursor reaches `frame`.
    pub fn remove_config_at(&mut self, name: &str, frame: i32) {
        self.scheduled.insert((name.to_string(), frame), None);
    }

    /// Makes `render_still` fail once `count` stills have been recorded.
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count);
    }

    /// Stills recorded so far.
    pub fn stills(&self) -> &[RecordedStill] {
        &self.stills
    }

    /// Number of viewport redraw requests.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }
}

impl Scene for MemoryHost {
    fn object_kind(&self, name: &str) -> Option<ObjectKind> {
        self.find(name).map(|o| o.kind)
    }

    fn selected_objects(&self) -> Vec<String> {
        self.objects
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.name.clone())
            .collect()
    }

    fn rotation_z(&self, name: &str) -> Option<f64> {
        self.find(name).map(|o| o.rotation_z)
    }

    fn set_rotation_z(&mut self, name: &str, radians: f64) {
        if let Some(object) = self.find_mut(name) {
            object.rotation_z = radians;
        }
    }

    fn sprite_config(&self, name: &str) -> Option<SpriteConfig> {
        self.find(name).and_then(|o| o.sprite.clone())
    }
}

impl RenderBackend for MemoryHost {
    fn frame(&self) -> i32 {
        self.frame
    }

    fn set_frame(&mut self, frame: i32) {
        self.frame = frame;
        let due: Vec<(String, Option<SpriteConfig>)> = self
            .scheduled
            .iter()
            .filter(|((_, f), _)| *f == frame)
            .map(|((name, _), config)| (name.clone(), config.clone()))
            .collect();
        for (name, config) in due {
            if let Some(object) = self.find_mut(&name) {
                object.sprite = config;
            }
        }
    }

    fn redraw_viewport(&mut self) {
        self.redraws += 1;
    }

    fn render_still(&mut self, filepath: &str) -> RunResult<()> {
        if self.fail_after.is_some_and(|n| self.stills.len() >= n) {
            return Err(RunError::render_failed(filepath, "injected render failure"));
        }
        self.stills.push(RecordedStill {
            path: filepath.to_string(),
            frame: self.frame,
            rotations: self
                .objects
                .iter()
                .map(|o| (o.name.clone(), o.rotation_z))
                .collect(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritebatch_spec::BatchSettings;

    #[test]
    fn test_from_project() {
        let project = Project::new(BatchSettings::new("Rig", 1, 4))
            .object(SceneObject::new("Rig", ObjectKind::Empty).rotation_z(1.5))
            .object(SceneObject::new("Body", ObjectKind::Mesh).selected(true));
        let host = MemoryHost::from_project(&project);

        assert_eq!(host.frame(), 1);
        assert_eq!(host.object_kind("Body"), Some(ObjectKind::Mesh));
        assert_eq!(host.object_kind("Nope"), None);
        assert_eq!(host.rotation_z("Rig"), Some(1.5));
        assert_eq!(host.selected_objects(), vec!["Body".to_string()]);
    }

    #[test]
    fn test_render_records_state() {
        let mut host = MemoryHost::new(1).with_object(SceneObject::new("Rig", ObjectKind::Empty));
        host.set_frame(5);
        host.set_rotation_z("Rig", 0.25);
        host.render_still("out/TESTE1").unwrap();

        let still = &host.stills()[0];
        assert_eq!(still.path, "out/TESTE1");
        assert_eq!(still.frame, 5);
        assert_eq!(still.rotations["Rig"], 0.25);
    }

    #[test]
    fn test_scheduled_config_applies_on_frame() {
        let mut host = MemoryHost::new(1)
            .with_object(SceneObject::new("Rig", ObjectKind::Empty).sprite(SpriteConfig::new("TEST")));
        host.schedule_config("Rig", 3, SpriteConfig::new("TEST").mirror(true));

        host.set_frame(2);
        assert!(!host.sprite_config("Rig").unwrap().mirror);
        host.set_frame(3);
        assert!(host.sprite_config("Rig").unwrap().mirror);

        host.remove_config_at("Rig", 4);
        host.set_frame(4);
        assert_eq!(host.sprite_config("Rig"), None);
    }

    #[test]
    fn test_injected_failure() {
        let mut host = MemoryHost::new(1);
        host.fail_after(1);
        assert!(host.render_still("a").is_ok());
        assert!(host.render_still("b").is_err());
        assert_eq!(host.stills().len(), 1);
    }
}
