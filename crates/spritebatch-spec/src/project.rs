//! Project files: batch settings plus a description of the scene objects.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::frame::FrameRange;
use crate::sprite::SpriteConfig;

/// User-facing settings for a batch render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSettings {
    /// Name of the object rotated during rendering. Usually an empty with the
    /// actual models as children.
    pub target: String,
    /// Filename prefix for rendered frames.
    #[serde(default)]
    pub path: String,
    /// First animation frame.
    pub frame_start: i32,
    /// Last animation frame, inclusive.
    pub frame_end: i32,
}

impl BatchSettings {
    /// Creates settings for a target and frame range with an empty prefix.
    pub fn new(target: impl Into<String>, frame_start: i32, frame_end: i32) -> Self {
        Self {
            target: target.into(),
            path: String::new(),
            frame_start,
            frame_end,
        }
    }

    /// Sets the output prefix.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// The configured frame range.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange::new(self.frame_start, self.frame_end)
    }
}

/// Object type as reported by the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Mesh,
    Empty,
    Armature,
    Camera,
    Light,
    Curve,
    Other,
}

impl ObjectKind {
    /// Returns the string identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Mesh => "mesh",
            ObjectKind::Empty => "empty",
            ObjectKind::Armature => "armature",
            ObjectKind::Camera => "camera",
            ObjectKind::Light => "light",
            ObjectKind::Curve => "curve",
            ObjectKind::Other => "other",
        }
    }
}

/// A scene object as described in a project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    /// Rotation around the vertical axis, in radians.
    #[serde(default)]
    pub rotation_z: f64,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteConfig>,
}

impl SceneObject {
    /// Creates an unselected object with no rotation and no sprite config.
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rotation_z: 0.0,
            selected: false,
            sprite: None,
        }
    }

    /// Sets the selection state.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the initial rotation.
    pub fn rotation_z(mut self, radians: f64) -> Self {
        self.rotation_z = radians;
        self
    }

    /// Attaches a sprite configuration.
    pub fn sprite(mut self, config: SpriteConfig) -> Self {
        self.sprite = Some(config);
        self
    }
}

/// A sprite batch project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub settings: BatchSettings,
    /// Host frame cursor before rendering; defaults to the start frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_current: Option<i32>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Project {
    /// Creates a project with no objects.
    pub fn new(settings: BatchSettings) -> Self {
        Self {
            settings,
            frame_current: None,
            objects: Vec::new(),
        }
    }

    /// Adds an object.
    pub fn object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Parses a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a project from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the project as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The frame cursor a run starts from.
    pub fn initial_frame(&self) -> i32 {
        self.frame_current.unwrap_or(self.settings.frame_start)
    }

    /// Finds an object by name.
    pub fn find_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Selected objects, in declaration order.
    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.selected)
    }
}
