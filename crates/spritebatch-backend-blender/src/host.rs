//! Interfaces to the 3D application that performs the rendering.
//!
//! The controller only needs a scene it can rotate and query, and a backend
//! that owns the frame cursor and writes stills. Hosts usually implement both
//! traits on the same type.

use spritebatch_spec::{ObjectKind, SpriteConfig};

use crate::error::RunResult;

/// Scene and object model.
pub trait Scene {
    /// Type of the named object, or `None` if it does not exist.
    fn object_kind(&self, name: &str) -> Option<ObjectKind>;

    /// Names of the selected objects, in selection order.
    fn selected_objects(&self) -> Vec<String>;

    /// Rotation of the named object around its vertical axis, in radians.
    fn rotation_z(&self, name: &str) -> Option<f64>;

    /// Sets the rotation of the named object around its vertical axis.
    fn set_rotation_z(&mut self, name: &str, radians: f64);

    /// Current sprite configuration of the named object.
    fn sprite_config(&self, name: &str) -> Option<SpriteConfig>;
}

/// Frame cursor and still rendering.
pub trait RenderBackend {
    /// Current frame.
    fn frame(&self) -> i32;

    /// Moves the frame cursor, updating the scene for that frame.
    fn set_frame(&mut self, frame: i32);

    /// Refreshes the host's viewport. Cosmetic only.
    fn redraw_viewport(&mut self) {}

    /// Renders one still and writes it to `filepath` (the host appends its
    /// image format extension).
    fn render_still(&mut self, filepath: &str) -> RunResult<()>;
}
