//! SpriteBatch Render Backend
//!
//! This crate drives a 3D host through a sprite sheet render: it rotates a
//! target object through each angle of each animation frame and asks the host
//! to write one still per step, named by the rules in `spritebatch-spec`.
//!
//! # Architecture
//!
//! - **Host traits** ([`Scene`], [`RenderBackend`]) describe what the
//!   controller needs from a 3D application.
//! - **[`RunController`]** runs the batch and restores the target's rotation
//!   and the frame cursor on every exit path.
//! - **[`MemoryHost`]** records stills in memory (dry runs, tests).
//! - **[`BlenderHost`]** records a command batch that the [`Orchestrator`]
//!   replays in a Blender subprocess.
//!
//! # Example
//!
//! ```
//! use spritebatch_backend_blender::{render_batch, MemoryHost};
//! use spritebatch_spec::{BatchSettings, ObjectKind, SceneObject, SpriteConfig};
//!
//! let mut host = MemoryHost::new(1)
//!     .with_object(SceneObject::new("Rig", ObjectKind::Empty).sprite(SpriteConfig::new("TEST")))
//!     .with_object(
//!         SceneObject::new("Body", ObjectKind::Mesh)
//!             .selected(true)
//!             .sprite(SpriteConfig::new("TEST")),
//!     );
//!
//! let report = render_batch(&mut host, &BatchSettings::new("Rig", 1, 2)).unwrap();
//! assert_eq!(report.shots, 16);
//! assert_eq!(host.stills()[8].path, "TESTB1");
//! ```
//!
//! # Blender Requirements
//!
//! [`BlenderHost::execute`] requires Blender. The orchestrator searches for it in:
//!
//! 1. The configured path
//! 2. `BLENDER_PATH` environment variable
//! 3. System PATH
//! 4. Common installation locations (platform-specific)

pub mod batch;
pub mod controller;
pub mod error;
pub mod host;
pub mod memory;
pub mod orchestrator;
pub mod report;

// Re-export main types at crate root
pub use batch::{BatchCommand, BlenderHost, RenderBatch};
pub use controller::{render_batch, RunController, RunPhase};
pub use error::{BlenderError, BlenderResult, RunError, RunResult};
pub use host::{RenderBackend, Scene};
pub use memory::{MemoryHost, RecordedStill};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use report::BlenderReport;
