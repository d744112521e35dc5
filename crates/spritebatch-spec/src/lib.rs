//! SpriteBatch Spec Library
//!
//! This crate provides the types and naming rules for rendering a 3D object
//! into a sprite sheet: one still per animation frame and rotation angle,
//! each written to a filename that encodes the sprite, sheet, frame and angle.
//!
//! # Naming scheme
//!
//! ```text
//! <path><sprite><subsprite><frame letter><angle code>
//! ```
//!
//! - **sprite**: the 4-character base name; only its first 3 characters past
//!   frame 26
//! - **subsprite**: a digit `0`-`9`, empty for frames 1-26
//! - **frame letter**: `A`-`Z`, repeating every 26 frames
//! - **angle code**: `0` (no rotation), `1`-`8`, or one of
//!   `192A3B4C5D6E7F8G`; mirrored views append the frame letter and the
//!   partner's code
//!
//! # Example
//!
//! ```
//! use spritebatch_spec::{plan_jobs, FrameRange, SpriteConfig};
//!
//! let config = SpriteConfig::new("TROO").mirror(true);
//! let jobs = plan_jobs(FrameRange::new(1, 1), "sprites/", &config, 0.0, 1).unwrap();
//!
//! let names: Vec<&str> = jobs.iter().map(|j| j.filename.as_str()).collect();
//! assert_eq!(
//!     names,
//!     ["sprites/TROOA1", "sprites/TROOA2A8", "sprites/TROOA3A7", "sprites/TROOA4A6", "sprites/TROOA5"]
//! );
//! ```
//!
//! # Modules
//!
//! - [`angle`]: Angle sets, codes and mirror partners
//! - [`error`]: Error and warning types
//! - [`frame`]: Frame letters, subsprite digits, frame ranges
//! - [`job`]: Render jobs and the per-object enumerator
//! - [`naming`]: Filename composition
//! - [`project`]: Project file format
//! - [`report`]: Run report types
//! - [`sprite`]: Per-object sprite configuration
//! - [`validation`]: Project validation

pub mod angle;
pub mod error;
pub mod frame;
pub mod job;
pub mod naming;
pub mod project;
pub mod report;
pub mod sprite;
pub mod validation;

// Re-export commonly used types at the crate root
pub use angle::{angle_steps, AngleMode, AngleStep};
pub use error::{
    BackendError, ErrorCode, SpecError, SpriteError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use frame::{frame_letter, FrameIndexer, FrameRange, FrameSlot, MAX_FRAMES};
pub use job::{plan_jobs, Enumerator, RenderJob};
pub use naming::compose_filename;
pub use project::{BatchSettings, ObjectKind, Project, SceneObject};
pub use report::{ObjectOutcome, ObjectReport, RunReport};
pub use sprite::{SpriteConfig, SpriteName, SPRITE_NAME_LEN};
pub use validation::validate_project;
