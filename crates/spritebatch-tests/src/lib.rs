//! SpriteBatch End-to-End Test Infrastructure
//!
//! Integration tests for the naming scheme and the render flow:
//!
//! - Enumeration: frame/angle/mirror combinations -> filenames
//! - Run control: project file -> in-memory host -> stills, state restored
//! - CLI: `validate` and `plan` through the real binary
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all tests that do not need Blender
//! cargo test -p spritebatch-tests
//!
//! # Include the Blender render test
//! SPRITEBATCH_RUN_BLENDER_TESTS=1 cargo test -p spritebatch-tests -- --ignored
//! ```

pub mod fixtures;
pub mod harness;
