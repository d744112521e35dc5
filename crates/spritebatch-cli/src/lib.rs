//! SpriteBatch CLI library.
//!
//! Project loading and the `validate`, `plan` and `render` commands behind the
//! `spritebatch` binary.

pub mod commands;
pub mod input;
