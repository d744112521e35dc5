//! Per-object sprite configuration.
//!
//! Objects in a scene carry a [`SpriteConfig`] describing how they are
//! rendered: the 4-character sprite base name used as the filename prefix and
//! the flags that select the angle set.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SpriteError;

/// Number of characters in a sprite base name.
pub const SPRITE_NAME_LEN: usize = 4;

/// Rendering configuration attached to a scene object.
///
/// Field names also accept the attribute keys used by the Blender addon
/// (`SpriteName`, `NoRotation`, `Mirror`, `SixteenAngles`), and the flags
/// accept the `0`/`1` integers those attributes were stored as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpriteConfig {
    /// Sprite base name; must be exactly four characters to render.
    #[serde(default, alias = "SpriteName")]
    pub sprite_name: String,

    /// Render a single, unrotated view per frame.
    #[serde(default, alias = "NoRotation", deserialize_with = "legacy_flag")]
    pub no_rotation: bool,

    /// Render only one half of the rotation and encode the mirrored partner
    /// in the filename.
    #[serde(default, alias = "Mirror", deserialize_with = "legacy_flag")]
    pub mirror: bool,

    /// Use 16 angles instead of 8.
    #[serde(default, alias = "SixteenAngles", deserialize_with = "legacy_flag")]
    pub sixteen_angles: bool,
}

impl SpriteConfig {
    /// Creates a config with the given base name and all flags cleared.
    pub fn new(sprite_name: impl Into<String>) -> Self {
        Self {
            sprite_name: sprite_name.into(),
            ..Default::default()
        }
    }

    /// Sets the no-rotation flag.
    pub fn no_rotation(mut self, value: bool) -> Self {
        self.no_rotation = value;
        self
    }

    /// Sets the mirror flag.
    pub fn mirror(mut self, value: bool) -> Self {
        self.mirror = value;
        self
    }

    /// Sets the 16-angle flag.
    pub fn sixteen_angles(mut self, value: bool) -> Self {
        self.sixteen_angles = value;
        self
    }

    /// Parses the base name into a validated [`SpriteName`].
    pub fn validated_name(&self) -> Result<SpriteName, SpriteError> {
        SpriteName::parse(&self.sprite_name)
    }
}

fn legacy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(value) => Ok(value != 0),
    }
}

/// A sprite base name of exactly [`SPRITE_NAME_LEN`] characters.
///
/// Length is counted in `char`s, so a name is never split inside a
/// multi-byte character when it is truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteName(String);

impl SpriteName {
    /// Validates a raw base name.
    pub fn parse(name: &str) -> Result<Self, SpriteError> {
        let actual = name.chars().count();
        if actual != SPRITE_NAME_LEN {
            return Err(SpriteError::InvalidSpriteName {
                name: name.to_string(),
                actual,
            });
        }
        Ok(Self(name.to_string()))
    }

    /// The full four-character name.
    pub fn full(&self) -> &str {
        &self.0
    }

    /// The name without its last character, used once a subsprite digit
    /// takes the fourth slot.
    pub fn truncated(&self) -> &str {
        match self.0.char_indices().last() {
            Some((idx, _)) => &self.0[..idx],
            None => "",
        }
    }
}

impl std::fmt::Display for SpriteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
