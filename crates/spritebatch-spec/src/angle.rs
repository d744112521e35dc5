//! Rotation angles and their filename codes.
//!
//! | Mode | Angles | Codes | Rendered with mirror |
//! |------|--------|-------|----------------------|
//! | Fixed (`no_rotation`) | 1 | `0` | 1 |
//! | Eight | 8 | `12345678` | 5 (indices 0-4) |
//! | Sixteen (`sixteen_angles`) | 16 | `192A3B4C5D6E7F8G` | 9 (indices 0-8) |
//!
//! With mirroring, each index strictly between 0 and `N/2` also stands in for
//! its partner at `N - i`; the partner is written after the frame letter, so
//! one image serves both filenames. Indices 0 and `N/2` sit on the mirror
//! axis and carry no suffix.

use std::f64::consts::TAU;

use crate::sprite::SpriteConfig;

/// Code for the single view of a non-rotating sprite.
pub const FIXED_ANGLE_CODE: &str = "0";

/// Codes for the 8-angle set, in rotation order.
pub const EIGHT_ANGLE_CODES: &str = "12345678";

/// Codes for the 16-angle set, in rotation order.
pub const SIXTEEN_ANGLE_CODES: &str = "192A3B4C5D6E7F8G";

/// Angle set selected by a sprite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    /// One unrotated view.
    Fixed,
    /// Eight views, 45 degrees apart.
    Eight,
    /// Sixteen views, 22.5 degrees apart.
    Sixteen,
}

impl AngleMode {
    /// Picks the angle set. `no_rotation` wins over `sixteen_angles`.
    pub fn from_config(config: &SpriteConfig) -> Self {
        if config.no_rotation {
            AngleMode::Fixed
        } else if config.sixteen_angles {
            AngleMode::Sixteen
        } else {
            AngleMode::Eight
        }
    }

    /// Returns the string identifier for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleMode::Fixed => "fixed",
            AngleMode::Eight => "eight",
            AngleMode::Sixteen => "sixteen",
        }
    }

    fn codes(&self) -> &'static [u8] {
        match self {
            AngleMode::Fixed => FIXED_ANGLE_CODE.as_bytes(),
            AngleMode::Eight => EIGHT_ANGLE_CODES.as_bytes(),
            AngleMode::Sixteen => SIXTEEN_ANGLE_CODES.as_bytes(),
        }
    }

    /// Total number of angles in a full rotation.
    pub fn count(&self) -> usize {
        self.codes().len()
    }

    /// Angle between neighbouring views, in radians.
    pub fn step_radians(&self) -> f64 {
        TAU / self.count() as f64
    }

    /// Number of angles actually rendered per frame.
    pub fn rendered_count(&self, mirror: bool) -> usize {
        match self {
            AngleMode::Fixed => 1,
            _ if mirror => self.count() / 2 + 1,
            _ => self.count(),
        }
    }

    /// Code of the angle at `index`.
    pub fn code(&self, index: usize) -> Option<char> {
        self.codes().get(index).map(|&b| b as char)
    }

    /// Code of the view mirrored onto `index`, if it has one.
    pub fn mirror_partner(&self, index: usize) -> Option<char> {
        let count = self.count();
        if *self == AngleMode::Fixed || index == 0 || index >= count / 2 {
            return None;
        }
        self.code(count - index)
    }
}

/// One rotation step within a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleStep {
    /// Position in the rotation order.
    pub index: usize,
    /// Rotation subtracted from the object's original angle, in radians.
    pub offset_radians: f64,
    /// Filename code, including the mirror suffix when present.
    pub code: String,
}

/// Lists the angles to render for one frame.
pub fn angle_steps(config: &SpriteConfig, frame_letter: char) -> Vec<AngleStep> {
    let mode = AngleMode::from_config(config);
    let mirror = config.mirror && mode != AngleMode::Fixed;
    let step = mode.step_radians();

    (0..mode.rendered_count(mirror))
        .filter_map(|index| {
            let mut code = String::with_capacity(3);
            code.push(mode.code(index)?);
            if mirror {
                if let Some(partner) = mode.mirror_partner(index) {
                    code.push(frame_letter);
                    code.push(partner);
                }
            }
            Some(AngleStep {
                index,
                offset_radians: step * index as f64,
                code,
            })
        })
        .collect()
}
