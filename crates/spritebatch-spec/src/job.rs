//! Render jobs and the per-object enumerator that produces them.

use serde::{Deserialize, Serialize};

use crate::angle::angle_steps;
use crate::error::SpriteError;
use crate::frame::{FrameIndexer, FrameRange, FrameSlot};
use crate::naming::compose_filename;
use crate::sprite::{SpriteConfig, SpriteName};

/// A single still render: where to turn the target and where to write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    /// Animation frame the job belongs to.
    pub frame: i32,
    /// Position in the frame's rotation order.
    pub angle_index: usize,
    /// Absolute rotation of the target around its vertical axis.
    pub angle_radians: f64,
    /// Output path without extension.
    pub filename: String,
}

/// Enumerates jobs for one object run.
///
/// Frames must be started in ascending order with [`Enumerator::begin_frame`];
/// the angle set is taken from whatever configuration is passed to
/// [`Enumerator::jobs_for_frame`], so callers can re-read it every frame.
#[derive(Debug, Clone)]
pub struct Enumerator {
    output_path: String,
    sprite: SpriteName,
    orig_rotation: f64,
    indexer: FrameIndexer,
}

impl Enumerator {
    /// Creates an enumerator.
    ///
    /// * `output_path` - Filename prefix
    /// * `sprite` - Validated base name of the object being rendered
    /// * `orig_rotation` - Target rotation before the run, in radians
    /// * `frame_cursor` - Host frame cursor before the run
    pub fn new(
        output_path: impl Into<String>,
        sprite: SpriteName,
        orig_rotation: f64,
        frame_cursor: i32,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            sprite,
            orig_rotation,
            indexer: FrameIndexer::new(frame_cursor),
        }
    }

    /// Advances the subsprite state to `frame`.
    pub fn begin_frame(&mut self, frame: i32) -> Result<FrameSlot, SpriteError> {
        self.indexer.advance(frame)
    }

    /// Jobs for a frame previously returned by [`Enumerator::begin_frame`].
    pub fn jobs_for_frame(&self, slot: &FrameSlot, config: &SpriteConfig) -> Vec<RenderJob> {
        angle_steps(config, slot.letter)
            .into_iter()
            .map(|step| RenderJob {
                frame: slot.frame,
                angle_index: step.index,
                angle_radians: self.orig_rotation - step.offset_radians,
                filename: compose_filename(&self.output_path, &self.sprite, slot, &step.code),
            })
            .collect()
    }
}

/// Plans every job for a range with a fixed configuration.
///
/// Validates the range and sprite name first, so an invalid run yields no
/// jobs at all.
///
/// # Example
///
/// ```
/// use spritebatch_spec::{plan_jobs, FrameRange, SpriteConfig};
///
/// let config = SpriteConfig::new("TEST");
/// let jobs = plan_jobs(FrameRange::new(1, 2), "", &config, 0.0, 1).unwrap();
/// assert_eq!(jobs.len(), 16);
/// assert_eq!(jobs[0].filename, "TESTA1");
/// assert_eq!(jobs[15].filename, "TESTB8");
/// ```
pub fn plan_jobs(
    range: FrameRange,
    output_path: &str,
    config: &SpriteConfig,
    orig_rotation: f64,
    frame_cursor: i32,
) -> Result<Vec<RenderJob>, SpriteError> {
    range.validate()?;
    let sprite = config.validated_name()?;

    let mut enumerator = Enumerator::new(output_path, sprite, orig_rotation, frame_cursor);
    let mut jobs = Vec::new();
    for frame in range.frames() {
        let slot = enumerator.begin_frame(frame)?;
        jobs.extend(enumerator.jobs_for_frame(&slot, config));
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    fn filenames(jobs: &[RenderJob]) -> Vec<&str> {
        jobs.iter().map(|j| j.filename.as_str()).collect()
    }

    #[test]
    fn test_two_frames_eight_angles() {
        let jobs = plan_jobs(FrameRange::new(1, 2), "", &SpriteConfig::new("TEST"), 0.0, 1).unwrap();
        assert_eq!(
            filenames(&jobs),
            vec![
                "TESTA1", "TESTA2", "TESTA3", "TESTA4", "TESTA5", "TESTA6", "TESTA7", "TESTA8",
                "TESTB1", "TESTB2", "TESTB3", "TESTB4", "TESTB5", "TESTB6", "TESTB7", "TESTB8",
            ]
        );
    }

    #[test]
    fn test_angles_turn_clockwise_from_original() {
        let jobs = plan_jobs(FrameRange::new(1, 1), "", &SpriteConfig::new("TEST"), PI, 1).unwrap();
        assert!((jobs[0].angle_radians - PI).abs() < 1e-12);
        assert!((jobs[1].angle_radians - (PI - FRAC_PI_4)).abs() < 1e-12);
        assert!((jobs[4].angle_radians - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_27_starts_second_sheet() {
        let jobs = plan_jobs(FrameRange::new(1, 30), "out/", &SpriteConfig::new("TEST"), 0.0, 1).unwrap();
        let frame_27: Vec<&str> = jobs
            .iter()
            .filter(|j| j.frame == 27)
            .map(|j| j.filename.as_str())
            .collect();
        assert_eq!(frame_27[0], "out/TES0A1");
        assert_eq!(frame_27[7], "out/TES0A8");
    }

    #[test]
    fn test_rejects_long_range_before_planning() {
        let err = plan_jobs(FrameRange::new(1, 261), "", &SpriteConfig::new("TEST"), 0.0, 1).unwrap_err();
        assert_eq!(err, SpriteError::FrameRangeTooLong { end_frame: 261 });
    }

    #[test]
    fn test_rejects_bad_sprite_name() {
        let err = plan_jobs(FrameRange::new(1, 2), "", &SpriteConfig::new("TES"), 0.0, 1).unwrap_err();
        assert!(matches!(err, SpriteError::InvalidSpriteName { actual: 3, .. }));
    }

    #[test]
    fn test_empty_range_plans_nothing() {
        let jobs = plan_jobs(FrameRange::new(10, 9), "", &SpriteConfig::new("TEST"), 0.0, 1).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_config_can_change_between_frames() {
        let mut enumerator = Enumerator::new("", SpriteName::parse("TEST").unwrap(), 0.0, 1);
        let slot = enumerator.begin_frame(1).unwrap();
        assert_eq!(enumerator.jobs_for_frame(&slot, &SpriteConfig::new("TEST")).len(), 8);

        let slot = enumerator.begin_frame(2).unwrap();
        let fixed = SpriteConfig::new("TEST").no_rotation(true);
        let jobs = enumerator.jobs_for_frame(&slot, &fixed);
        assert_eq!(filenames(&jobs), vec!["TESTB0"]);
    }
}
