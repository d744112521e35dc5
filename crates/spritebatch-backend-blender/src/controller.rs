//! Batch render controller.
//!
//! Drives a host through every selected object, frame and angle:
//!
//! ```text
//! Idle -> Validating -> Iterating(frame) -> Rendering(frame, angle) -> Complete | Aborted
//! ```
//!
//! The target's rotation and the frame cursor belong to the controller while
//! an object is being rendered and are put back when that object finishes,
//! whether it completed, failed, or unwound from a panic.
//!
//! There is no cancellation. Once started, the full frame x angle product of
//! every selected object is rendered.

use std::ops::{Deref, DerefMut};

use log::{debug, info, warn};
use spritebatch_spec::{BackendError, BatchSettings, Enumerator, ObjectKind, ObjectOutcome, RenderJob, RunReport};

use crate::error::{RunError, RunResult};
use crate::host::{RenderBackend, Scene};

/// Where the controller is in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Created, not yet run.
    Idle,
    /// Checking the target and frame range.
    Validating,
    /// Cursor moved to `frame`; flags are being read.
    Iterating { frame: i32 },
    /// Writing the still for `angle_index` of `frame`.
    Rendering { frame: i32, angle_index: usize },
    /// Every selected object was handled.
    Complete,
    /// A batch-level error stopped the run.
    Aborted,
}

/// Renders sprite sheets for every selected object of a host.
pub struct RunController<'h, H> {
    host: &'h mut H,
    settings: BatchSettings,
    phase: RunPhase,
    record_jobs: bool,
}

impl<'h, H: Scene + RenderBackend> RunController<'h, H> {
    /// Creates a controller for one batch.
    pub fn new(host: &'h mut H, settings: BatchSettings) -> Self {
        Self {
            host,
            settings,
            phase: RunPhase::Idle,
            record_jobs: false,
        }
    }

    /// Keeps every job in the returned report.
    pub fn record_jobs(mut self, record: bool) -> Self {
        self.record_jobs = record;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Runs the batch.
    ///
    /// A missing target or an unusable frame range aborts before anything is
    /// rendered. Non-mesh selections are skipped and objects with a bad sprite
    /// configuration are reported as failed; the batch moves on in both
    /// cases. Any other error aborts the batch, leaving already rendered
    /// files in place.
    pub fn run(&mut self) -> RunResult<RunReport> {
        self.phase = RunPhase::Validating;
        if let Err(err) = self.validate() {
            warn!("{}", err);
            self.phase = RunPhase::Aborted;
            return Err(err);
        }

        let mut report = RunReport::new(&self.settings.target);
        for name in self.host.selected_objects() {
            let before = report.jobs.len();
            let result = self.render_object(&name, &mut report.jobs);
            let shots = report.jobs.len() - before;
            match result {
                Ok(()) => {
                    info!("Rendered {} shots for '{}'", shots, name);
                    report.push(name, ObjectOutcome::Rendered { shots });
                }
                Err(err @ RunError::NotAMesh { .. }) => {
                    warn!("{}", err);
                    report.push(
                        name,
                        ObjectOutcome::Skipped {
                            code: err.code().to_string(),
                            reason: err.to_string(),
                        },
                    );
                }
                Err(err) if err.is_object_scoped() => {
                    warn!("{}", err);
                    report.push(
                        name,
                        ObjectOutcome::Failed {
                            shots,
                            code: err.code().to_string(),
                            reason: err.to_string(),
                        },
                    );
                }
                Err(err) => {
                    warn!("Aborting after {} shots: {}", report.jobs.len(), err);
                    self.phase = RunPhase::Aborted;
                    return Err(err);
                }
            }
        }

        if !self.record_jobs {
            report.jobs.clear();
        }
        info!("Rendered {} shots", report.shots);
        self.phase = RunPhase::Complete;
        Ok(report)
    }

    fn validate(&self) -> RunResult<()> {
        let target = &self.settings.target;
        if self.host.object_kind(target).is_none() {
            return Err(RunError::TargetNotFound {
                name: target.clone(),
            });
        }
        self.settings.frame_range().validate()?;
        Ok(())
    }

    fn render_object(&mut self, name: &str, jobs: &mut Vec<RenderJob>) -> RunResult<()> {
        if self.host.object_kind(name) != Some(ObjectKind::Mesh) {
            return Err(RunError::NotAMesh {
                name: name.to_string(),
            });
        }

        let config = self
            .host
            .sprite_config(name)
            .ok_or_else(|| RunError::MissingSpriteConfig {
                name: name.to_string(),
            })?;
        let sprite = config.validated_name()?;

        let target = self.settings.target.as_str();
        let range = self.settings.frame_range();
        let mut host = RestoreGuard::capture(&mut *self.host, target);
        let mut enumerator = Enumerator::new(
            self.settings.path.as_str(),
            sprite,
            host.rotation,
            host.frame,
        );
        debug!(
            "Rendering '{}' as '{}' (frames {}..={}, rotation {:.4})",
            name, config.sprite_name, range.start, range.end, host.rotation
        );

        for frame in range.frames() {
            self.phase = RunPhase::Iterating { frame };
            host.set_frame(frame);

            // Flags are re-read every frame; they may be animated.
            let flags = host
                .sprite_config(target)
                .ok_or_else(|| RunError::MissingSpriteConfig {
                    name: target.to_string(),
                })?;
            let slot = enumerator.begin_frame(frame)?;

            for job in enumerator.jobs_for_frame(&slot, &flags) {
                self.phase = RunPhase::Rendering {
                    frame,
                    angle_index: job.angle_index,
                };
                host.set_rotation_z(target, job.angle_radians);
                host.redraw_viewport();
                host.render_still(&job.filename)?;
                debug!("{} ({:.4} rad)", job.filename, job.angle_radians);
                jobs.push(job);
            }
        }

        Ok(())
    }
}

/// Holds the host while an object renders and restores the target rotation
/// and frame cursor when dropped.
struct RestoreGuard<'a, H: Scene + RenderBackend> {
    host: &'a mut H,
    target: &'a str,
    rotation: f64,
    frame: i32,
}

impl<'a, H: Scene + RenderBackend> RestoreGuard<'a, H> {
    fn capture(host: &'a mut H, target: &'a str) -> Self {
        let rotation = host.rotation_z(target).unwrap_or_default();
        let frame = host.frame();
        Self {
            host,
            target,
            rotation,
            frame,
        }
    }
}

impl<H: Scene + RenderBackend> Deref for RestoreGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Scene + RenderBackend> DerefMut for RestoreGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Scene + RenderBackend> Drop for RestoreGuard<'_, H> {
    fn drop(&mut self) {
        self.host.set_frame(self.frame);
        self.host.set_rotation_z(self.target, self.rotation);
        debug!(
            "Restored '{}' to {:.4} rad at frame {}",
            self.target, self.rotation, self.frame
        );
    }
}

/// Renders a batch with default controller options.
pub fn render_batch<H: Scene + RenderBackend>(
    host: &mut H,
    settings: &BatchSettings,
) -> RunResult<RunReport> {
    RunController::new(host, settings.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use pretty_assertions::assert_eq;
    use spritebatch_spec::{SceneObject, SpriteConfig, SpriteError};
    use std::f64::consts::FRAC_PI_4;

    const ORIGINAL_ROTATION: f64 = 0.3;

    fn host(target_config: SpriteConfig) -> MemoryHost {
        MemoryHost::new(1)
            .with_object(
                SceneObject::new("Rig", ObjectKind::Empty)
                    .rotation_z(ORIGINAL_ROTATION)
                    .sprite(target_config),
            )
            .with_object(
                SceneObject::new("Body", ObjectKind::Mesh)
                    .selected(true)
                    .sprite(SpriteConfig::new("TEST")),
            )
    }

    fn paths(host: &MemoryHost) -> Vec<&str> {
        host.stills().iter().map(|s| s.path.as_str()).collect()
    }

    fn assert_restored(host: &MemoryHost, frame: i32) {
        assert_eq!(host.rotation_z("Rig"), Some(ORIGINAL_ROTATION));
        assert_eq!(host.frame(), frame);
    }

    #[test]
    fn test_two_frames_eight_angles() {
        let mut host = host(SpriteConfig::new("TEST"));
        let report = render_batch(&mut host, &BatchSettings::new("Rig", 1, 2)).unwrap();

        assert_eq!(report.shots, 16);
        assert_eq!(
            paths(&host),
            vec![
                "TESTA1", "TESTA2", "TESTA3", "TESTA4", "TESTA5", "TESTA6", "TESTA7", "TESTA8",
                "TESTB1", "TESTB2", "TESTB3", "TESTB4", "TESTB5", "TESTB6", "TESTB7", "TESTB8",
            ]
        );
        assert_eq!(host.redraw_count(), 16);
        assert_restored(&host, 1);
    }

    #[test]
    fn test_target_rotates_during_render() {
        let mut host = host(SpriteConfig::new("TEST"));
        render_batch(&mut host, &BatchSettings::new("Rig", 1, 1)).unwrap();

        for (i, still) in host.stills().iter().enumerate() {
            let expected = ORIGINAL_ROTATION - FRAC_PI_4 * i as f64;
            assert!((still.rotations["Rig"] - expected).abs() < 1e-12);
            assert_eq!(still.rotations["Body"], 0.0);
            assert_eq!(still.frame, 1);
        }
    }

    #[test]
    fn test_output_path_prefix() {
        let mut host = host(SpriteConfig::new("TEST").no_rotation(true));
        let settings = BatchSettings::new("Rig", 1, 3).path("/tmp/out/");
        render_batch(&mut host, &settings).unwrap();
        assert_eq!(
            paths(&host),
            vec!["/tmp/out/TESTA0", "/tmp/out/TESTB0", "/tmp/out/TESTC0"]
        );
    }

    #[test]
    fn test_missing_target_aborts() {
        let mut host = host(SpriteConfig::new("TEST"));
        let mut controller = RunController::new(&mut host, BatchSettings::new("Nope", 1, 2));
        let err = controller.run().unwrap_err();
        assert!(matches!(err, RunError::TargetNotFound { .. }));
        assert_eq!(controller.phase(), RunPhase::Aborted);
        assert!(host.stills().is_empty());
    }

    #[test]
    fn test_frame_range_too_long_aborts() {
        let mut host = host(SpriteConfig::new("TEST"));
        let err = render_batch(&mut host, &BatchSettings::new("Rig", 1, 261)).unwrap_err();
        assert!(matches!(
            err,
            RunError::Sprite(SpriteError::FrameRangeTooLong { end_frame: 261 })
        ));
        assert!(host.stills().is_empty());
        assert_restored(&host, 1);
    }

    #[test]
    fn test_render_failure_restores_state() {
        let mut host = host(SpriteConfig::new("TEST"));
        host.fail_after(3);

        let mut controller = RunController::new(&mut host, BatchSettings::new("Rig", 1, 2));
        let err = controller.run().unwrap_err();
        assert!(matches!(err, RunError::RenderFailed { .. }));
        assert_eq!(controller.phase(), RunPhase::Aborted);

        assert_eq!(host.stills().len(), 3);
        assert_restored(&host, 1);
    }

    #[test]
    fn test_panic_restores_state() {
        struct PanickingHost(MemoryHost);

        impl Scene for PanickingHost {
            fn object_kind(&self, name: &str) -> Option<ObjectKind> {
                self.0.object_kind(name)
            }
            fn selected_objects(&self) -> Vec<String> {
                self.0.selected_objects()
            }
            fn rotation_z(&self, name: &str) -> Option<f64> {
                self.0.rotation_z(name)
            }
            fn set_rotation_z(&mut self, name: &str, radians: f64) {
                self.0.set_rotation_z(name, radians)
            }
            fn sprite_config(&self, name: &str) -> Option<SpriteConfig> {
                self.0.sprite_config(name)
            }
        }

        impl RenderBackend for PanickingHost {
            fn frame(&self) -> i32 {
                self.0.frame()
            }
            fn set_frame(&mut self, frame: i32) {
                self.0.set_frame(frame)
            }
            fn render_still(&mut self, _filepath: &str) -> RunResult<()> {
                panic!("renderer crashed");
            }
        }

        let mut host = PanickingHost(host(SpriteConfig::new("TEST")));
        let settings = BatchSettings::new("Rig", 4, 6);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            render_batch(&mut host, &settings)
        }));
        assert!(result.is_err());
        assert_restored(&host.0, 1);
    }

    #[test]
    fn test_non_mesh_selection_is_skipped() {
        let mut host = host(SpriteConfig::new("TEST").no_rotation(true))
            .with_object(SceneObject::new("Lamp", ObjectKind::Light).selected(true));
        let report = render_batch(&mut host, &BatchSettings::new("Rig", 1, 2)).unwrap();

        assert_eq!(report.shots, 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.objects[1].name, "Lamp");
        assert!(matches!(
            &report.objects[1].outcome,
            ObjectOutcome::Skipped { code, .. } if code == "RUN_002"
        ));
    }

    #[test]
    fn test_bad_sprite_name_fails_only_that_object() {
        let mut host = MemoryHost::new(1)
            .with_object(SceneObject::new("Rig", ObjectKind::Empty).sprite(SpriteConfig::new("TEST")))
            .with_object(
                SceneObject::new("Broken", ObjectKind::Mesh)
                    .selected(true)
                    .sprite(SpriteConfig::new("TOOLONG")),
            )
            .with_object(
                SceneObject::new("Body", ObjectKind::Mesh)
                    .selected(true)
                    .sprite(SpriteConfig::new("POSS")),
            );
        let report = render_batch(&mut host, &BatchSettings::new("Rig", 1, 1)).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.shots, 8);
        assert!(matches!(
            &report.objects[0].outcome,
            ObjectOutcome::Failed { code, .. } if code == "SPRITE_001"
        ));
        assert_eq!(paths(&host)[0], "POSSA1");
    }

    #[test]
    fn test_config_lost_mid_run_keeps_partial_shots() {
        let mut host = host(SpriteConfig::new("TEST"));
        host.remove_config_at("Rig", 2);
        let report = render_batch(&mut host, &BatchSettings::new("Rig", 1, 3)).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.shots, 8);
        assert_eq!(host.stills().len(), 8);
        assert!(matches!(
            &report.objects[0].outcome,
            ObjectOutcome::Failed { shots: 8, code, .. } if code == "RUN_003"
        ));
        assert_restored(&host, 1);
    }

    #[test]
    fn test_sprite_name_comes_from_selected_object() {
        let mut host = MemoryHost::new(1)
            .with_object(
                SceneObject::new("Rig", ObjectKind::Empty)
                    .sprite(SpriteConfig::new("RIGG").no_rotation(true)),
            )
            .with_object(
                SceneObject::new("Body", ObjectKind::Mesh)
                    .selected(true)
                    .sprite(SpriteConfig::new("BODY")),
            );
        render_batch(&mut host, &BatchSettings::new("Rig", 1, 1)).unwrap();
        assert_eq!(paths(&host), vec!["BODYA0"]);
    }

    #[test]
    fn test_flags_are_reread_every_frame() {
        let mut host = host(SpriteConfig::new("TEST"));
        host.schedule_config("Rig", 2, SpriteConfig::new("TEST").mirror(true));
        render_batch(&mut host, &BatchSettings::new("Rig", 1, 2)).unwrap();

        let frame_2: Vec<&str> = host
            .stills()
            .iter()
            .filter(|s| s.frame == 2)
            .map(|s| s.path.as_str())
            .collect();
        assert_eq!(host.stills().len(), 13);
        assert_eq!(frame_2, vec!["TESTB1", "TESTB2B8", "TESTB3B7", "TESTB4B6", "TESTB5"]);
    }

    #[test]
    fn test_cursor_is_restored_to_pre_run_frame() {
        let mut host = host(SpriteConfig::new("TEST").no_rotation(true));
        host.set_frame(40);
        render_batch(&mut host, &BatchSettings::new("Rig", 1, 30)).unwrap();
        assert_restored(&host, 40);
    }

    #[test]
    fn test_recorded_jobs() {
        let mut host = host(SpriteConfig::new("TEST").sixteen_angles(true).mirror(true));
        let report = RunController::new(&mut host, BatchSettings::new("Rig", 1, 1))
            .record_jobs(true)
            .run()
            .unwrap();
        assert_eq!(report.jobs.len(), 9);
        assert_eq!(report.jobs[1].filename, "TESTA9AG");

        let mut host = self::host(SpriteConfig::new("TEST"));
        let report = render_batch(&mut host, &BatchSettings::new("Rig", 1, 1)).unwrap();
        assert!(report.jobs.is_empty());
    }

    #[test]
    fn test_phase_completes() {
        let mut host = host(SpriteConfig::new("TEST"));
        let mut controller = RunController::new(&mut host, BatchSettings::new("Rig", 1, 1));
        assert_eq!(controller.phase(), RunPhase::Idle);
        controller.run().unwrap();
        assert_eq!(controller.phase(), RunPhase::Complete);
    }
}
