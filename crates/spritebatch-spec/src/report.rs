//! Run reports.

use serde::{Deserialize, Serialize};

use crate::job::RenderJob;

/// What happened to one selected object during a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ObjectOutcome {
    /// The object's frames were rendered.
    Rendered { shots: usize },
    /// The object was skipped; the batch continued.
    Skipped { code: String, reason: String },
    /// The object's run stopped early after `shots` stills.
    Failed {
        #[serde(default)]
        shots: usize,
        code: String,
        reason: String,
    },
}

/// Per-object entry of a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: ObjectOutcome,
}

/// Summary of a batch render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Object rotated during the batch.
    pub target: String,
    /// Total number of stills rendered across all objects.
    pub shots: usize,
    /// Per-object outcomes in selection order.
    pub objects: Vec<ObjectReport>,
    /// Every job handed to the renderer, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<RenderJob>,
}

impl RunReport {
    /// Creates an empty report for a target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Records an object outcome, adding its shots to the total.
    pub fn push(&mut self, name: impl Into<String>, outcome: ObjectOutcome) {
        match outcome {
            ObjectOutcome::Rendered { shots } | ObjectOutcome::Failed { shots, .. } => {
                self.shots += shots;
            }
            ObjectOutcome::Skipped { .. } => {}
        }
        self.objects.push(ObjectReport {
            name: name.into(),
            outcome,
        });
    }

    /// Returns true if no object failed.
    pub fn is_ok(&self) -> bool {
        !self
            .objects
            .iter()
            .any(|o| matches!(o.outcome, ObjectOutcome::Failed { .. }))
    }

    /// Number of objects that were skipped.
    pub fn skipped_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| matches!(o.outcome, ObjectOutcome::Skipped { .. }))
            .count()
    }
}
