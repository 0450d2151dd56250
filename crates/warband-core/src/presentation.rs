//! Boundary to the scene / rendering layer.
//!
//! The core joins each unit's `Transform` and `Pose` at render time and
//! pushes them out through this trait. Calls are one-way; a failure to
//! apply a pose skips that unit's visual update and nothing else.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Pose;
use crate::events::VisualEffect;
use crate::types::{Transform, UnitId};

/// Camera placement computed by the player controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub look_at: Vec3,
    pub first_person: bool,
}

/// Errors a presentation layer may report back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresentationError {
    #[error("no skeleton handle for unit {0:?}")]
    MissingHandle(UnitId),
    #[error("presentation layer unavailable: {0}")]
    Unavailable(String),
}

/// Scene collaborator driven by the engine's `render` step.
pub trait Presentation {
    /// Pose one unit's skeleton.
    fn apply_pose(
        &mut self,
        unit: UnitId,
        transform: &Transform,
        pose: &Pose,
    ) -> Result<(), PresentationError>;

    /// Run a visual-only effect.
    fn play_effect(&mut self, effect: &VisualEffect);

    /// Place the camera.
    fn update_camera(&mut self, camera: &CameraView);
}
