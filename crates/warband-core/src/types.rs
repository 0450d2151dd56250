//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space placement of a unit or projectile.
/// y = Up (ground at 0), yaw 0 faces +z, positive yaw turns toward +x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Heading in radians.
    pub yaw: f32,
}

/// Stable identifier for a unit at the presentation boundary.
///
/// Produced from the simulation's generation-tagged entity handle, so an id
/// is never reused for a different unit while the old one is still known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// Simulation time tracking for a variable-step loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated.
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Transform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Unit vector the transform is facing, on the ground plane.
    pub fn facing(&self) -> Vec3 {
        facing_from_yaw(self.yaw)
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Facing vector for a yaw angle.
pub fn facing_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw that points from `from` toward `to` on the ground plane.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    dx.atan2(dz)
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU);
    wrapped - std::f32::consts::PI
}

/// Distance between two points on the ground plane.
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Flattened, normalized direction from `from` to `to` (zero if coincident).
pub fn ground_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero()
}

/// Clamp a position into the square arena and pin it to the ground.
pub fn clamp_to_arena(position: Vec3) -> Vec3 {
    let half = crate::constants::ARENA_HALF_SIZE;
    Vec3::new(
        position.x.clamp(-half, half),
        crate::constants::GROUND_Y,
        position.z.clamp(-half, half),
    )
}
