//! Projectile aim with distance-dependent spread.

use glam::Vec3;
use rand::Rng;

use warband_core::constants::{AIM_SPREAD_BASE, AIM_SPREAD_PER_METER};
use warband_core::types::{facing_from_yaw, ground_distance, yaw_towards};

/// Angular spread (radians, half-width) for a shot over `distance` meters.
pub fn spread_for_distance(distance: f32) -> f32 {
    AIM_SPREAD_BASE + AIM_SPREAD_PER_METER * distance.max(0.0)
}

/// Flat launch velocity toward `to`, perturbed by a random yaw offset that
/// widens with distance.
pub fn aim_velocity<R: Rng + ?Sized>(rng: &mut R, from: Vec3, to: Vec3, speed: f32) -> Vec3 {
    let spread = spread_for_distance(ground_distance(from, to));
    let yaw = yaw_towards(from, to) + rng.gen_range(-spread..=spread);
    facing_from_yaw(yaw) * speed
}
