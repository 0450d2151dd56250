//! Orbit camera: mouse/wheel input, smoothed follow, first-person
//! toggle and damage shake.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warband_core::constants::*;
use warband_core::types::wrap_angle;

use crate::game_state::CameraRig;

/// Apply this frame's accumulated mouse and wheel deltas.
pub fn apply_input(rig: &mut CameraRig, mouse: Vec2, wheel: f32) {
    rig.yaw = wrap_angle(rig.yaw + mouse.x * MOUSE_SENSITIVITY);
    rig.pitch = (rig.pitch + mouse.y * MOUSE_SENSITIVITY).clamp(CAMERA_MIN_PITCH, CAMERA_MAX_PITCH);
    rig.distance =
        (rig.distance + wheel * WHEEL_SENSITIVITY).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
}

/// Kick the shake amplitude proportionally to damage taken.
pub fn add_shake(rig: &mut CameraRig, damage: f32) {
    rig.shake = (rig.shake + damage.max(0.0) * SHAKE_PER_DAMAGE).min(SHAKE_MAX);
}

/// Ground-plane forward for camera-relative movement.
pub fn forward(rig: &CameraRig) -> Vec3 {
    Vec3::new(rig.yaw.sin(), 0.0, rig.yaw.cos())
}

/// Ground-plane right for camera-relative movement.
pub fn right(rig: &CameraRig) -> Vec3 {
    Vec3::new(rig.yaw.cos(), 0.0, -rig.yaw.sin())
}

/// Move the camera toward its ideal placement around `target`.
pub fn follow(rig: &mut CameraRig, rng: &mut ChaCha8Rng, target: Vec3, dt: f32) {
    let eye = target + Vec3::Y * CAMERA_EYE_HEIGHT;
    let look = Vec3::new(
        rig.yaw.sin() * rig.pitch.cos(),
        -rig.pitch.sin(),
        rig.yaw.cos() * rig.pitch.cos(),
    );

    if rig.first_person {
        rig.position = eye;
        rig.look_at = eye + look;
    } else {
        let desired = eye - look * rig.distance;
        let t = (CAMERA_FOLLOW_RATE * dt).min(1.0);
        rig.position = rig.position.lerp(desired, t);
        rig.look_at = rig.look_at.lerp(eye, t);
    }

    rig.shake *= (-SHAKE_DECAY * dt).exp();
    if rig.shake < 1e-3 {
        rig.shake = 0.0;
        rig.shake_offset = Vec3::ZERO;
    } else {
        rig.shake_offset = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        ) * rig.shake;
    }
}
