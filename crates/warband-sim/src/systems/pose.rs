//! Pose system: derives each unit's animation pose from its movement and
//! behaviour state. Combat logic never reads the result.

use std::f32::consts::FRAC_PI_2;

use hecs::World;

use warband_ai::attack::phase;

use warband_core::components::{Pose, UnitState};
use warband_core::constants::{HIT_WINDOW_END, HIT_WINDOW_START};
use warband_core::enums::AttackPhase;
use warband_core::types::{ground_distance, Transform};

/// Walk-cycle radians per meter travelled.
const STRIDE_RATE: f32 = 2.2;
/// Ground speed at which the leg swing reaches full amplitude.
const FULL_STRIDE_SPEED: f32 = 4.0;

pub fn run(world: &mut World, dt: f32) {
    if dt <= 0.0 {
        return;
    }
    for (_, (transform, state, pose)) in world.query_mut::<(&Transform, &UnitState, &mut Pose)>() {
        let moved = ground_distance(pose.last_position, transform.position);
        let speed = moved / dt;
        pose.last_position = transform.position;

        if let UnitState::Dead { elapsed } = state {
            // Topple over during the first half second.
            pose.torso_lean = FRAC_PI_2 * (elapsed / 0.5).min(1.0);
            pose.leg_swing = 0.0;
            pose.arm_swing = 0.0;
            pose.guard_raised = false;
            continue;
        }

        pose.walk_cycle = (pose.walk_cycle + moved * STRIDE_RATE) % std::f32::consts::TAU;
        let stride = (speed / FULL_STRIDE_SPEED).min(1.0);
        pose.leg_swing = pose.walk_cycle.sin() * 0.6 * stride;
        pose.torso_lean = 0.15 * stride;
        pose.guard_raised = state.is_blocking();
        pose.head_pitch = if state.is_stunned() { 0.4 } else { 0.0 };

        pose.arm_swing = match state.attack_progress() {
            Some(progress) => match phase(progress) {
                AttackPhase::Windup => -1.2 * (progress / HIT_WINDOW_START),
                AttackPhase::Strike => {
                    let t = (progress - HIT_WINDOW_START) / (HIT_WINDOW_END - HIT_WINDOW_START);
                    -1.2 + 2.4 * t.min(1.0)
                }
                AttackPhase::Recovery => {
                    1.2 * (1.0 - (progress - HIT_WINDOW_END) / (1.0 - HIT_WINDOW_END))
                }
            },
            None => -pose.leg_swing * 0.5,
        };
    }
}
