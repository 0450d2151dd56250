//! Movement decisions for AI units.
//!
//! Pure functions that turn a unit's situation (its position, its target,
//! how it attacks) into a desired direction and speed multiplier.

use glam::Vec3;

use warband_core::constants::*;
use warband_core::enums::AttackType;
use warband_core::types::{ground_direction, ground_distance};

/// Input to the steering decision for one unit.
pub struct SteeringContext {
    pub position: Vec3,
    pub target: Vec3,
    pub attack_type: AttackType,
    pub range: f32,
    /// +1 or -1, from the unit's strafe memory.
    pub strafe_dir: f32,
}

/// What the unit is trying to do with its feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    /// Closing distance.
    Approach,
    /// Backing away (ranged units too close).
    Retreat,
    /// Circling the target.
    Strafe,
    /// Nothing to do.
    Hold,
}

/// Output of the steering decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Ground-plane direction, unit length or zero.
    pub direction: Vec3,
    /// Multiplier on the unit's base speed.
    pub speed_mult: f32,
    pub intent: MoveIntent,
}

impl Steering {
    pub const HOLD: Steering = Steering {
        direction: Vec3::ZERO,
        speed_mult: 0.0,
        intent: MoveIntent::Hold,
    };
}

/// Decide how a unit moves relative to its target.
pub fn steer(ctx: &SteeringContext) -> Steering {
    let distance = ground_distance(ctx.position, ctx.target);
    let to_target = ground_direction(ctx.position, ctx.target);
    if to_target == Vec3::ZERO {
        return Steering::HOLD;
    }
    // Perpendicular to the line of fire.
    let side = Vec3::new(-to_target.z, 0.0, to_target.x) * ctx.strafe_dir.signum();

    match ctx.attack_type {
        AttackType::Ranged => steer_ranged(ctx, distance, to_target, side),
        AttackType::Melee => steer_melee(ctx, distance, to_target, side),
    }
}

fn steer_ranged(ctx: &SteeringContext, distance: f32, to_target: Vec3, side: Vec3) -> Steering {
    if distance < RANGED_MIN_DISTANCE {
        return Steering {
            direction: -to_target,
            speed_mult: 1.0,
            intent: MoveIntent::Retreat,
        };
    }
    if distance > ctx.range * RANGED_ENGAGE_FRACTION {
        return Steering {
            direction: to_target,
            speed_mult: 1.0,
            intent: MoveIntent::Approach,
        };
    }
    Steering {
        direction: side,
        speed_mult: 0.6,
        intent: MoveIntent::Strafe,
    }
}

fn steer_melee(ctx: &SteeringContext, distance: f32, to_target: Vec3, side: Vec3) -> Steering {
    if distance > ctx.range {
        let speed_mult = if distance > CHARGE_DISTANCE {
            CHARGE_SPEED_MULT
        } else {
            1.0
        };
        return Steering {
            direction: to_target,
            speed_mult,
            intent: MoveIntent::Approach,
        };
    }

    // In reach: circle while leaning in, but stop pressing once close.
    let pressure = if distance > ctx.range * 0.6 {
        MELEE_PRESSURE_WEIGHT
    } else {
        0.0
    };
    let direction = (side * MELEE_STRAFE_WEIGHT + to_target * pressure).normalize_or_zero();
    Steering {
        direction,
        speed_mult: 0.5,
        intent: MoveIntent::Strafe,
    }
}

/// Steering toward a follow slot; holds once inside the tolerance.
pub fn follow_slot(position: Vec3, slot: Vec3) -> Steering {
    let distance = ground_distance(position, slot);
    if distance <= FOLLOW_SLOT_TOLERANCE {
        return Steering::HOLD;
    }
    // Hurry when far behind.
    let speed_mult = if distance > CHARGE_DISTANCE {
        CHARGE_SPEED_MULT
    } else {
        1.0
    };
    Steering {
        direction: ground_direction(position, slot),
        speed_mult,
        intent: MoveIntent::Approach,
    }
}
