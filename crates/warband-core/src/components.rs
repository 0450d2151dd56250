//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems,
//! not components; the few helpers here only answer questions about
//! the data itself.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

/// Identity of a combatant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    pub team: Team,
    pub class: UnitClass,
    pub level: u8,
}

/// Hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// While positive, incoming damage is ignored (dash i-frames).
    pub invulnerable_secs: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            invulnerable_secs: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }
}

/// Derived combat stats plus the attack cooldown timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combat {
    pub attack_type: AttackType,
    /// Reach for melee, preferred engagement distance for ranged (meters).
    pub range: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    /// Length of one swing / draw (seconds).
    pub attack_duration: f32,
    /// Cooldown band: each new attack rolls its cooldown inside it.
    pub cooldown_min: f32,
    pub cooldown_max: f32,
    /// Seconds until the next attack may start.
    pub attack_timer: f32,
    /// Ground speed (m/s).
    pub speed: f32,
}

/// Explicit per-unit behaviour state.
///
/// The per-swing hit flag lives inside `Attacking`, so a swing can never
/// inherit a stale flag from the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum UnitState {
    #[default]
    Idle,
    Approaching,
    Strafing,
    Attacking {
        elapsed: f32,
        duration: f32,
        /// Melee: damage was applied. Ranged: the projectile was released.
        hit_landed: bool,
    },
    Stunned {
        remaining: f32,
    },
    Blocking {
        remaining: f32,
    },
    Dead {
        /// Seconds since death; the cleanup sweep removes old corpses.
        elapsed: f32,
    },
}

impl UnitState {
    pub fn is_dead(&self) -> bool {
        matches!(self, UnitState::Dead { .. })
    }

    pub fn is_stunned(&self) -> bool {
        matches!(self, UnitState::Stunned { .. })
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, UnitState::Blocking { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self, UnitState::Attacking { .. })
    }

    /// Normalized swing progress (0..1) while attacking.
    pub fn attack_progress(&self) -> Option<f32> {
        match *self {
            UnitState::Attacking {
                elapsed, duration, ..
            } => Some(if duration > 0.0 {
                (elapsed / duration).clamp(0.0, 1.0)
            } else {
                1.0
            }),
            _ => None,
        }
    }
}

/// AI bookkeeping: strafing and periodic behaviour changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AiMemory {
    /// +1 or -1: which side of the line of fire to strafe toward.
    pub strafe_dir: f32,
    /// Seconds until the strafe direction flips.
    pub strafe_timer: f32,
    /// Seconds the current target is kept before the nearest is re-picked.
    pub retarget_timer: f32,
    /// Target held since the last re-pick.
    pub target: Option<UnitId>,
    /// Slot offset behind the player when following.
    pub follow_offset: Vec3,
}

impl Default for AiMemory {
    fn default() -> Self {
        Self {
            strafe_dir: 1.0,
            strafe_timer: 2.0,
            retarget_timer: 0.0,
            target: None,
            follow_offset: Vec3::ZERO,
        }
    }
}

/// Presentation-facing animation pose, keyed by the same entity as the
/// combat record. Written by the pose system, never read by combat logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Phase of the walk cycle (radians).
    pub walk_cycle: f32,
    /// Leg swing angle (radians).
    pub leg_swing: f32,
    /// Weapon arm angle (radians).
    pub arm_swing: f32,
    /// Forward torso lean (radians).
    pub torso_lean: f32,
    /// Head pitch (radians).
    pub head_pitch: f32,
    /// Shield / guard raised.
    pub guard_raised: bool,
    /// Position at the previous pose update, for walk speed.
    pub last_position: Vec3,
}

/// Transient arrow, bolt or spell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub source: ProjectileSource,
    /// Team of the shooter; only hostile units can be hit.
    pub team: Team,
    /// Class of the shooter (speed / visual lookup).
    pub class: UnitClass,
    pub velocity: Vec3,
    /// Seconds left before the projectile fizzles.
    pub lifetime: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    pub multiplier: f32,
    /// Zero for single-target, positive for an area burst on contact.
    pub splash_radius: f32,
    /// Chance a blocking target negates this projectile.
    pub block_chance: f64,
}

/// Marks units that can raise a shield.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shielded;

/// Marks allies raised from enemy corpses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summoned;
