//! Events emitted by the simulation for notifications and visual feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

/// Gameplay events produced by systems during a frame.
///
/// The engine drains these after each controller step: kills feed the
/// score, player damage feeds the camera shake, and every event may turn
/// into a notification or a visual effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Damage applied to a unit.
    Hit {
        target: UnitId,
        team: Team,
        damage: f32,
        position: Vec3,
    },
    /// A blocking unit negated a hit.
    Blocked { target: UnitId, position: Vec3 },
    /// A unit's health reached zero.
    Killed {
        victim: UnitId,
        team: Team,
        class: UnitClass,
        position: Vec3,
    },
    /// The player took damage.
    PlayerDamaged { damage: f32 },
    /// The player activated an ability.
    AbilityUsed { ability: AbilityKind },
    /// Health restored to a unit.
    Healed { target: UnitId, amount: f32 },
    /// A corpse rose as an ally.
    Raised { unit: UnitId, class: UnitClass },
    /// A new endless-mode wave arrived.
    WaveStarted { wave: u32, enemies: u32 },
}

/// One-way visual notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualEffect {
    Blood { position: Vec3 },
    Sparks { position: Vec3 },
    Burst { position: Vec3, radius: f32 },
    Heal { position: Vec3 },
    /// Streak behind an in-flight projectile, sent on every render.
    Trail { from: Vec3, to: Vec3 },
}

/// Receiver for human-readable combat log lines.
///
/// The engine only ever calls `notify`; it never waits on or inspects
/// the sink.
pub trait EventSink {
    fn notify(&mut self, text: &str, severity: Severity);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _text: &str, _severity: Severity) {}
}
