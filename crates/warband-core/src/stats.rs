//! Class stat table.
//!
//! Consolidates per-class parameters for the spawner, the player
//! controller and the ability system. Read-only configuration.

use crate::constants::{ARROW_SPEED, BOLT_SPEED, MAX_LEVEL};
use crate::enums::{AbilityKind, AttackType, DashKind, UnitClass};

/// Base stats for a class at a level, before per-unit variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStats {
    pub max_health: f32,
    /// Ground speed (m/s).
    pub speed: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    pub attack_type: AttackType,
    /// Melee reach or ranged engagement distance (m).
    pub range: f32,
    pub attack_duration: f32,
    pub cooldown_min: f32,
    pub cooldown_max: f32,
    /// Launch speed of the basic projectile (ranged classes only).
    pub projectile_speed: f32,
    pub dash: DashKind,
    pub dash_cooldown: f32,
    pub ability: AbilityKind,
    pub ability_cost: f32,
    pub ability_cooldown: f32,
    /// Ability damage band (heal amount for `Sanctuary`).
    pub ability_power_min: f32,
    pub ability_power_max: f32,
}

/// Look up the stats for `class` at `level` (clamped to 1..=MAX_LEVEL).
///
/// Health grows 12 % and damage 8 % per level above 1.
pub fn class_stats(class: UnitClass, level: u8) -> ClassStats {
    let base = base_stats(class);
    let steps = f32::from(level.clamp(1, MAX_LEVEL) - 1);
    let health_scale = 1.0 + 0.12 * steps;
    let damage_scale = 1.0 + 0.08 * steps;

    ClassStats {
        max_health: base.max_health * health_scale,
        damage_min: base.damage_min * damage_scale,
        damage_max: base.damage_max * damage_scale,
        ability_power_min: base.ability_power_min * damage_scale,
        ability_power_max: base.ability_power_max * damage_scale,
        ..base
    }
}

fn base_stats(class: UnitClass) -> ClassStats {
    match class {
        UnitClass::Warrior => ClassStats {
            max_health: 120.0,
            speed: 5.0,
            damage_min: 20.0,
            damage_max: 35.0,
            attack_type: AttackType::Melee,
            range: 2.2,
            attack_duration: 0.5,
            cooldown_min: 1.0,
            cooldown_max: 1.5,
            projectile_speed: 0.0,
            dash: DashKind::Leap,
            dash_cooldown: 4.0,
            ability: AbilityKind::GroundSlam,
            ability_cost: 30.0,
            ability_cooldown: 10.0,
            ability_power_min: 15.0,
            ability_power_max: 25.0,
        },
        UnitClass::Knight => ClassStats {
            max_health: 150.0,
            speed: 4.2,
            damage_min: 15.0,
            damage_max: 25.0,
            attack_type: AttackType::Melee,
            range: 2.0,
            attack_duration: 0.6,
            cooldown_min: 1.2,
            cooldown_max: 1.8,
            projectile_speed: 0.0,
            dash: DashKind::Charge,
            dash_cooldown: 5.0,
            ability: AbilityKind::ShieldBash,
            ability_cost: 25.0,
            ability_cooldown: 8.0,
            ability_power_min: 10.0,
            ability_power_max: 18.0,
        },
        UnitClass::Archer => ClassStats {
            max_health: 80.0,
            speed: 5.2,
            damage_min: 12.0,
            damage_max: 20.0,
            attack_type: AttackType::Ranged,
            range: 18.0,
            attack_duration: 0.7,
            cooldown_min: 1.4,
            cooldown_max: 2.0,
            projectile_speed: ARROW_SPEED,
            dash: DashKind::Roll,
            dash_cooldown: 3.0,
            ability: AbilityKind::Volley,
            ability_cost: 30.0,
            ability_cooldown: 9.0,
            ability_power_min: 12.0,
            ability_power_max: 20.0,
        },
        UnitClass::Mage => ClassStats {
            max_health: 70.0,
            speed: 4.8,
            damage_min: 18.0,
            damage_max: 28.0,
            attack_type: AttackType::Ranged,
            range: 16.0,
            attack_duration: 0.9,
            cooldown_min: 1.8,
            cooldown_max: 2.6,
            projectile_speed: BOLT_SPEED,
            dash: DashKind::Teleport,
            dash_cooldown: 5.0,
            ability: AbilityKind::Meteor,
            ability_cost: 40.0,
            ability_cooldown: 12.0,
            ability_power_min: 30.0,
            ability_power_max: 45.0,
        },
        UnitClass::Cleric => ClassStats {
            max_health: 95.0,
            speed: 4.6,
            damage_min: 10.0,
            damage_max: 18.0,
            attack_type: AttackType::Melee,
            range: 2.0,
            attack_duration: 0.6,
            cooldown_min: 1.2,
            cooldown_max: 1.7,
            projectile_speed: 0.0,
            dash: DashKind::Roll,
            dash_cooldown: 3.0,
            ability: AbilityKind::Sanctuary,
            ability_cost: 35.0,
            ability_cooldown: 14.0,
            ability_power_min: 35.0,
            ability_power_max: 35.0,
        },
        UnitClass::Rogue => ClassStats {
            max_health: 85.0,
            speed: 6.0,
            damage_min: 14.0,
            damage_max: 24.0,
            attack_type: AttackType::Melee,
            range: 1.8,
            attack_duration: 0.35,
            cooldown_min: 0.7,
            cooldown_max: 1.1,
            projectile_speed: 0.0,
            dash: DashKind::Roll,
            dash_cooldown: 2.5,
            ability: AbilityKind::Vanish,
            ability_cost: 25.0,
            ability_cooldown: 12.0,
            ability_power_min: 0.0,
            ability_power_max: 0.0,
        },
        UnitClass::Necromancer => ClassStats {
            max_health: 75.0,
            speed: 4.5,
            damage_min: 14.0,
            damage_max: 22.0,
            attack_type: AttackType::Ranged,
            range: 15.0,
            attack_duration: 0.8,
            cooldown_min: 1.6,
            cooldown_max: 2.4,
            projectile_speed: BOLT_SPEED,
            dash: DashKind::Teleport,
            dash_cooldown: 5.0,
            ability: AbilityKind::RaiseDead,
            ability_cost: 45.0,
            ability_cooldown: 16.0,
            ability_power_min: 0.0,
            ability_power_max: 0.0,
        },
    }
}
