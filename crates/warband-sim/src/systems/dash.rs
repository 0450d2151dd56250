//! Class dashes: leap, shield charge, roll and teleport.

use glam::Vec3;
use hecs::{Entity, World};
use log::debug;
use rand_chacha::ChaCha8Rng;

use warband_core::components::Health;
use warband_core::constants::*;
use warband_core::enums::{DashKind, Team};
use warband_core::events::CombatEvent;
use warband_core::stats::ClassStats;
use warband_core::types::Transform;

use crate::combat::{self, RangedStrike};
use crate::game_state::{DashState, GameState};

/// Whether a dash may start now.
pub fn ready(state: &GameState) -> bool {
    state.dash.is_none() && state.dash_cooldown <= 0.0 && state.stamina >= DASH_STAMINA_COST
}

/// Start the class dash toward `direction` (ground plane, unit length).
pub fn start(
    world: &mut World,
    state: &mut GameState,
    player: Entity,
    stats: &ClassStats,
    direction: Vec3,
) {
    state.stamina -= DASH_STAMINA_COST;
    state.dash_cooldown = stats.dash_cooldown;

    let (speed, duration) = match stats.dash {
        DashKind::Leap => (LEAP_SPEED, LEAP_DURATION_SECS),
        DashKind::Charge => (CHARGE_DASH_SPEED, CHARGE_DASH_DURATION_SECS),
        DashKind::Roll => (ROLL_SPEED, ROLL_DURATION_SECS),
        DashKind::Teleport => {
            if let Ok(mut query) = world.query_one::<(&mut Transform, &mut Health)>(player) {
                if let Some((transform, health)) = query.get() {
                    let target = transform.position + direction * TELEPORT_DISTANCE;
                    transform.position = clamp_player(target);
                    health.invulnerable_secs =
                        health.invulnerable_secs.max(TELEPORT_INVULNERABLE_SECS);
                }
            }
            debug!("player teleported");
            return;
        }
    };

    match stats.dash {
        DashKind::Leap => {
            // Airtime matches the dash so the landing coincides with touchdown.
            state.vertical_velocity = GRAVITY * duration * 0.5;
            state.grounded = false;
        }
        DashKind::Roll => {
            if let Ok(mut health) = world.get::<&mut Health>(player) {
                health.invulnerable_secs = health.invulnerable_secs.max(duration);
            }
        }
        _ => {}
    }

    state.dash = Some(DashState {
        kind: stats.dash,
        direction,
        speed,
        remaining: duration,
        struck: Vec::new(),
    });
    debug!("player dash {:?}", stats.dash);
}

/// Advance an active dash. Returns true while the dash owns movement.
pub fn update(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    player: Entity,
    stats: &ClassStats,
    dt: f32,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let Some(mut dash) = state.dash.take() else {
        return false;
    };

    let position = match world.get::<&mut Transform>(player) {
        Ok(mut transform) => {
            transform.position =
                clamp_player(transform.position + dash.direction * dash.speed * dt);
            transform.position
        }
        Err(_) => return false,
    };
    dash.remaining -= dt;

    match dash.kind {
        DashKind::Charge => {
            let hits = combat::resolve_area(
                world,
                rng,
                &RangedStrike {
                    attacker_team: Team::Player,
                    position,
                    radius: CHARGE_DASH_HIT_RADIUS,
                    damage_min: stats.ability_power_min,
                    damage_max: stats.ability_power_max,
                    block_chance: MELEE_BLOCK_CHANCE,
                    stun_secs: CHARGE_DASH_STUN_SECS,
                    already_hit: &dash.struck,
                    ..Default::default()
                },
                events,
            );
            dash.struck.extend(hits.iter().map(|h| h.target));
        }
        DashKind::Leap if dash.remaining <= 0.0 => {
            combat::resolve_area(
                world,
                rng,
                &RangedStrike {
                    attacker_team: Team::Player,
                    position,
                    radius: LEAP_LANDING_RADIUS,
                    damage_min: stats.damage_min * 0.5,
                    damage_max: stats.damage_max * 0.5,
                    ..Default::default()
                },
                events,
            );
        }
        _ => {}
    }

    if dash.remaining > 0.0 {
        state.dash = Some(dash);
    }
    true
}

/// Keep the player inside the arena without pinning height.
pub fn clamp_player(position: Vec3) -> Vec3 {
    Vec3::new(
        position.x.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE),
        position.y.max(GROUND_Y),
        position.z.clamp(-ARENA_HALF_SIZE, ARENA_HALF_SIZE),
    )
}
