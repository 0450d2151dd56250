//! Class abilities: activation, cooldown and buff timers, and ability
//! projectiles.
//!
//! Activation is all-or-nothing. An ability that cannot fire (cooldown,
//! stamina, dead hero, no valid target) changes nothing.

use glam::{Quat, Vec3};
use hecs::{Entity, World};
use log::{debug, info};
use rand_chacha::ChaCha8Rng;

use warband_core::components::{Health, Projectile, Summoned, Unit, UnitState};
use warband_core::constants::*;
use warband_core::enums::{AbilityKind, ProjectileSource, Team};
use warband_core::events::CombatEvent;
use warband_core::stats::{class_stats, ClassStats};
use warband_core::types::{ground_distance, Transform};

use crate::combat::{self, unit_id, RangedStrike};
use crate::game_state::{GameState, NextHitBuff};
use crate::systems::{projectiles, spawner};

/// Try to fire the hero's class ability. Returns false, with no side
/// effects, when it cannot fire.
pub fn try_activate(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    player: Entity,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let stats = class_stats(state.player_class, state.player_level);
    if state.over || state.ability_cooldown > 0.0 || state.stamina < stats.ability_cost {
        debug!(
            "{:?} not ready (cooldown {:.1}s, stamina {:.0})",
            stats.ability, state.ability_cooldown, state.stamina
        );
        return false;
    }

    let (position, facing) = {
        let Ok(mut query) = world.query_one::<(&Transform, &Health)>(player) else {
            return false;
        };
        match query.get() {
            Some((transform, health)) if health.is_alive() => {
                (transform.position, transform.facing())
            }
            _ => return false,
        }
    };

    let fired = match stats.ability {
        AbilityKind::GroundSlam => {
            blast(world, rng, &stats, position, GROUND_SLAM_RADIUS, GROUND_SLAM_STUN_SECS, events);
            true
        }
        AbilityKind::ShieldBash => {
            let center = position + facing * (SHIELD_BASH_RADIUS * 0.5);
            blast(world, rng, &stats, center, SHIELD_BASH_RADIUS, SHIELD_BASH_STUN_SECS, events);
            true
        }
        AbilityKind::Meteor => {
            let center = position + facing * METEOR_RANGE;
            blast(world, rng, &stats, center, METEOR_RADIUS, HIT_STUN_SECS, events);
            true
        }
        AbilityKind::Volley => {
            volley(world, &stats, state, position, facing);
            true
        }
        AbilityKind::Sanctuary => {
            sanctuary(world, &stats, position, events);
            true
        }
        AbilityKind::Vanish => {
            state.stealth_secs = VANISH_STEALTH_SECS;
            state.buff = Some(NextHitBuff {
                multiplier: BACKSTAB_MULTIPLIER,
                remaining: BACKSTAB_BUFF_SECS,
            });
            true
        }
        AbilityKind::RaiseDead => raise_dead(world, position, events),
    };

    if !fired {
        debug!("{:?} found nothing to act on", stats.ability);
        return false;
    }

    state.stamina -= stats.ability_cost;
    state.ability_cooldown = stats.ability_cooldown;
    events.push(CombatEvent::AbilityUsed {
        ability: stats.ability,
    });
    info!("player used {:?}", stats.ability);
    true
}

/// Tick ability timers and fly ability projectiles.
pub fn update(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    dt: f32,
    events: &mut Vec<CombatEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    state.ability_cooldown = (state.ability_cooldown - dt).max(0.0);
    state.stealth_secs = (state.stealth_secs - dt).max(0.0);
    if let Some(buff) = &mut state.buff {
        buff.remaining -= dt;
        if buff.remaining <= 0.0 {
            state.buff = None;
        }
    }
    projectiles::advance(world, rng, ProjectileSource::Ability, dt, events, despawn_buffer);
}

fn blast(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    stats: &ClassStats,
    center: Vec3,
    radius: f32,
    stun_secs: f32,
    events: &mut Vec<CombatEvent>,
) {
    let hits = combat::resolve_area(
        world,
        rng,
        &RangedStrike {
            attacker_team: Team::Player,
            position: center,
            radius,
            damage_min: stats.ability_power_min,
            damage_max: stats.ability_power_max,
            stun_secs,
            knockback: KNOCKBACK_DISTANCE * 2.0,
            ..Default::default()
        },
        events,
    );
    debug!("{:?} struck {} unit(s)", stats.ability, hits.len());
}

fn volley(world: &mut World, stats: &ClassStats, state: &GameState, position: Vec3, facing: Vec3) {
    let count = VOLLEY_ARROWS.max(1);
    let step = if count > 1 {
        VOLLEY_FAN_RADIANS / (count - 1) as f32
    } else {
        0.0
    };
    for i in 0..count {
        let angle = -VOLLEY_FAN_RADIANS * 0.5 + step * i as f32;
        let direction = Quat::from_rotation_y(angle) * facing;
        projectiles::spawn(
            world,
            position + direction * 0.5,
            Projectile {
                source: ProjectileSource::Ability,
                team: Team::Player,
                class: state.player_class,
                velocity: direction * ARROW_SPEED,
                lifetime: PROJECTILE_LIFETIME_SECS,
                damage_min: stats.ability_power_min,
                damage_max: stats.ability_power_max,
                multiplier: 1.0,
                splash_radius: 0.0,
                block_chance: RANGED_BLOCK_CHANCE,
            },
        );
    }
}

fn sanctuary(world: &mut World, stats: &ClassStats, center: Vec3, events: &mut Vec<CombatEvent>) {
    let amount = stats.ability_power_max;
    for (entity, (unit, transform, health, state)) in
        world.query_mut::<(&Unit, &Transform, &mut Health, &UnitState)>()
    {
        if unit.team == Team::Enemy || !health.is_alive() || state.is_dead() {
            continue;
        }
        if ground_distance(center, transform.position) > SANCTUARY_RADIUS {
            continue;
        }
        let before = health.current;
        health.current = (health.current + amount).min(health.max);
        let healed = health.current - before;
        if healed > 0.0 {
            events.push(CombatEvent::Healed {
                target: unit_id(entity),
                amount: healed,
            });
        }
    }
}

/// Raise up to `RAISE_DEAD_MAX` enemy corpses near `center` as allies.
/// Returns false when there is nothing to raise.
fn raise_dead(world: &mut World, center: Vec3, events: &mut Vec<CombatEvent>) -> bool {
    let mut corpses: Vec<(Entity, f32)> = world
        .query::<(&Unit, &Transform, &UnitState)>()
        .iter()
        .filter(|(_, (unit, _, state))| unit.team == Team::Enemy && state.is_dead())
        .map(|(e, (_, transform, _))| (e, ground_distance(center, transform.position)))
        .filter(|(_, d)| *d <= RAISE_DEAD_RADIUS)
        .collect();
    if corpses.is_empty() {
        return false;
    }
    corpses.sort_by(|a, b| a.1.total_cmp(&b.1));
    corpses.truncate(RAISE_DEAD_MAX);

    for (entity, _) in corpses {
        let class = {
            let Ok(mut query) = world.query_one::<(&mut Unit, &mut Health, &mut UnitState)>(entity)
            else {
                continue;
            };
            let Some((unit, health, state)) = query.get() else {
                continue;
            };
            unit.team = Team::Ally;
            health.current = (health.max * 0.5).max(1.0);
            health.invulnerable_secs = 0.0;
            *state = UnitState::Idle;
            unit.class
        };
        let _ = world.insert_one(entity, Summoned);
        events.push(CombatEvent::Raised {
            unit: unit_id(entity),
            class,
        });
    }
    spawner::assign_follow_slots(world);
    true
}
