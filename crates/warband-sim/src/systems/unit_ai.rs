//! Per-unit AI shared by the friendly and hostile passes.
//!
//! One pass walks every live unit of a team: timers, target selection,
//! steering, blocking, attack progress and movement. Positions are kept
//! in a roster snapshot that is updated as units move, so later units in
//! the pass see where earlier ones went this frame.

use std::collections::HashMap;

use glam::{Quat, Vec3};
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warband_ai::aim::aim_velocity;
use warband_ai::attack::{can_start, in_strike_window};
use warband_ai::separation::separation_push;
use warband_ai::steering::{follow_slot, steer, MoveIntent, Steering, SteeringContext};
use warband_ai::targeting::nearest;
use warband_ai::turning::turn_towards;

use warband_core::components::*;
use warband_core::constants::*;
use warband_core::enums::{AllyCommand, AttackType, ProjectileSource, Team, UnitClass};
use warband_core::events::CombatEvent;
use warband_core::stats::class_stats;
use warband_core::types::{clamp_to_arena, facing_from_yaw, ground_distance, yaw_towards, Transform};

use crate::combat::{self, unit_id, MeleeStrike};
use crate::systems::projectiles;

/// Inputs for one AI pass.
#[derive(Debug, Clone, Copy)]
pub struct AiPass {
    /// Team whose units act in this pass.
    pub team: Team,
    pub dt: f32,
    /// Player entity, if spawned.
    pub player: Option<Entity>,
    /// False while the player is stealthed (hostile pass only).
    pub player_targetable: bool,
    /// Order for friendly units; ignored by the hostile pass.
    pub ally_command: AllyCommand,
}

#[derive(Debug, Clone, Copy)]
struct Sighting {
    entity: Entity,
    team: Team,
    position: Vec3,
    yaw: f32,
    alive: bool,
}

/// Action decided for a unit, executed after its borrow is released.
enum Release {
    Melee {
        origin: Vec3,
        facing: Vec3,
        range: f32,
        damage_min: f32,
        damage_max: f32,
    },
    Projectile {
        origin: Vec3,
        target: Vec3,
        class: UnitClass,
        damage_min: f32,
        damage_max: f32,
    },
}

/// Run one AI pass over `pass.team`.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, pass: &AiPass, events: &mut Vec<CombatEvent>) {
    let mut roster: Vec<Sighting> = world
        .query::<(&Unit, &Transform, &Health, &UnitState)>()
        .iter()
        .map(|(entity, (unit, transform, health, state))| Sighting {
            entity,
            team: unit.team,
            position: transform.position,
            yaw: transform.yaw,
            alive: health.is_alive() && !state.is_dead(),
        })
        .collect();
    let index: HashMap<Entity, usize> = roster
        .iter()
        .enumerate()
        .map(|(i, s)| (s.entity, i))
        .collect();

    let actors: Vec<Entity> = roster
        .iter()
        .filter(|s| s.team == pass.team && s.alive)
        .map(|s| s.entity)
        .collect();

    for actor in actors {
        let Some(&slot) = index.get(&actor) else {
            continue;
        };
        let release = match think(world, rng, pass, &mut roster, slot) {
            Some(release) => release,
            None => continue,
        };

        match release {
            Release::Melee {
                origin,
                facing,
                range,
                damage_min,
                damage_max,
            } => {
                let hit = combat::resolve_melee(
                    world,
                    rng,
                    &MeleeStrike {
                        attacker_team: pass.team,
                        origin,
                        facing,
                        range,
                        damage_min,
                        damage_max,
                        multiplier: 1.0,
                        already_hit: &[],
                    },
                    events,
                );
                if let Some(hit) = hit {
                    // Swing is consumed whether it landed or was blocked.
                    if let Ok(mut state) = world.get::<&mut UnitState>(actor) {
                        if let UnitState::Attacking { hit_landed, .. } = &mut *state {
                            *hit_landed = true;
                        }
                    }
                    if let Some(&target_slot) = index.get(&hit.target) {
                        refresh_sighting(world, &mut roster[target_slot]);
                    }
                }
            }
            Release::Projectile {
                origin,
                target,
                class,
                damage_min,
                damage_max,
            } => {
                let speed = class_stats(class, 1).projectile_speed;
                let (source, block_chance) = match pass.team {
                    Team::Enemy => (ProjectileSource::Enemy, HOSTILE_PROJECTILE_BLOCK_CHANCE),
                    _ => (ProjectileSource::Ally, RANGED_BLOCK_CHANCE),
                };
                let velocity = aim_velocity(rng, origin, target, speed);
                projectiles::spawn(
                    world,
                    origin,
                    Projectile {
                        source,
                        team: pass.team,
                        class,
                        velocity,
                        lifetime: PROJECTILE_LIFETIME_SECS,
                        damage_min,
                        damage_max,
                        multiplier: 1.0,
                        splash_radius: 0.0,
                        block_chance,
                    },
                );
            }
        }
    }
}

fn refresh_sighting(world: &World, sighting: &mut Sighting) {
    if let Ok(mut query) =
        world.query_one::<(&Transform, &Health, &UnitState)>(sighting.entity)
    {
        if let Some((transform, health, state)) = query.get() {
            sighting.position = transform.position;
            sighting.alive = health.is_alive() && !state.is_dead();
        }
    }
}

/// Decide and apply one unit's frame. Returns an attack to resolve
/// once the unit's components are no longer borrowed.
fn think(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    pass: &AiPass,
    roster: &mut [Sighting],
    slot: usize,
) -> Option<Release> {
    let me = roster[slot];
    let dt = pass.dt;
    let shielded = world.get::<&Shielded>(me.entity).is_ok();

    let mut query = world
        .query_one::<(&Unit, &mut Transform, &mut Combat, &mut UnitState, &mut AiMemory)>(me.entity)
        .ok()?;
    let (unit, transform, combat, state, memory) = query.get()?;

    match state {
        UnitState::Dead { .. } => return None,
        UnitState::Stunned { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *state = UnitState::Idle;
            }
            return None;
        }
        UnitState::Blocking { remaining } => {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *state = UnitState::Idle;
            }
        }
        _ => {}
    }

    // --- Timers ---
    combat.attack_timer = (combat.attack_timer - dt).max(0.0);
    memory.retarget_timer -= dt;
    memory.strafe_timer -= dt;
    if memory.strafe_timer <= 0.0 {
        memory.strafe_dir = -memory.strafe_dir;
        memory.strafe_timer = rng.gen_range(STRAFE_FLIP_MIN_SECS..=STRAFE_FLIP_MAX_SECS);
    }

    // --- Target selection ---
    let eligible = |s: &Sighting| {
        s.alive
            && unit.team.is_hostile_to(s.team)
            && (pass.player_targetable || Some(s.entity) != pass.player)
    };
    let held = memory
        .target
        .filter(|_| memory.retarget_timer > 0.0)
        .and_then(|id| {
            roster
                .iter()
                .find(|s| unit_id(s.entity) == id && eligible(s))
        })
        .map(|s| (s.entity, s.position, ground_distance(transform.position, s.position)));
    let target = held.or_else(|| {
        memory.retarget_timer = RETARGET_SECS;
        nearest(
            transform.position,
            roster
                .iter()
                .filter(|s| eligible(s))
                .map(|s| (s.entity, s.position)),
        )
    });
    memory.target = target.map(|(entity, _, _)| unit_id(entity));

    let player_sighting = pass
        .player
        .and_then(|p| roster.iter().find(|s| s.entity == p && s.alive).copied());

    let following = unit.team == Team::Ally
        && pass.ally_command == AllyCommand::Follow
        && player_sighting.is_some()
        && target.map_or(true, |(_, _, d)| d > ALLY_ENGAGE_RADIUS);

    let steering = match (following, player_sighting, target) {
        (true, Some(player), _) => {
            let offset = Quat::from_rotation_y(player.yaw) * memory.follow_offset;
            follow_slot(transform.position, player.position + offset)
        }
        (_, _, Some((_, target_pos, _))) => steer(&SteeringContext {
            position: transform.position,
            target: target_pos,
            attack_type: combat.attack_type,
            range: combat.range,
            strafe_dir: memory.strafe_dir,
        }),
        _ => Steering::HOLD,
    };

    // --- Shield block ---
    if shielded && !state.is_attacking() && !state.is_blocking() {
        if let Some((_, _, distance)) = target {
            let chance = (BLOCK_ROLL_RATE * f64::from(dt)).min(1.0);
            if distance < BLOCK_TRIGGER_DISTANCE && rng.gen_bool(chance) {
                *state = UnitState::Blocking {
                    remaining: rng.gen_range(AI_BLOCK_MIN_SECS..=AI_BLOCK_MAX_SECS),
                };
            }
        }
    }

    // --- Attack ---
    let mut release = None;
    if let UnitState::Attacking {
        elapsed,
        duration,
        hit_landed,
    } = state
    {
        *elapsed += dt;
        let progress = if *duration > 0.0 {
            (*elapsed / *duration).min(1.0)
        } else {
            1.0
        };
        if in_strike_window(progress) && !*hit_landed {
            match combat.attack_type {
                AttackType::Melee => {
                    release = Some(Release::Melee {
                        origin: transform.position,
                        facing: transform.facing(),
                        range: combat.range,
                        damage_min: combat.damage_min,
                        damage_max: combat.damage_max,
                    });
                }
                AttackType::Ranged => {
                    if let Some((_, target_pos, _)) = target {
                        release = Some(Release::Projectile {
                            origin: transform.position,
                            target: target_pos,
                            class: unit.class,
                            damage_min: combat.damage_min,
                            damage_max: combat.damage_max,
                        });
                    }
                    // A ranged draw looses once, target or not.
                    *hit_landed = true;
                }
            }
        }
        if progress >= 1.0 {
            *state = UnitState::Idle;
        }
    } else if !state.is_blocking() && !following {
        if let Some((_, _, distance)) = target {
            if can_start(combat.attack_timer, distance, combat.range) {
                *state = UnitState::Attacking {
                    elapsed: 0.0,
                    duration: combat.attack_duration,
                    hit_landed: false,
                };
                combat.attack_timer = if combat.cooldown_max > combat.cooldown_min {
                    rng.gen_range(combat.cooldown_min..=combat.cooldown_max)
                } else {
                    combat.cooldown_min
                };
            }
        }
    }

    // --- Facing ---
    let desired_yaw = match (following, target) {
        (false, Some((_, target_pos, _))) => Some(yaw_towards(transform.position, target_pos)),
        _ if steering.direction != Vec3::ZERO => {
            Some(yaw_towards(Vec3::ZERO, steering.direction))
        }
        _ => None,
    };
    if let Some(desired) = desired_yaw {
        transform.yaw = turn_towards(transform.yaw, desired, TURN_RATE, dt);
    }

    // --- Movement ---
    let state_mult = match state {
        UnitState::Attacking { .. } => ATTACK_MOVE_MULT,
        UnitState::Blocking { .. } => BLOCK_MOVE_MULT,
        _ => 1.0,
    };
    let neighbours = roster
        .iter()
        .filter(|s| {
            s.alive
                && s.entity != me.entity
                && (s.team == unit.team || Some(s.entity) == pass.player)
                && ground_distance(s.position, transform.position) < AVOIDANCE_DISTANCE
        })
        .map(|s| s.position);
    let push = separation_push(
        transform.position,
        neighbours,
        AVOIDANCE_DISTANCE,
        AVOIDANCE_STRENGTH,
    );
    let velocity = steering.direction * combat.speed * steering.speed_mult * state_mult + push;
    transform.position = clamp_to_arena(transform.position + velocity * dt);

    if matches!(
        state,
        UnitState::Idle | UnitState::Approaching | UnitState::Strafing
    ) {
        *state = match steering.intent {
            MoveIntent::Approach => UnitState::Approaching,
            MoveIntent::Retreat | MoveIntent::Strafe => UnitState::Strafing,
            MoveIntent::Hold => UnitState::Idle,
        };
    }

    roster[slot].position = transform.position;
    roster[slot].yaw = transform.yaw;

    // Attacks resolve from where the unit ended up this frame.
    match &mut release {
        Some(Release::Melee { facing, origin, .. }) => {
            *facing = facing_from_yaw(transform.yaw);
            *origin = transform.position;
        }
        Some(Release::Projectile { origin, .. }) => *origin = transform.position,
        None => {}
    }
    release
}
