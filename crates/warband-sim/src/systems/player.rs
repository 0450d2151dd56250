//! Player controller: camera-relative movement, sprint, jump, block,
//! attack and dash, followed by player projectile flight.
//!
//! The player entity's `UnitState` is the single record of whether the
//! hero is attacking or blocking; HUD and pose read it from there.

use glam::Vec3;
use hecs::{Entity, World};
use log::trace;
use rand_chacha::ChaCha8Rng;

use warband_ai::attack::in_strike_window;
use warband_ai::turning::turn_towards;

use warband_core::components::{Combat, Health, Projectile, UnitState};
use warband_core::constants::*;
use warband_core::enums::{AttackType, ProjectileSource, Team};
use warband_core::events::CombatEvent;
use warband_core::input::{InputState, Key, MouseButton};
use warband_core::stats::{class_stats, ClassStats};
use warband_core::types::Transform;

use crate::combat::{self, MeleeStrike};
use crate::game_state::GameState;
use crate::systems::{camera, dash, projectiles};

/// What the controller decided to release once component borrows end.
enum Release {
    Melee { origin: Vec3, facing: Vec3 },
    Projectile { origin: Vec3, facing: Vec3 },
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    input: &mut InputState,
    player: Option<Entity>,
    dt: f32,
    events: &mut Vec<CombatEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mouse = input.take_mouse_delta();
    let wheel = input.take_wheel_delta();
    camera::apply_input(&mut state.camera, mouse, wheel);

    if let Some(player) = player {
        control(world, rng, state, input, player, dt, events);
        let position = world.get::<&Transform>(player).map(|t| t.position);
        if let Ok(position) = position {
            camera::follow(&mut state.camera, rng, position, dt);
        }
    }

    projectiles::advance(world, rng, ProjectileSource::Player, dt, events, despawn_buffer);
}

fn control(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    input: &InputState,
    player: Entity,
    dt: f32,
    events: &mut Vec<CombatEvent>,
) {
    let stats = class_stats(state.player_class, state.player_level);

    state.attack_cooldown = (state.attack_cooldown - dt).max(0.0);
    state.dash_cooldown = (state.dash_cooldown - dt).max(0.0);

    let alive = match world.get::<&mut Health>(player) {
        Ok(mut health) => {
            health.invulnerable_secs = (health.invulnerable_secs - dt).max(0.0);
            health.is_alive()
        }
        Err(_) => false,
    };
    if !alive {
        state.dash = None;
        return;
    }

    // Camera-relative wish direction.
    let forward = camera::forward(&state.camera);
    let right = camera::right(&state.camera);
    let mut wish = Vec3::ZERO;
    if input.is_down(Key::Forward) {
        wish += forward;
    }
    if input.is_down(Key::Back) {
        wish -= forward;
    }
    if input.is_down(Key::Right) {
        wish += right;
    }
    if input.is_down(Key::Left) {
        wish -= right;
    }
    let wish = wish.normalize_or_zero();

    // --- Dash ---
    let attacking = world
        .get::<&UnitState>(player)
        .map(|s| s.is_attacking())
        .unwrap_or(false);
    let dash_pressed = input.is_down(Key::Dash);
    if dash_pressed && !state.dash_latched && !attacking && dash::ready(state) {
        let direction = if wish != Vec3::ZERO { wish } else { forward };
        if let Ok(mut unit_state) = world.get::<&mut UnitState>(player) {
            if unit_state.is_blocking() {
                *unit_state = UnitState::Idle;
            }
        }
        dash::start(world, state, player, &stats, direction);
    }
    state.dash_latched = dash_pressed;

    let dashing = dash::update(world, rng, state, player, &stats, dt, events);

    let release = drive(world, state, input, player, &stats, wish, dashing, dt);

    match release {
        Some(Release::Melee { origin, facing }) => {
            let multiplier = state.buff.map_or(1.0, |b| b.multiplier);
            let hit = combat::resolve_melee(
                world,
                rng,
                &MeleeStrike {
                    attacker_team: Team::Player,
                    origin,
                    facing,
                    range: stats.range,
                    damage_min: stats.damage_min,
                    damage_max: stats.damage_max,
                    multiplier,
                    already_hit: &[],
                },
                events,
            );
            if let Some(hit) = hit {
                if let Ok(mut unit_state) = world.get::<&mut UnitState>(player) {
                    if let UnitState::Attacking { hit_landed, .. } = &mut *unit_state {
                        *hit_landed = true;
                    }
                }
                if !hit.blocked {
                    state.buff = None;
                }
                trace!("player swing: {:?}", hit);
            }
        }
        Some(Release::Projectile { origin, facing }) => {
            let multiplier = state.buff.take().map_or(1.0, |b| b.multiplier);
            projectiles::spawn(
                world,
                origin + facing * 0.5,
                Projectile {
                    source: ProjectileSource::Player,
                    team: Team::Player,
                    class: state.player_class,
                    velocity: facing * stats.projectile_speed,
                    lifetime: PROJECTILE_LIFETIME_SECS,
                    damage_min: stats.damage_min,
                    damage_max: stats.damage_max,
                    multiplier,
                    splash_radius: 0.0,
                    block_chance: RANGED_BLOCK_CHANCE,
                },
            );
        }
        None => {}
    }
}

/// Movement, stamina, block and attack state for one frame.
#[allow(clippy::too_many_arguments)]
fn drive(
    world: &mut World,
    state: &mut GameState,
    input: &InputState,
    player: Entity,
    stats: &ClassStats,
    wish: Vec3,
    dashing: bool,
    dt: f32,
) -> Option<Release> {
    let mut query = world
        .query_one::<(&mut Transform, &mut UnitState, &mut Combat)>(player)
        .ok()?;
    let (transform, unit_state, combat) = query.get()?;
    if unit_state.is_dead() {
        return None;
    }

    let mut release = None;

    // --- Attack progress ---
    if let UnitState::Attacking {
        elapsed,
        duration,
        hit_landed,
    } = unit_state
    {
        *elapsed += dt;
        let progress = if *duration > 0.0 {
            (*elapsed / *duration).min(1.0)
        } else {
            1.0
        };
        if stats.attack_type == AttackType::Melee && in_strike_window(progress) && !*hit_landed {
            release = Some(Release::Melee {
                origin: transform.position,
                facing: transform.facing(),
            });
        }
        if progress >= 1.0 {
            *unit_state = UnitState::Idle;
        }
    }

    // --- Block ---
    let wants_block = input.is_button_down(MouseButton::Secondary)
        && !dashing
        && !unit_state.is_attacking()
        && state.stamina > 0.0;
    if wants_block {
        *unit_state = UnitState::Blocking {
            remaining: f32::INFINITY,
        };
        state.stamina = (state.stamina - BLOCK_DRAIN_PER_SEC * dt).max(0.0);
    } else if unit_state.is_blocking() {
        *unit_state = UnitState::Idle;
    }

    // --- Attack start ---
    if input.is_button_down(MouseButton::Primary)
        && !dashing
        && !unit_state.is_attacking()
        && !unit_state.is_blocking()
        && state.attack_cooldown <= 0.0
        && state.stamina >= ATTACK_MIN_STAMINA
    {
        state.stamina -= ATTACK_STAMINA_COST;
        state.attack_cooldown = PLAYER_ATTACK_COOLDOWN_SECS;
        state.stealth_secs = 0.0;
        // Swings go where the camera looks.
        transform.yaw = state.camera.yaw;
        *unit_state = UnitState::Attacking {
            elapsed: 0.0,
            duration: stats.attack_duration,
            hit_landed: stats.attack_type == AttackType::Ranged,
        };
        if stats.attack_type == AttackType::Ranged {
            release = Some(Release::Projectile {
                origin: transform.position,
                facing: transform.facing(),
            });
        }
    }
    combat.attack_timer = state.attack_cooldown;

    // --- Sprint and stamina ---
    let moving = wish != Vec3::ZERO;
    state.sprinting = input.is_down(Key::Sprint) && moving && !dashing && state.stamina > 0.0;
    if state.sprinting {
        state.stamina = (state.stamina - SPRINT_DRAIN_PER_SEC * dt).max(0.0);
    } else if !unit_state.is_blocking() {
        state.stamina = (state.stamina + STAMINA_REGEN_PER_SEC * dt).min(state.max_stamina);
    }

    // --- Jump and gravity ---
    if input.is_down(Key::Jump) && state.grounded && !dashing {
        state.vertical_velocity = JUMP_VELOCITY;
        state.grounded = false;
    }
    let mut position = transform.position;
    if !state.grounded {
        state.vertical_velocity -= GRAVITY * dt;
        position.y += state.vertical_velocity * dt;
        if position.y <= GROUND_Y {
            position.y = GROUND_Y;
            state.vertical_velocity = 0.0;
            state.grounded = true;
        }
    }

    // --- Ground movement ---
    if !dashing {
        let mut speed = stats.speed;
        if state.sprinting {
            speed *= SPRINT_MULT;
        }
        match unit_state {
            UnitState::Attacking { .. } => speed *= ATTACK_MOVE_MULT,
            UnitState::Blocking { .. } => speed *= BLOCK_MOVE_MULT,
            _ => {}
        }
        position += wish * speed * dt;
        transform.yaw = turn_towards(transform.yaw, state.camera.yaw, PLAYER_TURN_RATE, dt);
    }
    transform.position = dash::clamp_player(position);

    release
}
