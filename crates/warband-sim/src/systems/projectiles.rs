//! Projectile flight: spawning, movement, contact and expiry.
//!
//! Projectiles fly flat at launch height. Each pipeline step advances
//! only the projectiles of its own source, so a projectile moves exactly
//! once per frame.

use glam::Vec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use warband_core::components::Projectile;
use warband_core::constants::*;
use warband_core::enums::ProjectileSource;
use warband_core::events::CombatEvent;
use warband_core::types::{ground_distance, yaw_towards, Transform};

use crate::combat::{self, RangedStrike};

/// Spawn a projectile at `origin` (ground position; launch height is added).
pub fn spawn(world: &mut World, origin: Vec3, projectile: Projectile) -> Entity {
    let position = Vec3::new(origin.x, GROUND_Y + PROJECTILE_LAUNCH_HEIGHT, origin.z);
    let yaw = yaw_towards(Vec3::ZERO, projectile.velocity);
    world.spawn((Transform::new(position, yaw), projectile))
}

/// Advance every projectile from `source` by `dt`.
pub fn advance(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    source: ProjectileSource,
    dt: f32,
    events: &mut Vec<CombatEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let flying: Vec<(Entity, Vec3, Projectile)> = world
        .query::<(&Transform, &Projectile)>()
        .iter()
        .filter(|(_, (_, p))| p.source == source)
        .map(|(e, (t, p))| (e, t.position, *p))
        .collect();

    for (entity, position, mut projectile) in flying {
        let next = position + projectile.velocity * dt;
        projectile.lifetime -= dt;

        // Contact is resolved before expiry so a final-frame hit still lands.
        if sweep(world, rng, &projectile, position, next, events) {
            despawn_buffer.push(entity);
            continue;
        }

        if projectile.lifetime <= 0.0 || out_of_bounds(next) {
            despawn_buffer.push(entity);
            continue;
        }

        if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
            transform.position = next;
        }
        if let Ok(mut stored) = world.get::<&mut Projectile>(entity) {
            stored.lifetime = projectile.lifetime;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Test contact along `from..to` in steps no longer than the contact
/// radius, so fast projectiles cannot pass through a unit between frames.
fn sweep(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    projectile: &Projectile,
    from: Vec3,
    to: Vec3,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let steps = (ground_distance(from, to) / PROJECTILE_CONTACT_RADIUS)
        .ceil()
        .max(1.0) as u32;
    (1..=steps).any(|step| {
        let point = from.lerp(to, step as f32 / steps as f32);
        !out_of_bounds(point) && detonates(world, rng, projectile, point, events)
    })
}

/// Resolve contact at `position`. Returns true when the projectile is spent.
fn detonates(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    projectile: &Projectile,
    position: Vec3,
    events: &mut Vec<CombatEvent>,
) -> bool {
    if projectile.splash_radius > 0.0 {
        // Burst on first contact, then hit everything in the radius.
        if !combat::any_target_within(world, projectile.team, position, PROJECTILE_CONTACT_RADIUS) {
            return false;
        }
        combat::resolve_area(
            world,
            rng,
            &RangedStrike {
                attacker_team: projectile.team,
                position,
                radius: projectile.splash_radius,
                damage_min: projectile.damage_min,
                damage_max: projectile.damage_max,
                multiplier: projectile.multiplier,
                block_chance: projectile.block_chance,
                ..Default::default()
            },
            events,
        );
        return true;
    }

    let hits = combat::resolve_ranged(
        world,
        rng,
        &RangedStrike {
            attacker_team: projectile.team,
            position,
            radius: 0.0,
            damage_min: projectile.damage_min,
            damage_max: projectile.damage_max,
            multiplier: projectile.multiplier,
            block_chance: projectile.block_chance,
            ..Default::default()
        },
        events,
    );
    !hits.is_empty()
}

fn out_of_bounds(position: Vec3) -> bool {
    position.x.abs() > ARENA_HALF_SIZE
        || position.z.abs() > ARENA_HALF_SIZE
        || position.y < GROUND_Y
        || position.y > ARENA_CEILING
}

/// Number of live projectiles from `source`.
pub fn count(world: &World, source: ProjectileSource) -> usize {
    world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.source == source)
        .count()
}
