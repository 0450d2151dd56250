//! Hit resolution shared by AI, the player controller, projectiles and
//! abilities.
//!
//! Every damaging interaction funnels through `apply_hit`, so the rules
//! live in one place: dead or invulnerable units are never targets,
//! blocking units negate at a per-source chance, health clamps at zero
//! and a unit reaching zero is marked dead exactly once.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warband_core::components::{Health, Unit, UnitState};
use warband_core::constants::*;
use warband_core::enums::Team;
use warband_core::events::CombatEvent;
use warband_core::types::{clamp_to_arena, ground_direction, ground_distance, Transform, UnitId};

/// Outcome of one resolved hit against one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub target: Entity,
    pub team: Team,
    /// Damage applied after the multiplier; zero when blocked.
    pub damage: f32,
    pub blocked: bool,
    pub killed: bool,
    pub position: Vec3,
}

/// A melee swing: one target at most, inside reach and the facing cone.
#[derive(Debug, Clone)]
pub struct MeleeStrike<'a> {
    pub attacker_team: Team,
    pub origin: Vec3,
    /// Unit ground-plane facing of the attacker.
    pub facing: Vec3,
    pub range: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    pub multiplier: f32,
    /// Units that may not be picked (already struck this swing or dash).
    pub already_hit: &'a [Entity],
}

impl Default for MeleeStrike<'_> {
    fn default() -> Self {
        Self {
            attacker_team: Team::Enemy,
            origin: Vec3::ZERO,
            facing: Vec3::Z,
            range: 0.0,
            damage_min: 0.0,
            damage_max: 0.0,
            multiplier: 1.0,
            already_hit: &[],
        }
    }
}

/// A point or area blast: projectile contact, ability or dash landing.
///
/// `radius == 0` hits the first hostile unit inside the contact radius;
/// a positive radius hits every hostile unit inside it.
#[derive(Debug, Clone)]
pub struct RangedStrike<'a> {
    pub attacker_team: Team,
    pub position: Vec3,
    pub radius: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    pub multiplier: f32,
    pub block_chance: f64,
    pub stun_secs: f32,
    pub knockback: f32,
    pub already_hit: &'a [Entity],
}

impl Default for RangedStrike<'_> {
    fn default() -> Self {
        Self {
            attacker_team: Team::Enemy,
            position: Vec3::ZERO,
            radius: 0.0,
            damage_min: 0.0,
            damage_max: 0.0,
            multiplier: 1.0,
            block_chance: RANGED_BLOCK_CHANCE,
            stun_secs: HIT_STUN_SECS,
            knockback: KNOCKBACK_DISTANCE,
            already_hit: &[],
        }
    }
}

/// Per-hit parameters after target selection.
struct Payload {
    damage_min: f32,
    damage_max: f32,
    multiplier: f32,
    block_chance: f64,
    stun_secs: f32,
    knockback: f32,
}

/// Stable id for events and the presentation boundary.
pub fn unit_id(entity: Entity) -> UnitId {
    UnitId(entity.to_bits().get())
}

/// Whether `unit` may be struck by something on `attacker_team`.
pub fn is_valid_target(
    attacker_team: Team,
    unit: &Unit,
    health: &Health,
    state: &UnitState,
) -> bool {
    attacker_team.is_hostile_to(unit.team)
        && health.is_alive()
        && !state.is_dead()
        && health.invulnerable_secs <= 0.0
}

/// Roll damage uniformly in `[min, max]`, scale and floor it.
pub fn roll_damage(rng: &mut ChaCha8Rng, min: f32, max: f32, multiplier: f32) -> f32 {
    let base = if max > min { rng.gen_range(min..=max) } else { min };
    (base * multiplier).floor().max(0.0)
}

/// Resolve a melee swing against the first qualifying target.
pub fn resolve_melee(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    strike: &MeleeStrike,
    events: &mut Vec<CombatEvent>,
) -> Option<Hit> {
    let payload = Payload {
        damage_min: strike.damage_min,
        damage_max: strike.damage_max,
        multiplier: strike.multiplier,
        block_chance: MELEE_BLOCK_CHANCE,
        stun_secs: HIT_STUN_SECS,
        knockback: KNOCKBACK_DISTANCE,
    };

    for (entity, (unit, transform, health, state)) in
        world.query_mut::<(&Unit, &mut Transform, &mut Health, &mut UnitState)>()
    {
        if strike.already_hit.contains(&entity)
            || !is_valid_target(strike.attacker_team, unit, health, state)
        {
            continue;
        }
        let distance = ground_distance(strike.origin, transform.position);
        if distance > strike.range {
            continue;
        }
        // Coincident units count as in front.
        let direction = ground_direction(strike.origin, transform.position);
        if direction != Vec3::ZERO && strike.facing.dot(direction) <= MELEE_CONE_COS {
            continue;
        }
        let knock_dir = if direction == Vec3::ZERO {
            strike.facing
        } else {
            direction
        };
        return Some(apply_hit(
            entity, unit, transform, health, state, rng, &payload, knock_dir, events,
        ));
    }
    None
}

/// Resolve a point or area blast. Blocked hits are reported with
/// `blocked == true`; a point blast stops at its first contact either way.
pub fn resolve_ranged(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    strike: &RangedStrike,
    events: &mut Vec<CombatEvent>,
) -> Vec<Hit> {
    let single = strike.radius <= 0.0;
    let reach = if single {
        PROJECTILE_CONTACT_RADIUS
    } else {
        strike.radius
    };
    let payload = Payload {
        damage_min: strike.damage_min,
        damage_max: strike.damage_max,
        multiplier: strike.multiplier,
        block_chance: strike.block_chance,
        stun_secs: strike.stun_secs,
        knockback: strike.knockback,
    };

    let mut hits = Vec::new();
    for (entity, (unit, transform, health, state)) in
        world.query_mut::<(&Unit, &mut Transform, &mut Health, &mut UnitState)>()
    {
        if strike.already_hit.contains(&entity)
            || !is_valid_target(strike.attacker_team, unit, health, state)
        {
            continue;
        }
        if ground_distance(strike.position, transform.position) > reach {
            continue;
        }
        let knock_dir = ground_direction(strike.position, transform.position);
        hits.push(apply_hit(
            entity, unit, transform, health, state, rng, &payload, knock_dir, events,
        ));
        if single {
            break;
        }
    }
    hits
}

/// Hit every valid target around `strike.position`, never stopping at the
/// first contact. Radii below the contact radius are widened to it.
pub fn resolve_area(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    strike: &RangedStrike,
    events: &mut Vec<CombatEvent>,
) -> Vec<Hit> {
    let strike = RangedStrike {
        radius: strike.radius.max(PROJECTILE_CONTACT_RADIUS),
        ..strike.clone()
    };
    resolve_ranged(world, rng, &strike, events)
}

/// Whether any valid target of `attacker_team` is within `radius`.
pub fn any_target_within(world: &World, attacker_team: Team, position: Vec3, radius: f32) -> bool {
    world
        .query::<(&Unit, &Transform, &Health, &UnitState)>()
        .iter()
        .any(|(_, (unit, transform, health, state))| {
            is_valid_target(attacker_team, unit, health, state)
                && ground_distance(position, transform.position) <= radius
        })
}

#[allow(clippy::too_many_arguments)]
fn apply_hit(
    entity: Entity,
    unit: &Unit,
    transform: &mut Transform,
    health: &mut Health,
    state: &mut UnitState,
    rng: &mut ChaCha8Rng,
    payload: &Payload,
    knock_dir: Vec3,
    events: &mut Vec<CombatEvent>,
) -> Hit {
    let target = unit_id(entity);
    let position = transform.position;

    if state.is_blocking() && rng.gen_bool(payload.block_chance.clamp(0.0, 1.0)) {
        // The player holds the guard; AI blockers are staggered briefly.
        if unit.team != Team::Player {
            *state = UnitState::Stunned {
                remaining: BLOCK_STUN_SECS,
            };
        }
        events.push(CombatEvent::Blocked { target, position });
        return Hit {
            target: entity,
            team: unit.team,
            damage: 0.0,
            blocked: true,
            killed: false,
            position,
        };
    }

    let damage = roll_damage(
        rng,
        payload.damage_min,
        payload.damage_max,
        payload.multiplier,
    );
    health.current = (health.current - damage).max(0.0);
    events.push(CombatEvent::Hit {
        target,
        team: unit.team,
        damage,
        position,
    });

    if unit.team == Team::Player {
        events.push(CombatEvent::PlayerDamaged { damage });
    }

    let killed = !health.is_alive();
    if killed {
        *state = UnitState::Dead { elapsed: 0.0 };
        events.push(CombatEvent::Killed {
            victim: target,
            team: unit.team,
            class: unit.class,
            position,
        });
    } else if unit.team != Team::Player {
        *state = UnitState::Stunned {
            remaining: payload.stun_secs,
        };
        transform.position = clamp_to_arena(position + knock_dir * payload.knockback);
    }

    Hit {
        target: entity,
        team: unit.team,
        damage,
        blocked: false,
        killed,
        position,
    }
}
