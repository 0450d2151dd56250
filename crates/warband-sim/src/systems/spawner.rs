//! Army spawning: opening formations, the hero, and endless-mode waves.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use warband_core::components::*;
use warband_core::config::ArmyEntry;
use warband_core::constants::*;
use warband_core::enums::{AttackType, Team, UnitClass};
use warband_core::stats::class_stats;
use warband_core::types::{clamp_to_arena, yaw_towards, Transform};

/// Units per rank before a row wraps into a second rank.
const MAX_RANK_WIDTH: usize = 16;

/// Entities of a spawned army split by row.
#[derive(Debug, Default, Clone)]
pub struct Formation {
    /// Melee units.
    pub front: Vec<Entity>,
    /// Ranged units, one row-separation behind the front.
    pub back: Vec<Entity>,
}

impl Formation {
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Spawn an army roster as a two-row formation centred on x = 0.
///
/// `front_z` is the melee row; the ranged row sits `ROW_SEPARATION`
/// further from the opposing side. Units face the opposing side.
pub fn spawn_army(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    roster: &[ArmyEntry],
    team: Team,
    front_z: f32,
) -> Formation {
    // Allies face +z, enemies face -z.
    let (yaw, back_sign) = match team {
        Team::Enemy => (PI, 1.0),
        _ => (0.0, -1.0),
    };

    let mut melee = Vec::new();
    let mut ranged = Vec::new();
    for entry in roster {
        let bucket = match class_stats(entry.class, entry.level).attack_type {
            AttackType::Melee => &mut melee,
            AttackType::Ranged => &mut ranged,
        };
        for _ in 0..entry.count {
            bucket.push((entry.class, entry.level));
        }
    }

    let back_z = front_z + back_sign * ROW_SEPARATION;
    let formation = Formation {
        front: spawn_row(world, rng, &melee, team, front_z, back_sign, yaw),
        back: spawn_row(world, rng, &ranged, team, back_z, back_sign, yaw),
    };
    debug!(
        "spawned {:?} army: {} front, {} back",
        team,
        formation.front.len(),
        formation.back.len()
    );
    formation
}

fn spawn_row(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    units: &[(UnitClass, u8)],
    team: Team,
    row_z: f32,
    back_sign: f32,
    yaw: f32,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(units.len());
    for (rank, chunk) in units.chunks(MAX_RANK_WIDTH).enumerate() {
        let z = row_z + back_sign * rank as f32 * UNIT_SPACING;
        let half_width = (chunk.len() as f32 - 1.0) * 0.5;
        for (i, &(class, level)) in chunk.iter().enumerate() {
            let x = (i as f32 - half_width) * UNIT_SPACING
                + rng.gen_range(-FORMATION_JITTER..=FORMATION_JITTER);
            let jitter_z = rng.gen_range(-FORMATION_JITTER..=FORMATION_JITTER);
            let position = clamp_to_arena(Vec3::new(x, GROUND_Y, z + jitter_z));
            spawned.push(spawn_unit(world, rng, team, class, level, position, yaw));
        }
    }
    spawned
}

/// Spawn one AI unit with per-unit stat variance.
pub fn spawn_unit(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    team: Team,
    class: UnitClass,
    level: u8,
    position: Vec3,
    yaw: f32,
) -> Entity {
    let stats = class_stats(class, level);
    let mut vary = |value: f32| value * (1.0 + rng.gen_range(-STAT_VARIANCE..=STAT_VARIANCE));

    let max_health = vary(stats.max_health).round().max(1.0);
    let speed = vary(stats.speed);
    let damage_min = vary(stats.damage_min);
    let damage_max = vary(stats.damage_max).max(damage_min);

    let combat = Combat {
        attack_type: stats.attack_type,
        range: stats.range,
        damage_min,
        damage_max,
        attack_duration: stats.attack_duration,
        cooldown_min: stats.cooldown_min,
        cooldown_max: stats.cooldown_max,
        // Stagger the opening swings.
        attack_timer: rng.gen_range(0.0..=stats.cooldown_max),
        speed,
    };
    let memory = AiMemory {
        strafe_dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        strafe_timer: rng.gen_range(STRAFE_FLIP_MIN_SECS..=STRAFE_FLIP_MAX_SECS),
        ..Default::default()
    };

    let entity = world.spawn((
        Unit { team, class, level },
        Transform::new(position, yaw),
        Health::new(max_health),
        combat,
        UnitState::Idle,
        memory,
        Pose {
            last_position: position,
            ..Default::default()
        },
    ));
    if class.has_shield() {
        let _ = world.insert_one(entity, Shielded);
    }
    entity
}

/// Spawn the hero. No stat variance; the player has no AI memory.
pub fn spawn_player(world: &mut World, class: UnitClass, level: u8, position: Vec3) -> Entity {
    let stats = class_stats(class, level);
    let entity = world.spawn((
        Unit {
            team: Team::Player,
            class,
            level,
        },
        Transform::new(position, 0.0),
        Health::new(stats.max_health),
        Combat {
            attack_type: stats.attack_type,
            range: stats.range,
            damage_min: stats.damage_min,
            damage_max: stats.damage_max,
            attack_duration: stats.attack_duration,
            cooldown_min: PLAYER_ATTACK_COOLDOWN_SECS,
            cooldown_max: PLAYER_ATTACK_COOLDOWN_SECS,
            attack_timer: 0.0,
            speed: stats.speed,
        },
        UnitState::Idle,
        Pose {
            last_position: position,
            ..Default::default()
        },
    ));
    if class.has_shield() {
        let _ = world.insert_one(entity, Shielded);
    }
    entity
}

/// Enemy and reinforcement counts for endless wave `wave` (2, 3, ...).
pub fn wave_quota(wave: u32) -> (u32, u32) {
    let enemies = WAVE_BASE_ENEMIES + wave * WAVE_ENEMIES_PER_WAVE;
    let allies = 1 + wave / 2;
    (enemies, allies)
}

/// Level of units in endless wave `wave`.
pub fn wave_level(wave: u32) -> u8 {
    let level = 1 + wave / 3;
    level.min(u32::from(MAX_LEVEL)) as u8
}

/// Weighted class pick for wave units.
fn pick_wave_class(rng: &mut ChaCha8Rng) -> UnitClass {
    match rng.gen_range(0..100) {
        0..=34 => UnitClass::Warrior,
        35..=59 => UnitClass::Archer,
        60..=74 => UnitClass::Knight,
        75..=84 => UnitClass::Mage,
        85..=94 => UnitClass::Rogue,
        _ => UnitClass::Cleric,
    }
}

/// Spawn an endless-mode wave: enemies on a ring around the player and
/// reinforcements close beside them. Returns (enemies, allies) spawned.
pub fn spawn_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    wave: u32,
    player_position: Vec3,
) -> (Vec<Entity>, Vec<Entity>) {
    let (enemy_count, ally_count) = wave_quota(wave);
    let level = wave_level(wave);

    let enemies = (0..enemy_count)
        .map(|_| {
            let class = pick_wave_class(rng);
            let position = ring_position(rng, player_position, WAVE_RING_MIN, WAVE_RING_MAX);
            let yaw = yaw_towards(position, player_position);
            spawn_unit(world, rng, Team::Enemy, class, level, position, yaw)
        })
        .collect();

    let allies = (0..ally_count)
        .map(|_| {
            let class = pick_wave_class(rng);
            let position =
                ring_position(rng, player_position, REINFORCE_RING_MIN, REINFORCE_RING_MAX);
            spawn_unit(world, rng, Team::Ally, class, level, position, 0.0)
        })
        .collect();

    (enemies, allies)
}

fn ring_position(rng: &mut ChaCha8Rng, center: Vec3, min: f32, max: f32) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen_range(min..=max);
    clamp_to_arena(center + Vec3::new(angle.sin(), 0.0, angle.cos()) * radius)
}

/// Give every live ally a slot in a loose block behind the player.
pub fn assign_follow_slots(world: &mut World) {
    let mut index = 0usize;
    for (_, (unit, memory, state)) in world.query_mut::<(&Unit, &mut AiMemory, &UnitState)>() {
        if unit.team != Team::Ally || state.is_dead() {
            continue;
        }
        let column = (index % 5) as f32 - 2.0;
        let rank = (index / 5) as f32;
        memory.follow_offset = Vec3::new(column * 1.6, 0.0, -2.5 - rank * 1.6);
        index += 1;
    }
}
