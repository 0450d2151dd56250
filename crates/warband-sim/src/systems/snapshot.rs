//! Snapshot system: builds the HUD snapshot and the battle result from
//! the ECS world. Read-only; never mutates the simulation.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use warband_core::components::{Health, Unit, UnitState};
use warband_core::enums::{BattleOutcome, Team, UnitClass};
use warband_core::state::{BannerView, BattleResult, HudSnapshot, PlayerHud, SurvivorCount};
use warband_core::types::{SimTime, Transform};

use crate::game_state::GameState;

/// Live units per team.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Headcount {
    pub allies: u32,
    pub enemies: u32,
}

pub fn headcount(world: &World) -> Headcount {
    let mut count = Headcount::default();
    for (_, (unit, health, state)) in world.query::<(&Unit, &Health, &UnitState)>().iter() {
        if !health.is_alive() || state.is_dead() {
            continue;
        }
        match unit.team {
            Team::Ally => count.allies += 1,
            Team::Enemy => count.enemies += 1,
            Team::Player => {}
        }
    }
    count
}

/// Build the HUD snapshot.
pub fn build_hud(
    world: &World,
    time: &SimTime,
    state: &GameState,
    player: Option<Entity>,
) -> HudSnapshot {
    let count = headcount(world);
    HudSnapshot {
        time: *time,
        started: state.started,
        over: state.over,
        outcome: state.outcome,
        player: build_player_hud(world, state, player),
        allies_alive: count.allies,
        enemies_alive: count.enemies,
        kills: state.kills,
        wave: state.wave,
        wave_enemies: state.quotas.enemies,
        wave_allies: state.quotas.allies,
        ally_command: state.ally_command,
        banner: state.banner.as_ref().map(|b| BannerView {
            text: b.text.clone(),
            remaining_secs: b.remaining,
        }),
        damage_flash: state.damage_flash,
        first_person: state.camera.first_person,
    }
}

fn build_player_hud(world: &World, state: &GameState, player: Option<Entity>) -> PlayerHud {
    let mut hud = PlayerHud {
        stamina: state.stamina,
        max_stamina: state.max_stamina,
        ability_cooldown: state.ability_cooldown,
        ability_cooldown_max: state.ability_cooldown_max(),
        dash_cooldown: state.dash_cooldown,
        dash_cooldown_max: state.dash_cooldown_max(),
        stealthed: state.stealthed(),
        backstab_ready: state.backstab_ready(),
        airborne: !state.grounded,
        ..Default::default()
    };
    let Some(player) = player else {
        return hud;
    };
    if let Ok(mut query) = world.query_one::<(&Health, &UnitState, &Transform)>(player) {
        if let Some((health, unit_state, _)) = query.get() {
            hud.health = health.current;
            hud.max_health = health.max;
            hud.blocking = unit_state.is_blocking();
        }
    }
    hud
}

/// Build the end-of-battle summary from the units still standing.
pub fn build_result(world: &World, time: &SimTime, state: &GameState) -> BattleResult {
    let mut allies: BTreeMap<(UnitClass, u8), u32> = BTreeMap::new();
    let mut enemies: BTreeMap<(UnitClass, u8), u32> = BTreeMap::new();

    for (_, (unit, health, unit_state)) in world.query::<(&Unit, &Health, &UnitState)>().iter() {
        if !health.is_alive() || unit_state.is_dead() {
            continue;
        }
        let bucket = match unit.team {
            Team::Ally => &mut allies,
            Team::Enemy => &mut enemies,
            Team::Player => continue,
        };
        *bucket.entry((unit.class, unit.level)).or_default() += 1;
    }

    let survivors = |map: BTreeMap<(UnitClass, u8), u32>| -> Vec<SurvivorCount> {
        map.into_iter()
            .map(|((class, level), count)| SurvivorCount {
                class,
                level,
                count,
            })
            .collect()
    };

    // The wave in progress only counts once it is won.
    let waves_cleared = if state.outcome == Some(BattleOutcome::Victory) {
        state.wave
    } else {
        state.wave.saturating_sub(1)
    };

    BattleResult {
        victory: state.outcome == Some(BattleOutcome::Victory),
        outcome: state.outcome,
        ally_survivors: survivors(allies),
        enemy_survivors: survivors(enemies),
        kills: state.kills,
        waves_cleared,
        elapsed_secs: time.elapsed_secs,
    }
}
