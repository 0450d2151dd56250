//! Friendly AI: allies follow the player or engage, then allied
//! projectiles fly.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use warband_core::enums::{ProjectileSource, Team};
use warband_core::events::CombatEvent;

use crate::game_state::GameState;
use crate::systems::{projectiles, unit_ai};

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &GameState,
    player: Option<Entity>,
    dt: f32,
    events: &mut Vec<CombatEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let pass = unit_ai::AiPass {
        team: Team::Ally,
        dt,
        player,
        player_targetable: true,
        ally_command: state.ally_command,
    };
    unit_ai::run(world, rng, &pass, events);
    projectiles::advance(world, rng, ProjectileSource::Ally, dt, events, despawn_buffer);
}
