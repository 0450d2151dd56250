//! Hostile AI: enemies hunt allies and the player, then enemy
//! projectiles fly. A stealthed player is invisible to this pass.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use warband_core::enums::{AllyCommand, ProjectileSource, Team};
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
        team: Team::Enemy,
        dt,
        player,
        player_targetable: !state.stealthed(),
        ally_command: AllyCommand::Charge,
    };
    unit_ai::run(world, rng, &pass, events);
    projectiles::advance(world, rng, ProjectileSource::Enemy, dt, events, despawn_buffer);
}
