//! Cleanup system: ages corpses and removes those that have lingered.

use hecs::{Entity, World};

use warband_core::components::{Unit, UnitState};
use warband_core::constants::CORPSE_LINGER_SECS;
use warband_core::enums::Team;

/// Age every corpse by `dt` and despawn those older than the linger time.
/// The player's body is never removed.
pub fn run(world: &mut World, dt: f32, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (unit, state)) in world.query_mut::<(&Unit, &mut UnitState)>() {
        if let UnitState::Dead { elapsed } = state {
            *elapsed += dt;
            if *elapsed > CORPSE_LINGER_SECS && unit.team != Team::Player {
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
