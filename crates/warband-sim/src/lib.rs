//! Battle simulation for WARBAND.
//!
//! Owns the hecs ECS world, runs the per-frame system pipeline on a
//! variable, clamped timestep, and produces HUD snapshots and the battle
//! result for the presentation layer.

pub mod combat;
pub mod engine;
pub mod game_state;
pub mod sink;
pub mod systems;

pub use engine::BattleEngine;
pub use sink::{HudThrottle, LogSink};
pub use warband_core as core;
