//! Unit AI for WARBAND.
//!
//! Pure decision functions for the AI controllers: target selection,
//! movement bands, turn smoothing, swing phases, separation and aim.
//! No ECS dependency: everything operates on plain data.

pub mod aim;
pub mod attack;
pub mod separation;
pub mod steering;
pub mod targeting;
pub mod turning;

pub use warband_core as core;
