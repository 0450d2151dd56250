//! ECS systems that operate on the battle world each frame.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! work). Per-unit state lives in components; battle-wide state is passed
//! in as `GameState`.

pub mod abilities;
pub mod allies;
pub mod camera;
pub mod cleanup;
pub mod dash;
pub mod enemies;
pub mod player;
pub mod pose;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod unit_ai;
