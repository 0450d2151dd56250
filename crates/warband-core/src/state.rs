//! Read-only snapshots handed to the presentation layer: the HUD state
//! polled during battle and the result summary after it.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::SimTime;

/// Point-in-time HUD state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub time: SimTime,
    pub started: bool,
    pub over: bool,
    pub outcome: Option<BattleOutcome>,
    pub player: PlayerHud,
    pub allies_alive: u32,
    pub enemies_alive: u32,
    pub kills: u32,
    pub wave: u32,
    /// Enemies and reinforcements the current wave arrived with.
    pub wave_enemies: u32,
    pub wave_allies: u32,
    pub ally_command: AllyCommand,
    /// Banner text and remaining display time.
    pub banner: Option<BannerView>,
    /// Remaining damage-flash time (seconds).
    pub damage_flash: f32,
    pub first_person: bool,
}

/// Player block of the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerHud {
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub ability_cooldown: f32,
    pub ability_cooldown_max: f32,
    pub dash_cooldown: f32,
    pub dash_cooldown_max: f32,
    pub stealthed: bool,
    pub backstab_ready: bool,
    pub blocking: bool,
    pub airborne: bool,
}

/// Transient headline message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerView {
    pub text: String,
    pub remaining_secs: f32,
}

/// Living units of one class and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorCount {
    pub class: UnitClass,
    pub level: u8,
    pub count: u32,
}

/// End-of-battle summary, recomputed from live units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub victory: bool,
    pub outcome: Option<BattleOutcome>,
    pub ally_survivors: Vec<SurvivorCount>,
    pub enemy_survivors: Vec<SurvivorCount>,
    pub kills: u32,
    pub waves_cleared: u32,
    pub elapsed_secs: f64,
}
