//! Battle configuration: who fights, under which rules, with which seed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{HUD_INTERVAL_MS, MAX_FRAME_DT, MAX_LEVEL};
use crate::enums::{BattleMode, UnitClass};

/// One line of an army roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyEntry {
    pub class: UnitClass,
    pub level: u8,
    pub count: u32,
}

impl ArmyEntry {
    pub fn new(class: UnitClass, level: u8, count: u32) -> Self {
        Self {
            class,
            level,
            count,
        }
    }
}

/// Configuration for starting a new battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed. Same seed and same input = same battle.
    pub seed: u64,
    pub mode: BattleMode,
    pub player_class: UnitClass,
    pub player_level: u8,
    pub allies: Vec<ArmyEntry>,
    pub enemies: Vec<ArmyEntry>,
    /// Upper bound on a single frame's delta time (seconds).
    pub max_frame_dt: f32,
    /// How often hosts should poll the HUD snapshot (milliseconds).
    pub hud_interval_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: BattleMode::Skirmish,
            player_class: UnitClass::Warrior,
            player_level: 1,
            allies: vec![
                ArmyEntry::new(UnitClass::Warrior, 1, 3),
                ArmyEntry::new(UnitClass::Archer, 1, 2),
            ],
            enemies: vec![
                ArmyEntry::new(UnitClass::Warrior, 1, 4),
                ArmyEntry::new(UnitClass::Knight, 1, 1),
                ArmyEntry::new(UnitClass::Archer, 1, 3),
            ],
            max_frame_dt: MAX_FRAME_DT,
            hud_interval_ms: HUD_INTERVAL_MS,
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed battle config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_frame_dt must be positive and finite, got {0}")]
    InvalidFrameClamp(f32),
    #[error("hud_interval_ms must be positive")]
    InvalidHudInterval,
    #[error("level {level} for {class:?} is outside 1..={max}")]
    LevelOutOfRange {
        class: UnitClass,
        level: u8,
        max: u8,
    },
    #[error("roster entry for {0:?} has a zero count")]
    EmptyEntry(UnitClass),
}

impl BattleConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            return Err(ConfigError::InvalidFrameClamp(self.max_frame_dt));
        }
        if self.hud_interval_ms == 0 {
            return Err(ConfigError::InvalidHudInterval);
        }
        check_level(self.player_class, self.player_level)?;
        for entry in self.allies.iter().chain(self.enemies.iter()) {
            check_level(entry.class, entry.level)?;
            if entry.count == 0 {
                return Err(ConfigError::EmptyEntry(entry.class));
            }
        }
        Ok(())
    }
}

fn check_level(class: UnitClass, level: u8) -> Result<(), ConfigError> {
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(ConfigError::LevelOutOfRange {
            class,
            level,
            max: MAX_LEVEL,
        })
    }
}
