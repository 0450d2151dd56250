//! One-shot commands sent from the host to the battle engine.
//!
//! Commands are queued and consumed at the start of the next update,
//! before any controller runs.

use serde::{Deserialize, Serialize};

use crate::enums::AllyCommand;

/// All discrete player actions that are not held-key input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleCommand {
    /// Flip the allied army between follow and charge.
    ToggleAllyCommand,
    /// Set the allied army order explicitly.
    SetAllyCommand { command: AllyCommand },
    /// Fire the class ability.
    TriggerAbility,
    /// Switch between third-person and first-person camera.
    ToggleCameraMode,
}
