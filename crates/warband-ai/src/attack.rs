//! Swing phase windows.
//!
//! A swing is described by its normalized progress `elapsed / duration`.
//! Damage (melee) or release (ranged) may only happen inside the strike
//! window.

use warband_core::constants::{HIT_WINDOW_END, HIT_WINDOW_START};
use warband_core::enums::AttackPhase;

/// Named phase for a normalized progress value.
pub fn phase(progress: f32) -> AttackPhase {
    if progress < HIT_WINDOW_START {
        AttackPhase::Windup
    } else if progress <= HIT_WINDOW_END {
        AttackPhase::Strike
    } else {
        AttackPhase::Recovery
    }
}

/// Whether a strike may resolve at this progress.
pub fn in_strike_window(progress: f32) -> bool {
    phase(progress) == AttackPhase::Strike
}

/// Whether an attack is ready to start: cooldown elapsed and target in reach.
pub fn can_start(attack_timer: f32, distance: f32, range: f32) -> bool {
    attack_timer <= 0.0 && distance <= range
}
