//! Battle state data model: everything about the battle that is not a
//! per-unit component.
//!
//! Stored in `BattleEngine`, NOT as ECS entities.

use glam::Vec3;

use warband_core::constants::*;
use warband_core::enums::*;
use warband_core::presentation::CameraView;
use warband_core::stats::class_stats;

/// Orbit camera rig driven by the player controller.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Smoothed camera position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    pub first_person: bool,
    /// Current shake amplitude (meters); decays exponentially.
    pub shake: f32,
    /// Offset applied this frame from the shake.
    pub shake_offset: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: CAMERA_DEFAULT_PITCH,
            distance: CAMERA_DEFAULT_DISTANCE,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
            first_person: false,
            shake: 0.0,
            shake_offset: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Camera placement with the shake layered on top.
    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position + self.shake_offset,
            look_at: self.look_at,
            first_person: self.first_person,
        }
    }
}

/// An active class dash overriding normal movement.
#[derive(Debug, Clone)]
pub struct DashState {
    pub kind: DashKind,
    /// Ground-plane direction of travel.
    pub direction: Vec3,
    pub speed: f32,
    pub remaining: f32,
    /// Units already struck during this dash.
    pub struck: Vec<hecs::Entity>,
}

/// "Next hit deals extra damage" buff with its own expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextHitBuff {
    pub multiplier: f32,
    pub remaining: f32,
}

/// Headline message with a display timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub remaining: f32,
}

/// Unit counts spawned with the current wave (the opening armies count
/// as wave 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveQuotas {
    pub enemies: u32,
    pub allies: u32,
}

/// Complete non-entity battle state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub started: bool,
    pub over: bool,
    pub outcome: Option<BattleOutcome>,
    pub mode: BattleMode,
    pub player_class: UnitClass,
    pub player_level: u8,

    pub kills: u32,
    pub wave: u32,
    /// Every enemy ever spawned; victory needs at least one.
    pub enemies_spawned_total: u32,

    // --- Player pools and controller state ---
    pub stamina: f32,
    pub max_stamina: f32,
    pub sprinting: bool,
    pub grounded: bool,
    pub vertical_velocity: f32,
    /// Seconds until the player may start another attack.
    pub attack_cooldown: f32,
    pub dash: Option<DashState>,
    pub dash_cooldown: f32,
    /// Dash key was down last frame; a dash needs a fresh press.
    pub dash_latched: bool,
    pub camera: CameraRig,

    // --- Abilities ---
    pub ability_cooldown: f32,
    pub buff: Option<NextHitBuff>,
    /// While positive, hostile AI ignores the player.
    pub stealth_secs: f32,

    // --- Army ---
    pub ally_command: AllyCommand,

    // --- Waves ---
    /// Countdown to the next wave once the current one is cleared.
    pub wave_transition: Option<f32>,
    pub quotas: WaveQuotas,

    // --- Presentation timers ---
    pub banner: Option<Banner>,
    pub damage_flash: f32,
}

impl GameState {
    /// Fresh state for a battle with the given hero.
    pub fn new(mode: BattleMode, player_class: UnitClass, player_level: u8) -> Self {
        Self {
            started: false,
            over: false,
            outcome: None,
            mode,
            player_class,
            player_level,
            kills: 0,
            wave: 1,
            enemies_spawned_total: 0,
            stamina: PLAYER_MAX_STAMINA,
            max_stamina: PLAYER_MAX_STAMINA,
            sprinting: false,
            grounded: true,
            vertical_velocity: 0.0,
            attack_cooldown: 0.0,
            dash: None,
            dash_cooldown: 0.0,
            dash_latched: false,
            camera: CameraRig::default(),
            ability_cooldown: 0.0,
            buff: None,
            stealth_secs: 0.0,
            ally_command: AllyCommand::default(),
            wave_transition: None,
            quotas: WaveQuotas {
                enemies: 0,
                allies: 0,
            },
            banner: None,
            damage_flash: 0.0,
        }
    }

    /// Whether the buffed next hit is armed.
    pub fn backstab_ready(&self) -> bool {
        self.buff.is_some()
    }

    pub fn stealthed(&self) -> bool {
        self.stealth_secs > 0.0
    }

    pub fn ability_cooldown_max(&self) -> f32 {
        class_stats(self.player_class, self.player_level).ability_cooldown
    }

    pub fn dash_cooldown_max(&self) -> f32 {
        class_stats(self.player_class, self.player_level).dash_cooldown
    }

    pub fn show_banner(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            text: text.into(),
            remaining: BANNER_SECS,
        });
    }

    /// Count down banner and damage-flash timers.
    pub fn tick_presentation_timers(&mut self, dt: f32) {
        self.damage_flash = (self.damage_flash - dt).max(0.0);
        if let Some(banner) = &mut self.banner {
            banner.remaining -= dt;
            if banner.remaining <= 0.0 {
                self.banner = None;
            }
        }
    }

    /// Latch a terminal outcome. Only the first call has any effect.
    pub fn finish(&mut self, outcome: BattleOutcome) {
        if self.over {
            return;
        }
        self.over = true;
        self.outcome = Some(outcome);
        self.dash = None;
        self.wave_transition = None;
    }
}
