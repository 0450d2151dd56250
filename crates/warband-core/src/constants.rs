//! Simulation constants and tuning parameters.

// --- Frame loop ---

/// Default upper bound on a single frame's delta time (seconds).
pub const MAX_FRAME_DT: f32 = 0.1;

/// Default HUD polling interval for hosts (milliseconds).
pub const HUD_INTERVAL_MS: u64 = 100;

// --- Arena ---

/// Half the side length of the square arena (meters).
pub const ARENA_HALF_SIZE: f32 = 60.0;

/// Ground height.
pub const GROUND_Y: f32 = 0.0;

/// Projectiles above this height have left the playable volume.
pub const ARENA_CEILING: f32 = 40.0;

// --- Combat resolution ---

/// Minimum cosine between facing and target direction for a melee hit
/// (roughly a 70 degree half-angle).
pub const MELEE_CONE_COS: f32 = 0.3;

/// Chance a blocking target negates a melee strike.
pub const MELEE_BLOCK_CHANCE: f64 = 0.45;

/// Chance a blocking target negates a ranged hit.
pub const RANGED_BLOCK_CHANCE: f64 = 0.30;

/// Chance a blocking target negates a hostile AI projectile.
/// Matches the melee rate rather than `RANGED_BLOCK_CHANCE`; kept as
/// observed pending balance review.
pub const HOSTILE_PROJECTILE_BLOCK_CHANCE: f64 = 0.45;

/// Stun applied to a unit struck by an unblocked hit (seconds).
pub const HIT_STUN_SECS: f32 = 0.25;

/// Stun applied to a blocker whose block absorbed a hit (seconds).
pub const BLOCK_STUN_SECS: f32 = 0.15;

/// Knockback distance on an unblocked hit (meters).
pub const KNOCKBACK_DISTANCE: f32 = 0.6;

/// Contact distance for single-target projectiles (meters).
pub const PROJECTILE_CONTACT_RADIUS: f32 = 0.8;

// --- Attack timing ---

/// Normalized swing progress at which the strike window opens.
pub const HIT_WINDOW_START: f32 = 0.25;

/// Normalized swing progress at which the strike window closes.
pub const HIT_WINDOW_END: f32 = 0.55;

// --- AI ---

/// Turn rate multiplier: yaw moves this fraction of the error per second.
pub const TURN_RATE: f32 = 8.0;

/// Ranged units back off when an enemy is closer than this (meters).
pub const RANGED_MIN_DISTANCE: f32 = 6.0;

/// Fraction of attack range ranged units try to stay inside.
pub const RANGED_ENGAGE_FRACTION: f32 = 0.9;

/// Melee units farther than this from their target move at charge speed.
pub const CHARGE_DISTANCE: f32 = 6.0;

/// Speed multiplier while charging in.
pub const CHARGE_SPEED_MULT: f32 = 1.35;

/// Weight of the sideways component in melee strafe-mix.
pub const MELEE_STRAFE_WEIGHT: f32 = 0.45;

/// Weight of forward pressure in melee strafe-mix.
pub const MELEE_PRESSURE_WEIGHT: f32 = 0.35;

/// Randomized strafe flip interval (seconds).
pub const STRAFE_FLIP_MIN_SECS: f32 = 1.5;
pub const STRAFE_FLIP_MAX_SECS: f32 = 3.5;

/// AI units keep a live target this long before re-picking the nearest.
pub const RETARGET_SECS: f32 = 0.75;

/// Shield units roll to block at this rate per second near an enemy.
pub const BLOCK_ROLL_RATE: f64 = 0.7;

/// An enemy must be this close for a shield unit to consider blocking.
pub const BLOCK_TRIGGER_DISTANCE: f32 = 4.0;

/// Duration band of an AI block (seconds).
pub const AI_BLOCK_MIN_SECS: f32 = 0.8;
pub const AI_BLOCK_MAX_SECS: f32 = 1.6;

/// Movement speed multiplier while blocking.
pub const BLOCK_MOVE_MULT: f32 = 0.4;

/// Movement speed multiplier while attacking.
pub const ATTACK_MOVE_MULT: f32 = 0.5;

/// Same-team units closer than this push apart (meters).
pub const AVOIDANCE_DISTANCE: f32 = 1.2;

/// Strength of the separation push (m/s at full overlap).
pub const AVOIDANCE_STRENGTH: f32 = 3.0;

/// Following allies engage enemies within this radius of themselves.
pub const ALLY_ENGAGE_RADIUS: f32 = 18.0;

/// Following allies stop moving when this close to their slot.
pub const FOLLOW_SLOT_TOLERANCE: f32 = 1.0;

/// AI aim spread (radians) at point blank and per meter of distance.
pub const AIM_SPREAD_BASE: f32 = 0.02;
pub const AIM_SPREAD_PER_METER: f32 = 0.004;

/// Projectile defaults.
pub const ARROW_SPEED: f32 = 28.0;
pub const BOLT_SPEED: f32 = 20.0;
pub const PROJECTILE_LIFETIME_SECS: f32 = 3.0;

/// Height at which projectiles are launched.
pub const PROJECTILE_LAUNCH_HEIGHT: f32 = 1.4;

/// Length of the rendered projectile streak, in seconds of flight.
pub const PROJECTILE_TRAIL_SECS: f32 = 0.05;

// --- Player ---

pub const PLAYER_MAX_STAMINA: f32 = 100.0;
pub const STAMINA_REGEN_PER_SEC: f32 = 18.0;
pub const SPRINT_MULT: f32 = 1.6;
pub const SPRINT_DRAIN_PER_SEC: f32 = 22.0;
pub const BLOCK_DRAIN_PER_SEC: f32 = 14.0;
pub const ATTACK_STAMINA_COST: f32 = 8.0;
/// Attacks cannot start below this stamina.
pub const ATTACK_MIN_STAMINA: f32 = 10.0;
pub const PLAYER_ATTACK_COOLDOWN_SECS: f32 = 0.6;
pub const JUMP_VELOCITY: f32 = 6.5;
pub const GRAVITY: f32 = 18.0;
/// Player yaw follows the camera at this rate.
pub const PLAYER_TURN_RATE: f32 = 14.0;

// --- Dash ---

pub const DASH_STAMINA_COST: f32 = 20.0;
pub const LEAP_SPEED: f32 = 14.0;
pub const LEAP_DURATION_SECS: f32 = 0.55;
pub const LEAP_LANDING_RADIUS: f32 = 3.5;
pub const CHARGE_DASH_SPEED: f32 = 18.0;
pub const CHARGE_DASH_DURATION_SECS: f32 = 0.45;
pub const CHARGE_DASH_HIT_RADIUS: f32 = 1.6;
pub const CHARGE_DASH_STUN_SECS: f32 = 1.0;
pub const ROLL_SPEED: f32 = 12.0;
pub const ROLL_DURATION_SECS: f32 = 0.35;
pub const TELEPORT_DISTANCE: f32 = 8.0;
pub const TELEPORT_INVULNERABLE_SECS: f32 = 0.2;

// --- Camera ---

pub const CAMERA_DEFAULT_DISTANCE: f32 = 8.0;
pub const CAMERA_MIN_DISTANCE: f32 = 3.0;
pub const CAMERA_MAX_DISTANCE: f32 = 16.0;
pub const CAMERA_DEFAULT_PITCH: f32 = 0.35;
pub const CAMERA_MIN_PITCH: f32 = -0.2;
pub const CAMERA_MAX_PITCH: f32 = 1.2;
pub const MOUSE_SENSITIVITY: f32 = 0.004;
pub const WHEEL_SENSITIVITY: f32 = 0.01;
/// Fraction of the gap to the desired position closed per second.
pub const CAMERA_FOLLOW_RATE: f32 = 10.0;
pub const CAMERA_EYE_HEIGHT: f32 = 1.6;
/// Shake impulse per point of damage taken, and its exponential decay rate.
pub const SHAKE_PER_DAMAGE: f32 = 0.02;
pub const SHAKE_MAX: f32 = 0.6;
pub const SHAKE_DECAY: f32 = 6.0;

// --- Abilities ---

pub const GROUND_SLAM_RADIUS: f32 = 5.0;
pub const GROUND_SLAM_STUN_SECS: f32 = 1.5;
pub const SHIELD_BASH_RADIUS: f32 = 3.0;
pub const SHIELD_BASH_STUN_SECS: f32 = 2.2;
pub const METEOR_RANGE: f32 = 8.0;
pub const METEOR_RADIUS: f32 = 6.0;
pub const VOLLEY_ARROWS: u32 = 5;
pub const VOLLEY_FAN_RADIANS: f32 = 0.6;
pub const SANCTUARY_RADIUS: f32 = 10.0;
pub const VANISH_STEALTH_SECS: f32 = 4.0;
pub const BACKSTAB_BUFF_SECS: f32 = 6.0;
pub const BACKSTAB_MULTIPLIER: f32 = 3.0;
pub const RAISE_DEAD_RADIUS: f32 = 10.0;
pub const RAISE_DEAD_MAX: usize = 3;

// --- Spawning ---

/// Distance between formation rows (meters).
pub const ROW_SEPARATION: f32 = 3.0;
/// Lateral spacing between formation slots (meters).
pub const UNIT_SPACING: f32 = 1.8;
/// Random jitter applied to formation slots (meters).
pub const FORMATION_JITTER: f32 = 0.3;
/// Stat variance applied to spawned units (fraction).
pub const STAT_VARIANCE: f32 = 0.15;
/// Front row distance from the arena center for each side (meters).
pub const ALLY_FRONT_Z: f32 = -8.0;
pub const ENEMY_FRONT_Z: f32 = 12.0;
/// Player start position.
pub const PLAYER_START_Z: f32 = -12.0;

/// Delay between a wave being cleared and the next one arriving (seconds).
pub const WAVE_DELAY_SECS: f32 = 3.0;
/// Ring around the player where endless-mode enemies appear (meters).
pub const WAVE_RING_MIN: f32 = 18.0;
pub const WAVE_RING_MAX: f32 = 26.0;
/// Ring where reinforcing allies appear.
pub const REINFORCE_RING_MIN: f32 = 3.0;
pub const REINFORCE_RING_MAX: f32 = 6.0;
pub const WAVE_BASE_ENEMIES: u32 = 4;
pub const WAVE_ENEMIES_PER_WAVE: u32 = 2;

/// Corpses are swept this long after death (seconds).
pub const CORPSE_LINGER_SECS: f32 = 12.0;

// --- Presentation timers ---

pub const BANNER_SECS: f32 = 2.5;
pub const DAMAGE_FLASH_SECS: f32 = 0.3;

/// Highest supported unit level.
pub const MAX_LEVEL: u8 = 10;
