//! warband: headless battle runner.
//!
//! Runs one battle with a scripted autopilot hero and prints the battle
//! result as JSON.
//!
//! Usage:
//!   warband --class rogue --seed 7
//!   warband --config battle.json --fast --max-secs 300

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use glam::Vec2;
use log::{debug, info, LevelFilter};

use warband_core::commands::BattleCommand;
use warband_core::components::{Health, Pose, Unit, UnitState};
use warband_core::config::BattleConfig;
use warband_core::constants::MOUSE_SENSITIVITY;
use warband_core::enums::{BattleMode, Team, UnitClass};
use warband_core::events::VisualEffect;
use warband_core::input::{Key, MouseButton};
use warband_core::presentation::{CameraView, Presentation, PresentationError};
use warband_core::types::{ground_distance, wrap_angle, yaw_towards, Transform, UnitId};
use warband_sim::{BattleEngine, HudThrottle, LogSink};

const FRAME_SECS: f32 = 1.0 / 60.0;
/// Enemies closer than this get the class ability.
const ABILITY_TRIGGER_DISTANCE: f32 = 6.0;

/// Run a WARBAND battle without a renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Battle config JSON (defaults are used for anything it omits)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the config seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hero class (warrior, knight, archer, mage, cleric, rogue, necromancer)
    #[arg(long)]
    class: Option<String>,

    /// Battle mode (skirmish or endless)
    #[arg(long)]
    mode: Option<String>,

    /// Stop after this much simulated time
    #[arg(long, default_value_t = 600.0)]
    max_secs: f64,

    /// Step at a fixed 60 Hz without sleeping
    #[arg(long)]
    fast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let hud_interval = config.hud_interval_ms;
    info!(
        "running {:?} as {:?} L{} (seed {})",
        config.mode, config.player_class, config.player_level, config.seed
    );

    let mut engine = BattleEngine::new(config, Box::new(LogSink));
    engine.init();

    let mut scene = HeadlessScene::default();
    let mut throttle = HudThrottle::new(hud_interval);
    let frame = Duration::from_secs_f32(FRAME_SECS);
    let mut last = Instant::now();

    while !engine.is_over() && engine.time().elapsed_secs < args.max_secs {
        let start = Instant::now();

        autopilot(&mut engine);

        let dt = if args.fast {
            FRAME_SECS
        } else {
            let dt = start.duration_since(last).as_secs_f32();
            last = start;
            dt
        };
        engine.update(dt);
        engine.render(&mut scene);

        if throttle.ready(Instant::now()) {
            let hud = engine.hud_state();
            info!(
                "t={:.1}s hp {:.0}/{:.0} stamina {:.0} | allies {} enemies {} | kills {} wave {}",
                hud.time.elapsed_secs,
                hud.player.health,
                hud.player.max_health,
                hud.player.stamina,
                hud.allies_alive,
                hud.enemies_alive,
                hud.kills,
                hud.wave,
            );
        }

        if !args.fast {
            let elapsed = start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
    }

    if !engine.is_over() {
        info!("time limit reached after {:.0}s", engine.time().elapsed_secs);
    }
    debug!(
        "scene received {} poses, {} effects, {} pose failures",
        scene.poses, scene.effects, scene.failures
    );
    if let Some(camera) = scene.camera {
        debug!("final camera at {} looking at {}", camera.position, camera.look_at);
    }

    let result = engine.battle_result();
    engine.dispose();
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

fn load_config(args: &Args) -> Result<BattleConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            BattleConfig::from_json_str(&json)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => BattleConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(class) = &args.class {
        config.player_class = parse_class(class)?;
    }
    if let Some(mode) = &args.mode {
        config.mode = match mode.to_ascii_lowercase().as_str() {
            "skirmish" => BattleMode::Skirmish,
            "endless" => BattleMode::Endless,
            other => bail!("unknown mode {other:?} (expected skirmish or endless)"),
        };
    }
    config.validate().context("invalid battle config")?;
    Ok(config)
}

fn parse_class(name: &str) -> Result<UnitClass> {
    UnitClass::ALL
        .into_iter()
        .find(|class| class.name().eq_ignore_ascii_case(name))
        .with_context(|| format!("unknown class {name:?}"))
}

/// Hold forward and attack, steer the camera at the nearest enemy, and
/// fire the ability when enemies close in.
fn autopilot(engine: &mut BattleEngine) {
    let Some(player) = engine.player() else {
        return;
    };
    let Ok(hero) = engine.world().get::<&Transform>(player).map(|t| *t) else {
        return;
    };

    let nearest = engine
        .world()
        .query::<(&Unit, &Transform, &Health, &UnitState)>()
        .iter()
        .filter(|(_, (unit, _, health, state))| {
            unit.team == Team::Enemy && health.is_alive() && !state.is_dead()
        })
        .map(|(_, (_, transform, _, _))| transform.position)
        .min_by(|a, b| {
            ground_distance(hero.position, *a).total_cmp(&ground_distance(hero.position, *b))
        });

    let camera_yaw = engine.state().camera.yaw;
    let Some(target) = nearest else {
        let input = engine.input_mut();
        input.release(Key::Forward);
        input.release_button(MouseButton::Primary);
        return;
    };
    let fire = should_fire_ability(engine, ground_distance(hero.position, target));

    let input = engine.input_mut();
    let turn = wrap_angle(yaw_towards(hero.position, target) - camera_yaw);
    input.add_mouse_delta(Vec2::new(turn / MOUSE_SENSITIVITY, 0.0));
    input.press(Key::Forward);
    input.press_button(MouseButton::Primary);

    if fire {
        engine.queue_command(BattleCommand::TriggerAbility);
    }
}

fn should_fire_ability(engine: &BattleEngine, distance: f32) -> bool {
    engine.state().ability_cooldown <= 0.0 && distance < ABILITY_TRIGGER_DISTANCE
}

/// Presentation stand-in that only counts what it is sent.
#[derive(Default)]
struct HeadlessScene {
    poses: u64,
    effects: u64,
    failures: u64,
    camera: Option<CameraView>,
}

impl Presentation for HeadlessScene {
    fn apply_pose(
        &mut self,
        _unit: UnitId,
        transform: &Transform,
        _pose: &Pose,
    ) -> Result<(), PresentationError> {
        if !transform.position.is_finite() {
            self.failures += 1;
            return Err(PresentationError::Unavailable("non-finite transform".into()));
        }
        self.poses += 1;
        Ok(())
    }

    fn play_effect(&mut self, effect: &VisualEffect) {
        self.effects += 1;
        if let VisualEffect::Burst { position, radius } = effect {
            debug!("burst at {position} r={radius}");
        }
    }

    fn update_camera(&mut self, camera: &CameraView) {
        self.camera = Some(*camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use warband_core::events::NullSink;

    #[test]
    fn test_ability_fires_only_when_ready_and_close() {
        let mut engine = BattleEngine::new(BattleConfig::default(), Box::new(NullSink));
        engine.init();
        assert!(should_fire_ability(&engine, 3.0));
        assert!(!should_fire_ability(&engine, ABILITY_TRIGGER_DISTANCE + 1.0));

        assert!(engine.activate_ability());
        assert!(!should_fire_ability(&engine, 3.0));
    }

    #[test]
    fn test_autopilot_advances_on_far_enemies() {
        let mut engine = BattleEngine::new(BattleConfig::default(), Box::new(NullSink));
        engine.init();
        autopilot(&mut engine);
        engine.update(FRAME_SECS);
        assert_eq!(engine.state().ability_cooldown, 0.0);
        assert!(engine.input_mut().is_down(Key::Forward));
    }
}
