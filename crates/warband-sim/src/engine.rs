//! Battle engine: the core of the game.
//!
//! `BattleEngine` owns the hecs ECS world, the seeded rng and all battle
//! state. Each `update` runs the system pipeline in a fixed order on a
//! clamped, variable timestep. Completely headless; the host drives it
//! through input, commands, `update` and `render`.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use warband_core::commands::BattleCommand;
use warband_core::components::{Health, Pose, Projectile};
use warband_core::config::BattleConfig;
use warband_core::constants::*;
use warband_core::enums::{AllyCommand, BattleMode, BattleOutcome, Severity, Team};
use warband_core::events::{CombatEvent, EventSink, VisualEffect};
use warband_core::input::InputState;
use warband_core::presentation::Presentation;
use warband_core::state::{BattleResult, HudSnapshot};
use warband_core::types::{SimTime, Transform, UnitId};

use crate::combat::unit_id;
use crate::game_state::{GameState, WaveQuotas};
use crate::systems;

/// Visual effects kept for a host that has not rendered recently.
const MAX_PENDING_EFFECTS: usize = 256;

/// The battle engine. Owns the ECS world and all battle state.
pub struct BattleEngine {
    config: BattleConfig,
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    state: GameState,
    player: Option<Entity>,
    input: InputState,
    command_queue: VecDeque<BattleCommand>,
    events: Vec<CombatEvent>,
    pending_effects: VecDeque<VisualEffect>,
    despawn_buffer: Vec<Entity>,
    sink: Box<dyn EventSink>,
    disposed: bool,
}

impl BattleEngine {
    /// Create an engine for `config`. Nothing is spawned until `init`.
    pub fn new(config: BattleConfig, sink: Box<dyn EventSink>) -> Self {
        let state = GameState::new(config.mode, config.player_class, config.player_level);
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world: World::new(),
            time: SimTime::default(),
            state,
            player: None,
            input: InputState::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            pending_effects: VecDeque::new(),
            despawn_buffer: Vec::new(),
            sink,
            disposed: false,
        }
    }

    /// Spawn the hero and both armies and start the battle. Idempotent.
    pub fn init(&mut self) {
        if self.disposed || self.state.started {
            return;
        }

        let player = systems::spawner::spawn_player(
            &mut self.world,
            self.config.player_class,
            self.config.player_level,
            Vec3::new(0.0, GROUND_Y, PLAYER_START_Z),
        );
        self.player = Some(player);

        let allies = systems::spawner::spawn_army(
            &mut self.world,
            &mut self.rng,
            &self.config.allies,
            Team::Ally,
            ALLY_FRONT_Z,
        );
        let enemies = systems::spawner::spawn_army(
            &mut self.world,
            &mut self.rng,
            &self.config.enemies,
            Team::Enemy,
            ENEMY_FRONT_Z,
        );
        systems::spawner::assign_follow_slots(&mut self.world);

        self.state.enemies_spawned_total += enemies.len() as u32;
        self.state.quotas = WaveQuotas {
            enemies: enemies.len() as u32,
            allies: allies.len() as u32,
        };
        self.state.started = true;
        self.state.show_banner("To battle!");
        self.sink.notify("The battle begins", Severity::Info);
        info!(
            "battle started: {:?} {:?} L{} with {} allies vs {} enemies (seed {})",
            self.config.mode,
            self.config.player_class,
            self.config.player_level,
            allies.len(),
            enemies.len(),
            self.config.seed
        );
    }

    /// Queue a command for the start of the next update.
    pub fn queue_command(&mut self, command: BattleCommand) {
        if !self.disposed {
            self.command_queue.push_back(command);
        }
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = BattleCommand>) {
        if !self.disposed {
            self.command_queue.extend(commands);
        }
    }

    /// Held-key and pointer input, written by the host between updates.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Advance the battle by `dt` seconds (clamped to the configured
    /// maximum). No-op before `init`, after the battle ends, or after
    /// `dispose`.
    pub fn update(&mut self, dt: f32) {
        if self.disposed || !self.state.started || self.state.over {
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(self.config.max_frame_dt);

        // 1. One-shot commands.
        self.process_commands();

        // 2. Player controller.
        systems::player::run(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            &mut self.input,
            self.player,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        self.drain_events();

        // 3. Friendly AI.
        systems::allies::run(
            &mut self.world,
            &mut self.rng,
            &self.state,
            self.player,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        self.drain_events();

        // 4. Hostile AI.
        systems::enemies::run(
            &mut self.world,
            &mut self.rng,
            &self.state,
            self.player,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        self.drain_events();

        // 5. Abilities.
        systems::abilities::update(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            dt,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        self.drain_events();

        // 6. Presentation timers.
        self.state.tick_presentation_timers(dt);

        // 7. End condition.
        self.evaluate_end_condition(dt);
        self.drain_events();

        systems::pose::run(&mut self.world, dt);
        systems::cleanup::run(&mut self.world, dt, &mut self.despawn_buffer);
        self.time.advance(dt);
    }

    /// Push poses, queued effects and the camera to the presentation
    /// layer. A failed pose skips that unit only.
    pub fn render(&mut self, presentation: &mut dyn Presentation) {
        if self.disposed {
            return;
        }
        for (entity, (transform, pose)) in self.world.query::<(&Transform, &Pose)>().iter() {
            if let Err(err) = presentation.apply_pose(unit_id(entity), transform, pose) {
                debug!("skipping pose update: {err}");
            }
        }
        for (_, (transform, projectile)) in self.world.query::<(&Transform, &Projectile)>().iter()
        {
            presentation.play_effect(&VisualEffect::Trail {
                from: transform.position - projectile.velocity * PROJECTILE_TRAIL_SECS,
                to: transform.position,
            });
        }
        for effect in self.pending_effects.drain(..) {
            presentation.play_effect(&effect);
        }
        presentation.update_camera(&self.state.camera.view());
    }

    /// Current HUD state.
    pub fn hud_state(&self) -> HudSnapshot {
        systems::snapshot::build_hud(&self.world, &self.time, &self.state, self.player)
    }

    /// Battle summary, recomputed from the units still standing.
    pub fn battle_result(&self) -> BattleResult {
        systems::snapshot::build_result(&self.world, &self.time, &self.state)
    }

    /// Fire the class ability right now. Returns false, changing nothing,
    /// if it cannot fire.
    pub fn activate_ability(&mut self) -> bool {
        if self.disposed || !self.state.started || self.state.over {
            return false;
        }
        let Some(player) = self.player else {
            return false;
        };
        let fired = systems::abilities::try_activate(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            player,
            &mut self.events,
        );
        self.drain_events();
        fired
    }

    /// Tear the battle down. Input detaches, every entity and queued
    /// effect is dropped, and later updates do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.input.detach();
        self.world.clear();
        self.command_queue.clear();
        self.events.clear();
        self.pending_effects.clear();
        self.despawn_buffer.clear();
        self.player = None;
        self.disposed = true;
        info!("battle disposed at {:.1}s", self.time.elapsed_secs);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_over(&self) -> bool {
        self.state.over
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only battle state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The hero's entity, once spawned.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Number of effects waiting for the next `render`.
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.len()
    }

    /// Mutable world access (for tests that stage scenarios).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mutable battle state (for tests).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Set a unit's position and facing (for tests).
    #[cfg(test)]
    pub fn place_unit(&mut self, entity: Entity, position: Vec3, yaw: f32) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
            transform.position = position;
            transform.yaw = yaw;
        }
        if let Ok(mut pose) = self.world.get::<&mut Pose>(entity) {
            pose.last_position = position;
        }
    }

    /// Set a unit's current and maximum health (for tests).
    #[cfg(test)]
    pub fn set_health(&mut self, entity: Entity, current: f32, max: f32) {
        if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
            health.current = current;
            health.max = max;
        }
    }

    /// Live units of `team` (for tests).
    #[cfg(test)]
    pub fn units_of(&self, team: Team) -> Vec<Entity> {
        self.world
            .query::<&warband_core::components::Unit>()
            .iter()
            .filter(|(_, unit)| unit.team == team)
            .map(|(e, _)| e)
            .collect()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                BattleCommand::ToggleAllyCommand => {
                    self.set_ally_command(self.state.ally_command.toggled());
                }
                BattleCommand::SetAllyCommand { command } => self.set_ally_command(command),
                BattleCommand::TriggerAbility => {
                    self.activate_ability();
                }
                BattleCommand::ToggleCameraMode => {
                    self.state.camera.first_person = !self.state.camera.first_person;
                    debug!("first person: {}", self.state.camera.first_person);
                }
            }
        }
    }

    fn set_ally_command(&mut self, command: AllyCommand) {
        if self.state.ally_command == command {
            return;
        }
        self.state.ally_command = command;
        let text = format!("Allies: {command:?}!");
        self.sink.notify(&text, Severity::Info);
        self.state.show_banner(text);
    }

    /// Turn this step's events into score, feedback and notifications.
    fn drain_events(&mut self) {
        for event in std::mem::take(&mut self.events) {
            match event {
                CombatEvent::Hit { position, .. } => {
                    self.push_effect(VisualEffect::Blood { position });
                }
                CombatEvent::Blocked { position, .. } => {
                    self.push_effect(VisualEffect::Sparks { position });
                }
                CombatEvent::Killed { team, class, .. } => {
                    let (text, severity) = match team {
                        Team::Enemy => {
                            self.state.kills += 1;
                            (format!("Enemy {} slain", class.name()), Severity::Success)
                        }
                        Team::Ally => (
                            format!("Allied {} has fallen", class.name()),
                            Severity::Warning,
                        ),
                        Team::Player => ("You have fallen".to_string(), Severity::Danger),
                    };
                    self.sink.notify(&text, severity);
                }
                CombatEvent::PlayerDamaged { damage } => {
                    systems::camera::add_shake(&mut self.state.camera, damage);
                    self.state.damage_flash = DAMAGE_FLASH_SECS;
                }
                CombatEvent::AbilityUsed { ability } => {
                    if let Some(position) = self.position_of(self.player) {
                        self.push_effect(VisualEffect::Burst {
                            position,
                            radius: 2.0,
                        });
                    }
                    self.sink.notify(&format!("{ability:?}!"), Severity::Info);
                }
                CombatEvent::Healed { target, .. } => {
                    if let Some(position) = self.position_of(entity_of(target)) {
                        self.push_effect(VisualEffect::Heal { position });
                    }
                }
                CombatEvent::Raised { class, .. } => {
                    self.sink
                        .notify(&format!("A {} rises to serve", class.name()), Severity::Success);
                }
                CombatEvent::WaveStarted { wave, enemies } => {
                    self.sink.notify(
                        &format!("Wave {wave}: {enemies} enemies approach"),
                        Severity::Warning,
                    );
                    self.state.show_banner(format!("Wave {wave}"));
                }
            }
        }
    }

    fn push_effect(&mut self, effect: VisualEffect) {
        if self.pending_effects.len() >= MAX_PENDING_EFFECTS {
            self.pending_effects.pop_front();
        }
        self.pending_effects.push_back(effect);
    }

    fn position_of(&self, entity: Option<Entity>) -> Option<Vec3> {
        let entity = entity?;
        self.world
            .get::<&Transform>(entity)
            .ok()
            .map(|t| t.position)
    }

    fn evaluate_end_condition(&mut self, dt: f32) {
        let player_alive = self
            .player
            .and_then(|p| self.world.get::<&Health>(p).ok().map(|h| h.is_alive()))
            .unwrap_or(false);
        if !player_alive {
            self.finish(BattleOutcome::Defeat);
            return;
        }

        let count = systems::snapshot::headcount(&self.world);
        if count.enemies > 0 || self.state.enemies_spawned_total == 0 {
            return;
        }

        match self.state.mode {
            BattleMode::Skirmish => self.finish(BattleOutcome::Victory),
            BattleMode::Endless => self.advance_waves(dt),
        }
    }

    fn advance_waves(&mut self, dt: f32) {
        let Some(remaining) = self.state.wave_transition else {
            self.state.wave_transition = Some(WAVE_DELAY_SECS);
            self.state
                .show_banner(format!("Wave {} cleared", self.state.wave));
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.state.wave_transition = Some(remaining);
            return;
        }

        self.state.wave_transition = None;
        self.state.wave += 1;
        let center = self
            .position_of(self.player)
            .unwrap_or(Vec3::new(0.0, GROUND_Y, PLAYER_START_Z));
        let (enemies, allies) =
            systems::spawner::spawn_wave(&mut self.world, &mut self.rng, self.state.wave, center);
        systems::spawner::assign_follow_slots(&mut self.world);

        self.state.enemies_spawned_total += enemies.len() as u32;
        self.state.quotas = WaveQuotas {
            enemies: enemies.len() as u32,
            allies: allies.len() as u32,
        };
        self.events.push(CombatEvent::WaveStarted {
            wave: self.state.wave,
            enemies: enemies.len() as u32,
        });
        info!(
            "wave {} spawned: {} enemies, {} reinforcements",
            self.state.wave,
            enemies.len(),
            allies.len()
        );
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        if self.state.over {
            return;
        }
        self.state.finish(outcome);
        let text = match outcome {
            BattleOutcome::Victory => "Victory!",
            BattleOutcome::Defeat => "Defeat",
        };
        self.state.show_banner(text);
        self.sink.notify(
            text,
            match outcome {
                BattleOutcome::Victory => Severity::Success,
                BattleOutcome::Defeat => Severity::Danger,
            },
        );
        info!(
            "battle over: {:?} after {:.1}s, {} kills",
            outcome, self.time.elapsed_secs, self.state.kills
        );
    }
}

fn entity_of(id: UnitId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
