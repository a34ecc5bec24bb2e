//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the world, buffers input, runs all systems and
//! produces `WorldSnapshot`s. Completely headless and driven tick by tick,
//! which keeps it deterministic for a given seed and input sequence.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use invasion_core::commands::{InboundMessage, InputFrame};
use invasion_core::components::Vitals;
use invasion_core::config::SimConfig;
use invasion_core::enums::GameState;
use invasion_core::events::GameEvent;
use invasion_core::shared::SharedGameState;
use invasion_core::state::WorldSnapshot;
use invasion_core::types::{EntityId, SimTime};

use crate::scheduler::Scheduler;
use crate::systems;
use crate::systems::input::{Control, InputTracker, TickInput, WeaponCooldowns};
use crate::wave::WaveState;
use crate::world::World;
use crate::world_setup;

/// The simulation engine. Owns the world and all sim-side state; shares the
/// four cross-boundary scalars through [`SharedGameState`].
pub struct SimulationEngine {
    config: SimConfig,
    shared: Arc<SharedGameState>,
    world: World,
    player: Option<EntityId>,
    /// Advances only while playing.
    time: SimTime,
    /// Every tick, in any state.
    frame: u64,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    wave: WaveState,
    input: InputTracker,
    cooldowns: WeaponCooldowns,
    facing_right: bool,
    events: Vec<GameEvent>,
    despawn_buffer: Vec<EntityId>,
    exit_requested: bool,
}

impl SimulationEngine {
    /// Create an engine in the `Menu` state with a freshly built world.
    pub fn new(config: SimConfig, shared: Arc<SharedGameState>) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = Self {
            config,
            shared,
            world: World::new(),
            player: None,
            time: SimTime::default(),
            frame: 0,
            rng,
            scheduler: Scheduler::new(),
            wave: WaveState::default(),
            input: InputTracker::default(),
            cooldowns: WeaponCooldowns::default(),
            facing_right: true,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            exit_requested: false,
        };
        engine.reset_game();
        engine
    }

    /// Buffer an input frame for the next tick.
    pub fn queue_input(&mut self, frame: InputFrame) {
        self.input.queue(frame);
    }

    /// Dispatch one inbound message. Messages not meant for the simulation
    /// are ignored.
    pub fn handle_message(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::Input(frame) => self.queue_input(frame),
            InboundMessage::ExitGame => {
                info!("exit requested by presentation");
                self.exit_requested = true;
            }
            InboundMessage::Other(value) => {
                debug!(%value, "ignoring message not addressed to the simulation");
            }
        }
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Input and state transitions are processed in every state; the world
    /// only moves while `Playing`.
    pub fn tick(&mut self) -> WorldSnapshot {
        let input = self.input.sample();
        let state = self.shared.game_state();
        if let Some(control) = systems::input::control(state, input.pressed) {
            self.apply_control(control);
        }

        if self.shared.game_state() == GameState::Playing {
            self.run_systems(&input);
            self.time.advance();
        }
        self.sync_player_health();

        self.frame += 1;
        systems::snapshot::build_snapshot(
            &self.world,
            self.frame,
            &self.time,
            self.shared.view(),
            &self.wave,
            self.facing_right,
        )
    }

    /// Take the discrete events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The quit key was pressed or an exit message arrived.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Reinitialize the world: new platforms and player, wave 1, zero score,
    /// full health, fresh timers. Does not change the game state.
    pub fn reset_game(&mut self) {
        self.world.clear();
        let player = world_setup::setup_world(&mut self.world, &mut self.rng, &self.config);
        self.player = Some(player);

        self.time = SimTime::default();
        self.wave = WaveState::default();
        self.scheduler.clear();
        systems::director::arm_spawners(&mut self.scheduler, self.time.tick, self.wave.number);
        self.cooldowns = WeaponCooldowns::default();
        self.facing_right = true;

        self.shared.reset_player();
        if let Some(body) = self.world.body(player) {
            self.shared.set_player_position(body.bounds.pos);
        }
        debug!(entities = self.world.len(), "world reset");
    }

    pub fn game_state(&self) -> GameState {
        self.shared.game_state()
    }

    pub fn shared(&self) -> &Arc<SharedGameState> {
        &self.shared
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulation time; frozen outside `Playing`.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Ticks processed in any state.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Mutable world access for setting up test scenarios.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn wave_mut(&mut self) -> &mut WaveState {
        &mut self.wave
    }

    /// Lets tests stop the spawners so random enemies stay out of a scenario.
    #[cfg(test)]
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    fn apply_control(&mut self, control: Control) {
        match control {
            Control::Start => {
                self.reset_game();
                if self.shared.transition(GameState::Menu, GameState::Playing) {
                    info!("game started");
                }
            }
            Control::Restart => {
                self.reset_game();
                if self.shared.transition(GameState::GameOver, GameState::Playing) {
                    info!("game restarted");
                }
            }
            Control::Pause => {
                if self.shared.transition(GameState::Playing, GameState::Paused) {
                    info!(tick = self.time.tick, "game paused");
                }
            }
            Control::Resume => {
                if self.shared.transition(GameState::Paused, GameState::Playing) {
                    info!(tick = self.time.tick, "game resumed");
                }
            }
            Control::Quit => {
                info!(state = ?self.shared.game_state(), "quit requested");
                self.exit_requested = true;
                self.events.push(GameEvent::ExitGame);
            }
        }
    }

    /// Copy the shared health into the player's `Vitals` so the player's
    /// entity view agrees with the HUD.
    fn sync_player_health(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        if let Some(mut vitals) = self.world.get_mut::<Vitals>(player) {
            vitals.health = self.shared.health();
        }
    }

    /// Run all systems in order for one playing tick.
    fn run_systems(&mut self, input: &TickInput) {
        let Some(player) = self.player else {
            return;
        };
        let now_tick = self.time.tick;
        let now_secs = self.time.elapsed_secs;

        // 1. Player input and physics
        systems::input::apply_movement(&mut self.world, player, input, &mut self.facing_right);
        let shots = systems::input::fire_weapons(
            &mut self.world,
            player,
            input,
            &mut self.cooldowns,
            now_secs,
            self.facing_right,
        );
        if !shots.is_empty() {
            debug!(count = shots.len(), "weapon fired");
        }
        if let Some(position) =
            systems::physics::run(&mut self.world, player, self.config.world_width)
        {
            self.shared.set_player_position(position);
        }

        // 2. Enemies and contact damage
        systems::combat::update_enemies(
            &mut self.world,
            &self.shared,
            self.config.world_width,
            now_secs,
            self.config.contact_damage_cooldown_secs,
            &mut self.despawn_buffer,
        );
        if self.shared.game_state() == GameState::GameOver {
            info!(score = self.shared.score(), wave = self.wave.number, "game over");
        }

        // 3. Projectiles against enemies
        let report = systems::combat::update_projectiles(
            &mut self.world,
            &self.shared,
            &mut self.wave,
            &mut self.events,
            self.config.world_width,
            self.config.world_height,
        );
        if report.wave_target_reached {
            systems::director::schedule_wave_advance(&mut self.scheduler, now_tick);
        }

        // 4. Powerups
        if let Some(generation) =
            systems::pickups::run(&mut self.world, player, &self.shared, &mut self.events)
        {
            systems::director::schedule_invincibility_expiry(&mut self.scheduler, now_tick, generation);
        }

        // 5. Timers
        systems::director::run(
            &mut self.world,
            &mut self.rng,
            &self.config,
            &mut self.scheduler,
            &mut self.wave,
            &mut self.events,
            now_tick,
        );
    }
}
