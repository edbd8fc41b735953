//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the RNG, the command queue, and at most one run.
//! It processes player commands, steps every system once per frame, and
//! produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use claws_core::commands::PlayerCommand;
use claws_core::config::{ConfigError, Tuning};
use claws_core::constants::FRAME_MS;
use claws_core::enums::RunState;
use claws_core::state::GameStateSnapshot;
use claws_core::types::SimTime;
use claws_rules::fsm::RunInput;

use crate::context::{MoveInput, RunContext};
use crate::systems;
use crate::timers::TimerEvent;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Milliseconds covered by one `tick`.
    pub frame_ms: f64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_ms: FRAME_MS,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Starts at the main menu with no run.
pub struct SimulationEngine {
    tuning: Tuning,
    frame_ms: f64,
    rng: ChaCha8Rng,
    time: SimTime,
    run: Option<RunContext>,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    ///
    /// Fails if the tuning or the frame length cannot be simulated.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        if !config.frame_ms.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "frame_ms",
                value: config.frame_ms,
            });
        }
        if config.frame_ms <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "frame_ms",
                value: config.frame_ms,
            });
        }

        Ok(Self {
            tuning: config.tuning,
            frame_ms: config.frame_ms,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            time: SimTime::default(),
            run: None,
            command_queue: VecDeque::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process queued commands, advance one frame, and return the snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();
        self.step_frame();

        let events = self
            .run
            .as_mut()
            .map(|ctx| std::mem::take(&mut ctx.events))
            .unwrap_or_default();
        systems::snapshot::build_snapshot(&self.time, self.run.as_ref(), events)
    }

    /// Current run state, or `None` at the main menu.
    pub fn run_state(&self) -> Option<RunState> {
        self.run.as_ref().map(RunContext::state)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Read-only access to the active run.
    pub fn run(&self) -> Option<&RunContext> {
        self.run.as_ref()
    }

    /// Mutable access to the active run (for tests that stage scenarios).
    #[cfg(test)]
    pub fn run_mut(&mut self) -> Option<&mut RunContext> {
        self.run.as_mut()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if self.run.is_none() {
                    self.start_run();
                } else {
                    debug!("start ignored: run already active");
                }
            }
            PlayerCommand::Restart => {
                // Only a finished run accepts the restart; the accepted run
                // is then replaced wholesale.
                let accepted = self
                    .run
                    .as_mut()
                    .and_then(|ctx| ctx.fsm.handle(RunInput::Restart))
                    .is_some();
                if accepted {
                    info!("restarting run");
                    self.start_run();
                } else {
                    debug!(state = ?self.run_state(), "restart ignored");
                }
            }
            PlayerCommand::ExitToMenu => {
                if matches!(
                    self.run_state(),
                    Some(RunState::Paused) | Some(RunState::Dead)
                ) {
                    info!("returning to main menu");
                    self.run = None;
                    self.time = SimTime::default();
                }
            }
            PlayerCommand::SetMovement { x, y } => {
                if !(-1..=1).contains(&x) || !(-1..=1).contains(&y) {
                    warn!(x, y, "movement axes out of range, clamping");
                }
                if let Some(ctx) = self.run.as_mut() {
                    ctx.movement = MoveInput {
                        x: x.clamp(-1, 1),
                        y: y.clamp(-1, 1),
                    };
                }
            }
            PlayerCommand::MenuUp => {
                if let Some(ctx) = self.run.as_mut() {
                    systems::progression::cursor_up(ctx);
                }
            }
            PlayerCommand::MenuDown => {
                if let Some(ctx) = self.run.as_mut() {
                    systems::progression::cursor_down(ctx);
                }
            }
            PlayerCommand::Confirm => {
                let Some(ctx) = self.run.as_mut() else {
                    return;
                };
                match ctx.state() {
                    RunState::SelectingUpgrade => {
                        systems::progression::confirm(ctx, &mut self.rng, &self.tuning);
                    }
                    RunState::Paused => Self::apply_run_input(ctx, RunInput::Resume),
                    _ => {}
                }
            }
            PlayerCommand::TogglePause => {
                if let Some(ctx) = self.run.as_mut() {
                    let input = if ctx.state() == RunState::Paused {
                        RunInput::Resume
                    } else {
                        RunInput::Pause
                    };
                    Self::apply_run_input(ctx, input);
                }
            }
            PlayerCommand::Pause => {
                if let Some(ctx) = self.run.as_mut() {
                    Self::apply_run_input(ctx, RunInput::Pause);
                }
            }
            PlayerCommand::Resume => {
                if let Some(ctx) = self.run.as_mut() {
                    Self::apply_run_input(ctx, RunInput::Resume);
                }
            }
        }
    }

    fn apply_run_input(ctx: &mut RunContext, input: RunInput) {
        match ctx.fsm.handle(input) {
            Some(state) => info!(?input, ?state, "run state changed"),
            None => debug!(?input, state = ?ctx.state(), "transition rejected"),
        }
    }

    fn start_run(&mut self) {
        self.time = SimTime::default();
        self.run = Some(RunContext::new(&self.tuning));
    }

    /// Run one frame of the active run.
    ///
    /// While paused nothing advances. While selecting an upgrade only
    /// scene-level timers (hit flashes) progress. While dead the world is
    /// frozen apart from the same scene timers.
    fn step_frame(&mut self) {
        let Some(ctx) = self.run.as_mut() else {
            return;
        };
        if !ctx.fsm.scene_clock_runs() {
            return;
        }

        let frame_ms = self.frame_ms;
        let dt_secs = frame_ms / 1000.0;
        let tuning = &self.tuning;
        let rng = &mut self.rng;

        let state = ctx.state();
        ctx.clock.advance(frame_ms, state);

        for event in ctx.scheduler.advance(frame_ms) {
            match event {
                TimerEvent::SpawnEnemy => systems::spawner::on_spawn_timer(ctx, rng, tuning),
                TimerEvent::FireDisc => {
                    systems::targeting::fire(ctx);
                }
                TimerEvent::ClearHitFlash(target) => {
                    systems::combat::clear_hit_flash(ctx, target)
                }
            }
        }

        if ctx.fsm.simulation_runs() {
            systems::movement::move_player(ctx, tuning, dt_secs);
            systems::movement::move_enemies(ctx, dt_secs);
            systems::movement::move_projectiles(ctx, dt_secs);
            systems::projectiles::run(ctx, rng, tuning);
            systems::contact::run(ctx, tuning);
            if !ctx.fsm.is_dead() {
                systems::pickups::run(ctx, rng, tuning);
            }
        }
        systems::cleanup::run(ctx, tuning);

        self.time.advance(frame_ms);
    }
}
