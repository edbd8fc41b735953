//! Per-run simulation state.
//!
//! Everything a run owns lives here and is passed by reference into each
//! system. Dropping the context discards the run: entities, timers, pick
//! counts, and the open upgrade episode.

use hecs::{Entity, World};
use tracing::info;

use claws_core::components::{EnemyTunables, PlayerStats, SpawnOrder};
use claws_core::config::Tuning;
use claws_core::enums::RunState;
use claws_core::events::GameEvent;
use claws_core::types::Position;
use claws_rules::clock::RunClock;
use claws_rules::fsm::RunStateMachine;
use claws_rules::leveling;
use claws_rules::offer::UpgradeOffer;
use claws_rules::upgrades::PickCounts;

use crate::systems::contact::ContactCooldown;
use crate::timers::{Scheduler, TimerEvent, TimerHandle};
use crate::world_setup;

/// Held movement axes, each in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub x: i8,
    pub y: i8,
}

pub struct RunContext {
    pub world: World,
    pub fsm: RunStateMachine,
    pub clock: RunClock,
    pub scheduler: Scheduler,
    pub spawn_timer: Option<TimerHandle>,
    pub fire_timer: Option<TimerHandle>,

    pub player: Entity,
    pub stats: PlayerStats,
    pub movement: MoveInput,
    pub contact: ContactCooldown,

    pub enemy_tunables: EnemyTunables,
    pub picks: PickCounts,
    /// Open upgrade episode. Some exactly while `SelectingUpgrade`.
    pub offer: Option<UpgradeOffer>,

    pub kills: u32,
    next_spawn_order: u64,
    pub events: Vec<GameEvent>,
    pub despawn_buffer: Vec<Entity>,
}

impl RunContext {
    /// Set up a fresh run: player at the start position, spawn timer armed,
    /// fire timer running at the starting fire rate.
    pub fn new(tuning: &Tuning) -> Self {
        let mut world = World::new();
        let player = world_setup::spawn_player(&mut world, tuning);
        let stats = leveling::starting_stats(tuning);

        let mut ctx = Self {
            world,
            fsm: RunStateMachine::new(),
            clock: RunClock::new(),
            scheduler: Scheduler::new(),
            spawn_timer: None,
            fire_timer: None,
            player,
            stats,
            movement: MoveInput::default(),
            contact: ContactCooldown::default(),
            enemy_tunables: EnemyTunables::default(),
            picks: PickCounts::new(),
            offer: None,
            kills: 0,
            next_spawn_order: 0,
            events: vec![GameEvent::RunStarted],
            despawn_buffer: Vec::new(),
        };
        crate::systems::spawner::arm_spawn_timer(&mut ctx, tuning);
        ctx.reschedule_fire_timer();
        info!(
            hp = ctx.stats.hp,
            fire_rate_ms = ctx.stats.fire_rate_ms,
            "run started"
        );
        ctx
    }

    pub fn state(&self) -> RunState {
        self.fsm.state()
    }

    pub fn player_position(&self) -> Position {
        self.world
            .get::<&Position>(self.player)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn next_spawn_order(&mut self) -> SpawnOrder {
        let order = SpawnOrder(self.next_spawn_order);
        self.next_spawn_order += 1;
        order
    }

    /// Replace the fire timer with one at the current fire rate. Rates are
    /// never changed in place.
    pub fn reschedule_fire_timer(&mut self) {
        if let Some(old) = self.fire_timer.take() {
            self.scheduler.cancel(old);
        }
        if self.fsm.is_dead() {
            return;
        }
        let handle = self
            .scheduler
            .schedule_repeating(self.stats.fire_rate_ms, TimerEvent::FireDisc);
        if !self.fsm.simulation_runs() {
            self.scheduler.pause(handle);
        }
        self.fire_timer = Some(handle);
    }

    /// Hold spawning and firing without losing their progress.
    pub fn pause_gameplay_timers(&mut self) {
        for handle in [self.spawn_timer, self.fire_timer].into_iter().flatten() {
            self.scheduler.pause(handle);
        }
    }

    pub fn resume_gameplay_timers(&mut self) {
        for handle in [self.spawn_timer, self.fire_timer].into_iter().flatten() {
            self.scheduler.resume(handle);
        }
    }

    /// Permanently stop spawning and firing for this run.
    pub fn cancel_gameplay_timers(&mut self) {
        for handle in [self.spawn_timer.take(), self.fire_timer.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(handle);
        }
    }
}
