//! Frame-aligned timer service.
//!
//! Timers carry a [`TimerEvent`] instead of a callback. `advance` returns
//! every event that came due during the frame, in scheduling order, for the
//! engine to dispatch within the same tick. A handle's interval never
//! changes; to change a rate, cancel the handle and schedule a new one.

use hecs::Entity;

/// Work a timer enqueues when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    SpawnEnemy,
    FireDisc,
    ClearHitFlash(Entity),
}

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    event: TimerEvent,
    interval_ms: f64,
    remaining_ms: f64,
    repeating: bool,
    paused: bool,
}

/// Shortest interval a timer may have; keeps `advance` finite.
const MIN_INTERVAL_MS: f64 = 1.0;

#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_repeating(&mut self, interval_ms: f64, event: TimerEvent) -> TimerHandle {
        self.insert(interval_ms, event, true)
    }

    pub fn schedule_once(&mut self, delay_ms: f64, event: TimerEvent) -> TimerHandle {
        self.insert(delay_ms, event, false)
    }

    fn insert(&mut self, interval_ms: f64, event: TimerEvent, repeating: bool) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let interval_ms = interval_ms.max(MIN_INTERVAL_MS);
        self.timers.push(Timer {
            handle,
            event,
            interval_ms,
            remaining_ms: interval_ms,
            repeating,
            paused: false,
        });
        handle
    }

    pub fn pause(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.find_mut(handle) {
            timer.paused = true;
        }
    }

    pub fn resume(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.find_mut(handle) {
            timer.paused = false;
        }
    }

    /// Remove the timer. Cancelling an expired or unknown handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    /// Whether the handle is still scheduled (paused or not).
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn is_paused(&self, handle: TimerHandle) -> bool {
        self.timers
            .iter()
            .any(|t| t.handle == handle && t.paused)
    }

    pub fn interval_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.interval_ms)
    }

    /// Advance all running timers and collect the events that came due.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<TimerEvent> {
        let mut fired = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| !t.paused) {
            timer.remaining_ms -= delta_ms;
            while timer.remaining_ms <= 0.0 {
                fired.push(timer.event);
                if !timer.repeating {
                    break;
                }
                timer.remaining_ms += timer.interval_ms;
            }
        }
        self.timers
            .retain(|t| t.repeating || t.paused || t.remaining_ms > 0.0);
        fired
    }

    fn find_mut(&mut self, handle: TimerHandle) -> Option<&mut Timer> {
        self.timers.iter_mut().find(|t| t.handle == handle)
    }
}
