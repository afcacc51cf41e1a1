use std::time::{Duration, Instant};

use crate::foundation::error::BloomResult;

/// Returned by a tick callback to keep or cancel the repeating timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// One-shot start delay followed by a fixed tick interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerSchedule {
    pub start_delay: Duration,
    pub interval: Duration,
}

/// Scheduled repeating callback.
///
/// Ticks run strictly one after another; the next tick is only scheduled once the
/// current callback returns. A callback error stops the timer and is propagated.
pub trait Timer {
    /// Run `tick` until it returns [`TickControl::Stop`]; returns the number of ticks run.
    fn run(
        &mut self,
        schedule: TimerSchedule,
        tick: &mut dyn FnMut() -> BloomResult<TickControl>,
    ) -> BloomResult<u64>;
}

/// When the tick following one scheduled at `prev_due` should run.
///
/// A late tick (its slot already passed at `now`) runs immediately and restarts the
/// schedule from `now`, so a slow callback never triggers a burst of catch-up ticks.
pub fn next_deadline(prev_due: Instant, interval: Duration, now: Instant) -> Instant {
    let due = prev_due + interval;
    if due > now { due } else { now }
}

/// Wall-clock paced timer.
///
/// A tick that comes due late runs immediately; ticks are never coalesced or dropped.
#[derive(Debug, Default)]
pub struct PacedTimer;

impl Timer for PacedTimer {
    fn run(
        &mut self,
        schedule: TimerSchedule,
        tick: &mut dyn FnMut() -> BloomResult<TickControl>,
    ) -> BloomResult<u64> {
        std::thread::sleep(schedule.start_delay);

        let mut ticks = 0u64;
        let mut next_due = Instant::now();
        loop {
            ticks += 1;
            if tick()? == TickControl::Stop {
                return Ok(ticks);
            }

            let now = Instant::now();
            next_due = next_deadline(next_due, schedule.interval, now);
            if next_due > now {
                std::thread::sleep(next_due - now);
            }
        }
    }
}

/// Runs ticks back to back, ignoring the schedule. Used for offline rendering.
#[derive(Debug, Default)]
pub struct UnpacedTimer;

impl Timer for UnpacedTimer {
    fn run(
        &mut self,
        _schedule: TimerSchedule,
        tick: &mut dyn FnMut() -> BloomResult<TickControl>,
    ) -> BloomResult<u64> {
        let mut ticks = 0u64;
        loop {
            ticks += 1;
            if tick()? == TickControl::Stop {
                return Ok(ticks);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/timer.rs"]
mod tests;
