//! Autoplay timer.
//!
//! `Autoplay` is a single-slot periodic timer. Starting a timer always
//! cancels whichever one was running, so at most one is ever pending. Each
//! start returns an `AutoplayHandle`; cancelling with a handle from an
//! earlier start is a no-op.
//!
//! Time is passed in by the caller rather than read from the clock, which
//! lets the event loop decide how to wait and keeps tests deterministic.

use std::time::{Duration, Instant};

/// Shortest accepted period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Token identifying one started timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoplayHandle(u64);

#[derive(Debug, Clone)]
struct Timer {
    id: u64,
    period: Duration,
    deadline: Instant,
}

/// Single-slot periodic timer.
#[derive(Debug, Clone, Default)]
pub struct Autoplay {
    slot: Option<Timer>,
    next_id: u64,
}

impl Autoplay {
    pub fn new() -> Self {
        Autoplay::default()
    }

    /// Starts a timer firing every `period` from `now`, replacing any
    /// running timer.
    pub fn start(&mut self, now: Instant, period: Duration) -> AutoplayHandle {
        self.cancel_all();
        let period = period.max(MIN_PERIOD);
        let id = self.next_id;
        self.next_id += 1;
        self.slot = Some(Timer {
            id,
            period,
            deadline: now + period,
        });
        AutoplayHandle(id)
    }

    /// Cancels the timer identified by `handle`. Returns false if that timer
    /// is no longer running.
    pub fn cancel(&mut self, handle: AutoplayHandle) -> bool {
        match &self.slot {
            Some(timer) if timer.id == handle.0 => {
                self.slot = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels whatever timer is running. Returns whether one was.
    pub fn cancel_all(&mut self) -> bool {
        self.slot.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns when the running timer next fires.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slot.as_ref().map(|t| t.deadline)
    }

    /// Returns how many periods have elapsed by `now` and moves the deadline
    /// past `now`. Returns 0 when no timer is running. The count saturates
    /// at `u32::MAX`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(timer) = self.slot.as_mut() else {
            return 0;
        };
        if now < timer.deadline {
            return 0;
        }
        let late = (now - timer.deadline).as_nanos();
        let period = timer.period.as_nanos();
        let fired = u32::try_from(late / period + 1).unwrap_or(u32::MAX);

        // The next deadline is the first period boundary after `now`.
        let into_period = u64::try_from(late % period).unwrap_or(u64::MAX);
        timer.deadline = now + (timer.period - Duration::from_nanos(into_period));
        fired
    }
}
