//! Bot time model.
//!
//! # Design
//!
//! Time is a monotonically increasing millisecond count held in a
//! [`Timestamp`].  The origin is arbitrary (process start for
//! [`SystemClock`], zero for [`ManualClock`]); only differences are
//! meaningful.  Using integer milliseconds keeps every threshold comparison
//! exact, which the detectors rely on ("trigger exactly at the first sample
//! where elapsed ≥ threshold").
//!
//! Durations are plain `u64` milliseconds ([`Millis`]) because every timing
//! constant in the bots is expressed that way.

use std::fmt;
use std::time::Instant;

/// A duration in milliseconds.
pub type Millis = u64;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// A monotonic instant, in milliseconds since the clock's origin.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    /// Milliseconds elapsed from `earlier` to `self`.  Saturates at zero if
    /// `earlier` is in the future.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> Millis {
        self.0.saturating_sub(earlier.0)
    }

    /// The instant `ms` after `self`.
    #[inline]
    pub fn after(self, ms: Millis) -> Timestamp {
        Timestamp(self.0.saturating_add(ms))
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl std::ops::Add<Millis> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: Millis) -> Timestamp {
        self.after(rhs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Millis;
    #[inline]
    fn sub(self, rhs: Timestamp) -> Millis {
        self.since(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Clocks ────────────────────────────────────────────────────────────────────

/// A monotonic time source.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock backed [`Clock`] measuring from its own creation.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let ms = self.origin.elapsed().as_millis();
        Timestamp(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}

/// A hand-driven [`Clock`] for tests and scripted hosts.
///
/// Time only moves when [`advance`][Self::advance] or [`set`][Self::set] is
/// called, and never backwards.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self { now: start }
    }

    /// Move the clock forward by `ms`.
    #[inline]
    pub fn advance(&mut self, ms: Millis) {
        self.now = self.now.after(ms);
    }

    /// Jump to `t`.  Ignored if `t` is earlier than the current time.
    pub fn set(&mut self, t: Timestamp) {
        if t > self.now {
            self.now = t;
        }
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Timestamp {
        self.now
    }
}

// ── Throttle ──────────────────────────────────────────────────────────────────

/// Rate limiter for periodic side effects (tracking logs, stats reports).
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Millis,
    last:     Option<Timestamp>,
}

impl Throttle {
    pub fn new(interval: Millis) -> Self {
        Self { interval, last: None }
    }

    /// `true` (and the window restarts) if at least `interval` ms have passed
    /// since the last `true`, or if this is the first call.
    pub fn ready(&mut self, now: Timestamp) -> bool {
        match self.last {
            Some(last) if now.since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last firing so the next call to `ready` returns `true`.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
