//! Time sources and per-frame timing.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic timestamps, in microseconds.
pub trait TimeProvider {
    fn now_us(&self) -> i64;
}

/// Wall clock measured from the moment the provider was created.
pub struct SystemTimeProvider {
    origin: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Manually driven clock for frame scripts and tests. Starts at zero.
#[derive(Debug, Default)]
pub struct MockTimeProvider {
    now: Cell<i64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute timestamp, possibly backwards.
    pub fn set_time(&self, us: i64) {
        self.now.set(us);
    }

    pub fn advance(&self, delta_us: i64) {
        self.now.set(self.now.get().saturating_add(delta_us));
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.now.get()
    }
}

/// Timing of a single frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Time elapsed since the previous frame.
    pub delta: f32,
    /// Time elapsed since the clock started.
    pub total: f64,
}

impl FrameTime {
    pub const fn new(delta: f32, total: f64) -> Self {
        Self { delta, total }
    }

    /// The next frame, `delta` seconds after this one.
    pub fn advance(self, delta: f32) -> Self {
        Self {
            delta,
            total: self.total + delta as f64,
        }
    }
}

/// Turns successive [`TimeProvider`] readings into per-frame [`FrameTime`]s.
pub struct FrameClock<T: TimeProvider> {
    provider: T,
    start_us: i64,
    last_us: i64,
}

impl<T: TimeProvider> FrameClock<T> {
    pub fn new(provider: T) -> Self {
        let now = provider.now_us();
        Self {
            provider,
            start_us: now,
            last_us: now,
        }
    }

    /// Read the provider and return the time of the frame that starts now.
    /// A provider that goes backwards yields a zero delta.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.provider.now_us();
        let delta_us = (now - self.last_us).max(0);
        self.last_us = self.last_us.max(now);
        FrameTime {
            delta: delta_us as f32 / 1_000_000.0,
            total: (self.last_us - self.start_us) as f64 / 1_000_000.0,
        }
    }

    pub fn provider(&self) -> &T {
        &self.provider
    }
}
