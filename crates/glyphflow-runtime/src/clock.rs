//! Frame clock that throttles ticks to a target rate

use std::time::{Duration, Instant};

/// Decides whether a frame callback should run a physics tick.
///
/// The physics step itself is fixed (`dt = 1`); wall-clock time only gates
/// how often a tick fires. Timestamps are passed in explicitly so that the
/// clock can be driven by a host timer or stepped by a test.
pub struct FrameClock {
    /// Target ticks per second
    pub target_fps: f64,
    /// Minimum wall-clock time between two executed ticks
    frame_duration: Duration,
    /// Timestamp of the last executed tick, minus the absorbed remainder
    last_tick: Option<Duration>,
    /// Timestamp of the first executed tick
    start: Option<Duration>,
    /// Number of executed ticks
    pub ticks: u64,
    /// Number of callbacks that did not meet the frame duration
    pub skipped: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_target_fps(60.0)
    }
}

impl FrameClock {
    /// Create a clock targeting 60 ticks per second
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom tick rate. Rates whose frame duration
    /// cannot be represented (non-positive, non-finite, vanishingly small)
    /// fall back to 60.
    pub fn with_target_fps(fps: f64) -> Self {
        let frame = if fps.is_finite() && fps > 0.0 {
            Duration::try_from_secs_f64(1.0 / fps).ok()
        } else {
            None
        };
        let (fps, frame_duration) = match frame {
            Some(frame) => (fps, frame),
            None => {
                log::warn!("unusable target rate {}, using 60", fps);
                (60.0, Duration::from_secs_f64(1.0 / 60.0))
            }
        };
        Self {
            target_fps: fps,
            frame_duration,
            last_tick: None,
            start: None,
            ticks: 0,
            skipped: 0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Called once per host frame callback. Returns true when a physics tick
    /// should run now.
    ///
    /// The first call always ticks. Afterwards a tick fires once at least one
    /// frame duration has passed; the part of the delta beyond a whole number
    /// of frames is carried over so the average rate does not drift.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(last) = self.last_tick else {
            self.start = Some(now);
            self.last_tick = Some(now);
            self.ticks += 1;
            return true;
        };

        let delta = now.saturating_sub(last);
        if delta < self.frame_duration {
            self.skipped += 1;
            log::trace!("frame skipped after {:?}", delta);
            return false;
        }

        let frame_nanos = self.frame_duration.as_nanos().max(1);
        let remainder = Duration::from_nanos((delta.as_nanos() % frame_nanos) as u64);
        self.last_tick = Some(now.saturating_sub(remainder));
        self.ticks += 1;
        true
    }

    /// Wall-clock time since the first executed tick
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.start.map(|s| now.saturating_sub(s)).unwrap_or_default()
    }

    /// Forget all timing state, as if freshly constructed
    pub fn reset(&mut self) {
        *self = Self::with_target_fps(self.target_fps);
    }
}

/// Monotonic timestamps relative to a fixed origin
pub struct WallClock {
    origin: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time since this clock was created
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
