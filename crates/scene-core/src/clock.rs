use std::time::Duration;

/// Monotonic frame clock.
///
/// Hosts report time in their own unit (`requestAnimationFrame` hands out
/// milliseconds, native loops hand out `Instant`s). Everything past this type
/// is a `Duration`, so motion rules only ever see seconds.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    origin_ms: Option<f64>,
    elapsed: Duration,
    ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from a host timestamp in milliseconds. The first timestamp
    /// seen becomes t = 0.
    pub fn advance_millis(&mut self, host_ms: f64) -> Duration {
        if !host_ms.is_finite() {
            return self.advance_to(self.elapsed);
        }
        let origin = *self.origin_ms.get_or_insert(host_ms);
        let secs = ((host_ms - origin) / 1000.0).max(0.0);
        let elapsed = Duration::try_from_secs_f64(secs).unwrap_or(self.elapsed);
        self.advance_to(elapsed)
    }

    /// Advance to an absolute elapsed time. Never moves backward.
    pub fn advance_to(&mut self, elapsed: Duration) -> Duration {
        self.elapsed = self.elapsed.max(elapsed);
        self.ticks += 1;
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
