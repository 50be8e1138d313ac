//! Simulation clock: turns frame timestamps into monotonic simulation time.

/// Simulation seconds per millisecond of frame timestamp.
pub const DEFAULT_TIME_SCALE: f64 = 0.001;

/// Converts the host's per-frame millisecond timestamps into simulation time.
///
/// Time only accumulates while the simulation runs, so a pause followed by a
/// resume continues from the exact value where it stopped. Timestamps that go
/// backwards are treated as a zero-length frame, keeping the output monotonic.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    time_scale: f64,
    sim_time: f64,
    last_timestamp_ms: f64,
}

impl SimulationClock {
    /// Clock starting at simulation time zero, with the timestamp origin at zero.
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale,
            sim_time: 0.0,
            last_timestamp_ms: 0.0,
        }
    }

    /// Feed the timestamp of a new frame. When `running` is false the elapsed
    /// interval is dropped. Returns the resulting simulation time.
    pub fn advance(&mut self, timestamp_ms: f64, running: bool) -> f64 {
        let elapsed_ms = (timestamp_ms - self.last_timestamp_ms).max(0.0);
        self.last_timestamp_ms = self.last_timestamp_ms.max(timestamp_ms);
        if running {
            self.sim_time += elapsed_ms * self.time_scale;
        }
        self.sim_time
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninterrupted_time_matches_scaled_timestamp() {
        let mut clock = SimulationClock::default();
        let mut t = 0.0;
        for frame in 1..=120 {
            t = clock.advance(frame as f64 * 16.0, true);
        }
        assert!((t - 1.92).abs() < 1e-9, "t = {t}");
    }

    #[test]
    fn test_pause_does_not_accumulate_time() {
        let mut clock = SimulationClock::default();
        clock.advance(1000.0, true);
        let paused_at = clock.advance(2000.0, false);
        assert!((paused_at - 1.0).abs() < 1e-12);
        clock.advance(9000.0, false);
        let resumed = clock.advance(9016.0, true);
        assert!((resumed - 1.016).abs() < 1e-9, "resumed at {resumed}");
    }

    #[test]
    fn test_backwards_timestamp_is_ignored() {
        let mut clock = SimulationClock::default();
        clock.advance(500.0, true);
        let t = clock.advance(100.0, true);
        assert!((t - 0.5).abs() < 1e-12);
        let t = clock.advance(600.0, true);
        assert!((t - 0.6).abs() < 1e-12, "t = {t}");
    }
}
