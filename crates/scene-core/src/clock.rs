//! Frame timing for a loop that can be stopped and restarted.

/// Produces per-tick deltas from monotonic timestamps in seconds.
///
/// The first tick after construction or [`FrameClock::reset`] yields 0 so a
/// paused page does not jump forward when it resumes.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    previous: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timestamp and return the delta since the previous one.
    pub fn tick(&mut self, now_sec: f64) -> f32 {
        let dt = match self.previous {
            Some(prev) => (now_sec - prev).max(0.0),
            None => 0.0,
        };
        self.previous = Some(now_sec);
        self.elapsed += dt;
        dt as f32
    }

    /// Total running time, excluding time spent stopped.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
