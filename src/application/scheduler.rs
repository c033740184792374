use std::time::Duration;

/// Frame-driven periodic driver.
///
/// The owner feeds it elapsed frame time through `poll`; it answers whether a
/// step is due. At most one step fires per poll, so a late frame never causes
/// a burst of catch-up steps. Stopping discards the pending tick, and
/// restarting applies the new interval from the next tick onwards.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StepTimer {
    interval: Duration,
    elapsed: Duration,
    active: bool,
}

impl StepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed = Duration::ZERO;
    }

    /// Drop accumulated time and continue with a new interval
    pub fn restart(&mut self, interval: Duration) {
        self.start(interval);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Accumulate `delta`; true when a step is due
    pub fn poll(&mut self, delta: Duration) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }
}
