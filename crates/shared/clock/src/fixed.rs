use bunkatsu_core::Timestamp;
use bunkatsu_ports::Clock;
use chrono::{Duration, Utc};
use parking_lot::RwLock;

/// Clock that only moves when told to
///
/// Used to age rate snapshots deterministically in tests.
pub struct FixedClock {
    current_time: RwLock<Timestamp>,
}

impl FixedClock {
    /// Create a clock frozen at `time`
    pub fn at(time: Timestamp) -> Self {
        Self {
            current_time: RwLock::new(time),
        }
    }

    /// Create a clock frozen at the current wall time
    pub fn now_frozen() -> Self {
        Self::at(Utc::now())
    }

    /// Advance the time by a duration
    pub fn advance(&self, duration: Duration) {
        *self.current_time.write() += duration;
    }

    /// Jump to an explicit time
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.write() = time;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current_time.read()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
