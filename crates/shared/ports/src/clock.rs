use bunkatsu_core::Timestamp;

/// Port for time abstraction
///
/// Rate caches ask the clock how old a snapshot is:
/// - Real system time in production
/// - Fixed, manually advanced time in tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
