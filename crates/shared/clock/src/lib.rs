//! Bunkatsu Clock Infrastructure
//!
//! Time sources for rate snapshot ageing:
//!
//! - [`SystemClock`]: wall time, for production
//! - [`FixedClock`]: frozen time advanced by hand, for tests
//!
//! ```ignore
//! use bunkatsu_clock::{Clock, FixedClock};
//! use chrono::Duration;
//!
//! let clock = FixedClock::now_frozen();
//! let fetched_at = clock.now();
//! clock.advance(Duration::minutes(5));
//! assert_eq!(clock.now() - fetched_at, Duration::minutes(5));
//! ```

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use bunkatsu_ports::Clock;
