//! Bunkatsu Position Allocator
//!
//! Turns an entry zone, a stop, relative weights and a loss cap into a
//! loss-bounded [`AllocationPlan`](bunkatsu_core::AllocationPlan).
//!
//! ## Pipeline
//!
//! ```text
//! AllocationConfig
//!       │ validate
//!       ▼
//! price_tranches ──► scale_to_target_average ──► price_losses ──► cap_total_loss
//!  (zone interp)       (target / raw average)     (per-unit × unit   (shrink to
//!                                                   × conversion)     max loss)
//!       │
//!       ▼
//! AllocationPlan { tranches, weighted_average_price, total_loss }
//! ```
//!
//! Every stage takes a tranche slice and returns a new `Vec`; nothing is
//! edited in place. The whole pipeline is synchronous and does no I/O.

mod allocator;
mod config;
mod transforms;

pub use allocator::allocate;
pub use config::{AllocationConfig, MAX_MAGNITUDE};
pub use transforms::{
    cap_total_loss, price_losses, price_tranches, scale_to_target_average,
};
