mod direction;
mod plan;
mod rate_table;
mod tranche;

pub use direction::Direction;
pub use plan::{AllocationPlan, weighted_average};
pub use rate_table::RateTable;
pub use tranche::Tranche;
