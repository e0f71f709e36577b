pub mod aggregate;
pub mod plan;

pub use aggregate::aggregate;
pub use plan::{FetchPlan, Fetched, Joined, Slot, TaskOutcome};
