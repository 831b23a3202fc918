//! Application services for task discovery and inspection.

mod details;
mod discovery;

pub use details::{TaskDetails, TaskDetailsError, TaskDetailsService};
pub use discovery::{TaskDiscoveryError, TaskDiscoveryService};
