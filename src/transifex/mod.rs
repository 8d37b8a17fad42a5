//! Understanding Transifex editor locations and resource names.

pub mod resource;
pub mod route;

pub use resource::{BranchIdentifier, HEADS_MARKER, branch_from_resource};
pub use route::{RouteDescriptor, route};
