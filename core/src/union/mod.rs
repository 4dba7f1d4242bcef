//! Union model: the variants of a struct and the names generated for them.

mod descriptor;
mod naming;

pub use descriptor::{NotARecord, UnionDescriptor, Variant};
pub use naming::NamingPlan;
