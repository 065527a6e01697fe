//! Idempotent inventory operations using the plan-execute pattern.
//!
//! Each operation ensures that a folder, datacenter, cluster or host is
//! present at, or absent from, an inventory path. Planning reads the
//! inventory and decides what has to change; execution performs the
//! mutations through [`Container`](crate::container::Container). Keeping
//! the two apart gives dry runs for free and lets a plan be inspected
//! before anything is touched.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: Resolves the path, inspects the target and builds a plan
//! 2. **Execution**: Takes the plan and performs the inventory mutations
//!
//! Asking for a state that already holds produces a plan with no actions
//! and a warning.
//!
//! # Examples
//!
//! ```
//! use vcinv::container::ContainerKind;
//! use vcinv::inventory::InMemoryInventory;
//! use vcinv::operations::{ContainerOptions, ContainerPlan, PlanExecutor};
//! use vcinv::path::PathResolver;
//! use vcinv::ConnectionDescriptor;
//!
//! let inventory = InMemoryInventory::new();
//! let descriptor = ConnectionDescriptor::new("administrator", "secret", "vc01");
//! let resolver = PathResolver::new(&inventory);
//!
//! let options = ContainerOptions::new("/DC1/", ContainerKind::Datacenter);
//! let plan = ContainerPlan::new(options.clone())
//!     .build_plan(&resolver, &descriptor)
//!     .unwrap();
//! assert_eq!(plan.len(), 1);
//!
//! let result = PlanExecutor::new(&inventory).execute(&plan).unwrap();
//! assert!(result.success);
//!
//! // Running it again changes nothing.
//! let plan = ContainerPlan::new(options).build_plan(&resolver, &descriptor).unwrap();
//! assert!(plan.is_empty());
//! assert_eq!(plan.warnings.len(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod container;
pub mod executor;
pub mod host;
pub mod plan;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use container::{ContainerOptions, ContainerPlan};
pub use executor::{ExecutionResult, PlanExecutor};
pub use host::{HostOptions, HostPlan};
pub use plan::{OperationPlan, PlanAction};

/// The state an operation should leave its target in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// The target exists.
    #[default]
    Present,
    /// The target does not exist.
    Absent,
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Absent => write!(f, "absent"),
        }
    }
}
