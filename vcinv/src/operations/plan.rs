//! Plan types for inventory operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use crate::container::{Container, ContainerKind};
use crate::inventory::{HostConnectSpec, NodeKind, NodeRef};

/// A single action to be taken during plan execution.
///
/// Each action corresponds to one lifecycle operation on a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Create a folder, datacenter or cluster.
    Create {
        /// The container to create it in.
        parent: Container,
        /// Name of the new container.
        name: String,
        /// Kind of the new container.
        kind: ContainerKind,
    },

    /// Destroy a named child after checking its kind.
    Destroy {
        /// The container holding the child.
        parent: Container,
        /// Name of the child.
        name: String,
        /// The kind the child must have.
        kind: NodeKind,
    },

    /// Add a host that is not yet in the inventory.
    AddHost {
        /// The container receiving the host.
        parent: Container,
        /// How to reach the host.
        spec: HostConnectSpec,
    },

    /// Move a host that is elsewhere in the inventory.
    MoveHost {
        /// The container receiving the host.
        parent: Container,
        /// The host's current inventory entry.
        host: NodeRef,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Create { parent, name, kind } => {
                format!("Create {kind} '{name}' in {parent}")
            }
            Self::Destroy { parent, name, kind } => {
                format!("Destroy {kind} '{name}' in {parent}")
            }
            Self::AddHost { parent, spec } => {
                format!("Add host '{}' to {parent}", spec.host_name)
            }
            Self::MoveHost { parent, host } => {
                format!("Move {host} into {parent}")
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Ensure folder /DC1/Prod/ is present");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_warning("folder 'Prod' already exists");
    ///
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
