//! Folder, datacenter and cluster operations.
//!
//! This module implements the planning logic for ensuring that a container
//! is present at, or absent from, an inventory path.

use crate::connection::ConnectionDescriptor;
use crate::container::ContainerKind;
use crate::error::{Error, Result};
use crate::path::PathResolver;

use super::plan::{OperationPlan, PlanAction};
use super::Ensure;

/// Options for a container operation.
///
/// `path` names the container itself; its last segment is the name to
/// create or destroy and the rest must already resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Path of the container, e.g. `/DC1/Production/`.
    pub path: String,

    /// Kind of the container.
    pub kind: ContainerKind,

    /// Desired state.
    pub ensure: Ensure,
}

impl ContainerOptions {
    /// Creates options that ensure the container is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::container::ContainerKind;
    /// use vcinv::operations::{ContainerOptions, Ensure};
    ///
    /// let options = ContainerOptions::new("/DC1/", ContainerKind::Datacenter);
    /// assert_eq!(options.ensure, Ensure::Present);
    /// ```
    #[must_use]
    pub fn new(path: impl Into<String>, kind: ContainerKind) -> Self {
        Self {
            path: path.into(),
            kind,
            ensure: Ensure::Present,
        }
    }

    /// Sets the desired state.
    #[must_use]
    pub const fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = ensure;
        self
    }
}

/// A plan for a container operation.
///
/// This struct is responsible for analyzing a container request and
/// building a plan for it.
pub struct ContainerPlan {
    options: ContainerOptions,
}

impl ContainerPlan {
    /// Creates a new container plan.
    #[must_use]
    pub const fn new(options: ContainerOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this request.
    ///
    /// Reads the inventory but does not modify it. A container that is
    /// already in the desired state yields an empty plan with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is malformed or names the root
    /// - The connection fails or the parent does not resolve
    /// - A child of the same name exists with a different kind
    ///   ([`Error::KindMismatch`])
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::container::ContainerKind;
    /// use vcinv::inventory::InMemoryInventory;
    /// use vcinv::operations::{ContainerOptions, ContainerPlan, Ensure};
    /// use vcinv::path::PathResolver;
    /// use vcinv::ConnectionDescriptor;
    ///
    /// let inventory = InMemoryInventory::new();
    /// let descriptor = ConnectionDescriptor::new("u", "p", "vc01");
    ///
    /// let options = ContainerOptions::new("/DC1/", ContainerKind::Datacenter)
    ///     .with_ensure(Ensure::Absent);
    /// let plan = ContainerPlan::new(options)
    ///     .build_plan(&PathResolver::new(&inventory), &descriptor)
    ///     .unwrap();
    ///
    /// assert!(plan.is_empty());
    /// assert!(plan.warnings[0].contains("already absent"));
    /// ```
    pub fn build_plan(
        &self,
        resolver: &PathResolver<'_>,
        descriptor: &ConnectionDescriptor,
    ) -> Result<OperationPlan> {
        let ContainerOptions { path, kind, ensure } = &self.options;
        let mut plan = OperationPlan::new(format!("Ensure {kind} {path} is {ensure}"));

        let context = format!("cannot find the parent of {kind} {path}");
        let (parent, name) = resolver.resolve_parent(descriptor, path, &context)?;
        let existing = parent.find_child_by_name(resolver.service(), &name)?;

        if let Some(ref node) = existing {
            if *node.kind() != kind.node_kind() {
                return Err(Error::KindMismatch {
                    name,
                    expected: kind.node_kind(),
                    actual: node.kind().clone(),
                });
            }
        }

        match (ensure, existing) {
            (Ensure::Present, None) => {
                plan = plan.add_action(PlanAction::Create {
                    parent,
                    name,
                    kind: *kind,
                });
            }
            (Ensure::Present, Some(_)) => {
                plan = plan.add_warning(format!("{kind} {path} already exists"));
            }
            (Ensure::Absent, Some(_)) => {
                plan = plan.add_action(PlanAction::Destroy {
                    parent,
                    name,
                    kind: kind.node_kind(),
                });
            }
            (Ensure::Absent, None) => {
                plan = plan.add_warning(format!("{kind} {path} not found (already absent)"));
            }
        }

        Ok(plan)
    }
}
