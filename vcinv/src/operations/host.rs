//! Host operations.
//!
//! A host is present in a container when the container has a child of
//! that name: a compute resource under a folder or datacenter, a host
//! system under a cluster. A host found anywhere else in the inventory
//! is moved rather than added again.

use std::fmt;

use crate::connection::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::inventory::{HostConnectSpec, NodeKind, NodeRef};
use crate::path::PathResolver;

use super::plan::{OperationPlan, PlanAction};
use super::Ensure;

/// Options for a host operation.
#[derive(Clone, PartialEq, Eq)]
pub struct HostOptions {
    /// DNS name or IP address of the host.
    pub name: String,

    /// Path of the container that holds, or should hold, the host.
    pub path: String,

    /// Administrative user on the host.
    pub username: Option<String>,

    /// Password of the administrative user.
    pub password: Option<String>,

    /// Certificate thumbprint to accept up front.
    pub thumbprint: Option<String>,

    /// Desired state.
    pub ensure: Ensure,
}

impl HostOptions {
    /// Creates options that ensure `name` is present under `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::operations::{Ensure, HostOptions};
    ///
    /// let options = HostOptions::new("esx01", "/DC1/ClusterA/")
    ///     .with_credentials("root", "secret");
    /// assert_eq!(options.ensure, Ensure::Present);
    /// assert_eq!(options.username.as_deref(), Some("root"));
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            username: None,
            password: None,
            thumbprint: None,
            ensure: Ensure::Present,
        }
    }

    /// Sets the host credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the thumbprint to accept without a round trip.
    #[must_use]
    pub fn with_thumbprint(mut self, thumbprint: Option<String>) -> Self {
        self.thumbprint = thumbprint;
        self
    }

    /// Sets the desired state.
    #[must_use]
    pub const fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = ensure;
        self
    }

    /// The connect spec used when the host has to be added.
    #[must_use]
    pub fn connect_spec(&self) -> HostConnectSpec {
        let mut spec = HostConnectSpec::new(&self.name);
        spec.user_name.clone_from(&self.username);
        spec.password.clone_from(&self.password);
        spec.ssl_thumbprint.clone_from(&self.thumbprint);
        spec
    }
}

impl fmt::Debug for HostOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostOptions")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("thumbprint", &self.thumbprint)
            .field("ensure", &self.ensure)
            .finish()
    }
}

/// A plan for a host operation.
pub struct HostPlan {
    options: HostOptions,
}

impl HostPlan {
    /// Creates a new host plan.
    #[must_use]
    pub const fn new(options: HostOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this request.
    ///
    /// Reads the inventory but does not modify it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is malformed or does not resolve to a container
    /// - The connection fails
    /// - The container has a child of the host's name that is not a host
    ///   ([`Error::KindMismatch`])
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::inventory::{InMemoryInventory, InventoryService};
    /// use vcinv::operations::{HostOptions, HostPlan, PlanAction};
    /// use vcinv::path::PathResolver;
    /// use vcinv::ConnectionDescriptor;
    ///
    /// let inventory = InMemoryInventory::new();
    /// inventory.create_datacenter(&inventory.root(), "DC1").unwrap();
    /// let descriptor = ConnectionDescriptor::new("u", "p", "vc01");
    ///
    /// let plan = HostPlan::new(HostOptions::new("esx01", "/DC1/"))
    ///     .build_plan(&PathResolver::new(&inventory), &descriptor)
    ///     .unwrap();
    /// assert!(matches!(plan.actions[0], PlanAction::AddHost { .. }));
    /// ```
    pub fn build_plan(
        &self,
        resolver: &PathResolver<'_>,
        descriptor: &ConnectionDescriptor,
    ) -> Result<OperationPlan> {
        let options = &self.options;
        let service = resolver.service();
        let mut plan = OperationPlan::new(format!(
            "Ensure host {} in {} is {}",
            options.name, options.path, options.ensure
        ));

        let context = format!("cannot find the container {}", options.path);
        let container = resolver.resolve(descriptor, &options.path, &context)?;
        let existing = container.find_child_by_name(service, &options.name)?;
        if let Some(ref node) = existing {
            check_host_kind(node)?;
        }

        match (options.ensure, existing) {
            (Ensure::Present, Some(_)) => {
                plan = plan.add_warning(format!(
                    "host {} is already in {container}",
                    options.name
                ));
            }
            (Ensure::Present, None) => {
                let root = resolver.connect(descriptor)?;
                plan = match service.find_host(&root, &options.name)? {
                    Some(host) => plan.add_action(PlanAction::MoveHost {
                        parent: container,
                        host,
                    }),
                    None => plan.add_action(PlanAction::AddHost {
                        parent: container,
                        spec: options.connect_spec(),
                    }),
                };
            }
            (Ensure::Absent, Some(node)) => {
                plan = plan.add_action(PlanAction::Destroy {
                    parent: container,
                    name: options.name.clone(),
                    kind: node.kind().clone(),
                });
            }
            (Ensure::Absent, None) => {
                plan = plan.add_warning(format!(
                    "host {} not found in {container} (already absent)",
                    options.name
                ));
            }
        }

        Ok(plan)
    }
}

fn check_host_kind(node: &NodeRef) -> Result<()> {
    match node.kind() {
        NodeKind::HostSystem | NodeKind::ComputeResource => Ok(()),
        other => Err(Error::KindMismatch {
            name: node.name().to_string(),
            expected: NodeKind::HostSystem,
            actual: other.clone(),
        }),
    }
}
