//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans
//! and applies them to the inventory.

use crate::container::ContainerKind;
use crate::error::Result;
use crate::inventory::{InventoryService, NodeRef};
use crate::retry::ThumbprintRetry;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Containers created by the plan.
    pub created: Vec<NodeRef>,

    /// The certificate thumbprint accepted while adding a host, if any.
    pub accepted_thumbprint: Option<String>,
}

impl ExecutionResult {
    /// Creates a successful execution result.
    fn success(
        plan: &OperationPlan,
        created: Vec<NodeRef>,
        accepted_thumbprint: Option<String>,
    ) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            created,
            accepted_thumbprint,
        }
    }

    /// Creates a dry-run execution result.
    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            created: Vec::new(),
            accepted_thumbprint: None,
        }
    }
}

/// Executes operation plans against an inventory service.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting the actions without performing them). Host additions follow
/// the executor's [`ThumbprintRetry`] policy, unbounded by default.
///
/// # Examples
///
/// ```
/// use vcinv::container::ContainerKind;
/// use vcinv::inventory::InMemoryInventory;
/// use vcinv::operations::{ContainerOptions, ContainerPlan, PlanExecutor};
/// use vcinv::path::PathResolver;
/// use vcinv::ConnectionDescriptor;
///
/// let inventory = InMemoryInventory::new();
/// let descriptor = ConnectionDescriptor::new("u", "p", "vc01");
/// let plan = ContainerPlan::new(ContainerOptions::new("/DC1/", ContainerKind::Datacenter))
///     .build_plan(&PathResolver::new(&inventory), &descriptor)
///     .unwrap();
///
/// // Dry-run execution
/// let result = PlanExecutor::new(&inventory).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert!(result.created.is_empty());
///
/// // Normal execution
/// let result = PlanExecutor::new(&inventory).execute(&plan).unwrap();
/// assert_eq!(result.created[0].name(), "DC1");
/// ```
pub struct PlanExecutor<'a> {
    service: &'a dyn InventoryService,
    retry: ThumbprintRetry,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(service: &'a dyn InventoryService) -> Self {
        Self {
            service,
            retry: ThumbprintRetry::default(),
            dry_run: false,
        }
    }

    /// Sets the certificate retry policy used when adding hosts.
    #[must_use]
    pub fn with_retry(mut self, retry: ThumbprintRetry) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan but does not
    /// touch the inventory.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// Actions run in order; the first failure stops execution and is
    /// returned. Actions already performed are not rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails to execute.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            for action in &plan.actions {
                log::info!("dry run: {}", action.description());
            }
            return Ok(ExecutionResult::dry_run(plan));
        }

        let mut created = Vec::new();
        let mut accepted_thumbprint = None;
        for action in &plan.actions {
            log::debug!("executing: {}", action.description());
            match self.execute_action(action)? {
                Outcome::Created(node) => created.push(node),
                Outcome::HostAdded(thumbprint) => accepted_thumbprint = thumbprint,
                Outcome::Done => {}
            }
        }

        Ok(ExecutionResult::success(plan, created, accepted_thumbprint))
    }

    /// Executes a single action.
    fn execute_action(&self, action: &PlanAction) -> Result<Outcome> {
        let service = self.service;
        match action {
            PlanAction::Create { parent, name, kind } => {
                let node = match kind {
                    ContainerKind::Folder => parent.create_folder(service, name)?,
                    ContainerKind::Datacenter => parent.create_datacenter(service, name)?,
                    ContainerKind::Cluster => parent.create_cluster(service, name)?,
                };
                Ok(Outcome::Created(node))
            }
            PlanAction::Destroy { parent, name, kind } => {
                parent.destroy_child(service, name, kind)?;
                Ok(Outcome::Done)
            }
            PlanAction::AddHost { parent, spec } => {
                let mut spec = spec.clone();
                let preset = spec.ssl_thumbprint.clone();
                parent.add_host(service, &mut spec, &self.retry)?;
                let accepted = spec.ssl_thumbprint.filter(|t| Some(t) != preset.as_ref());
                Ok(Outcome::HostAdded(accepted))
            }
            PlanAction::MoveHost { parent, host } => {
                parent.move_host_into(service, host)?;
                Ok(Outcome::Done)
            }
        }
    }
}

impl std::fmt::Debug for PlanExecutor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanExecutor")
            .field("retry", &self.retry)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

enum Outcome {
    Created(NodeRef),
    HostAdded(Option<String>),
    Done,
}
