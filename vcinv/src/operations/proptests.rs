//! Property-based tests for ensure plans.
//!
//! Operations must converge: once a plan has been executed, planning the
//! same request again yields no actions.

use super::{ContainerOptions, ContainerPlan, Ensure, PlanExecutor};
use crate::connection::ConnectionDescriptor;
use crate::container::ContainerKind;
use crate::inventory::{InMemoryInventory, InventoryService};
use crate::path::PathResolver;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 _.-]{0,11}"
}

fn ensure_strategy() -> impl Strategy<Value = Ensure> {
    prop_oneof![Just(Ensure::Present), Just(Ensure::Absent)]
}

fn descriptor() -> ConnectionDescriptor {
    ConnectionDescriptor::new("administrator", "secret", "vc01")
}

fn run(inventory: &InMemoryInventory, options: ContainerOptions) -> usize {
    let plan = ContainerPlan::new(options)
        .build_plan(&PathResolver::new(inventory), &descriptor())
        .unwrap();
    PlanExecutor::new(inventory).execute(&plan).unwrap();
    plan.len()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // Executing a plan twice changes nothing the second time.
    #[test]
    fn folder_plans_converge(
        name in name_strategy(),
        steps in prop::collection::vec(ensure_strategy(), 1..6),
    ) {
        let inventory = InMemoryInventory::new();
        inventory.create_datacenter(&inventory.root(), "DC1").unwrap();
        let path = format!("/DC1/{name}/");

        for ensure in steps {
            let options = ContainerOptions::new(path.clone(), ContainerKind::Folder)
                .with_ensure(ensure);
            run(&inventory, options.clone());
            prop_assert_eq!(run(&inventory, options), 0);
        }
    }

    // The final state follows the last request.
    #[test]
    fn last_request_wins(
        name in name_strategy(),
        steps in prop::collection::vec(ensure_strategy(), 1..6),
    ) {
        let inventory = InMemoryInventory::new();
        let path = format!("/{name}/");

        let last = *steps.last().unwrap();
        for ensure in steps {
            run(
                &inventory,
                ContainerOptions::new(path.clone(), ContainerKind::Datacenter).with_ensure(ensure),
            );
        }

        let present = inventory.find_child(&inventory.root(), &name).unwrap().is_some();
        prop_assert_eq!(present, last == Ensure::Present);
    }
}
