//! Property-based tests for inventory paths.
//!
//! Covers the parse/display round trip and the rule that nothing below a
//! cluster is reachable by path.

use super::{parse, PathResolver, PathSegments};
use crate::connection::ConnectionDescriptor;
use crate::inventory::{InMemoryInventory, InventoryService};
use proptest::prelude::*;

// Names may contain anything but the separator.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _.:-]{1,16}"
}

fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // parse(display(segments)) == segments
    #[test]
    fn parse_display_round_trip(names in segments_strategy()) {
        let path = PathSegments::from_names(names.clone()).unwrap();
        let reparsed = parse(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed.iter().collect::<Vec<_>>(), names.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(reparsed, path);
    }

    // Dropping the trailing separator is always rejected
    #[test]
    fn missing_trailing_separator_rejected(names in prop::collection::vec(segment_strategy(), 1..8)) {
        let raw = format!("/{}", names.join("/"));
        prop_assert!(parse(&raw).is_err());
    }

    // split_last then join restores the path
    #[test]
    fn split_last_join_inverse(names in prop::collection::vec(segment_strategy(), 1..8)) {
        let path = PathSegments::from_names(names).unwrap();
        let (parent, leaf) = path.split_last().unwrap();
        prop_assert_eq!(parent.join(leaf).unwrap(), path.clone());
    }

    // Any non-empty remainder below a cluster fails to resolve
    #[test]
    fn cluster_is_terminal(rest in prop::collection::vec(segment_strategy(), 1..5)) {
        let inventory = InMemoryInventory::new();
        let dc = inventory.create_datacenter(&inventory.root(), "DC1").unwrap();
        let hosts = inventory.host_folder(&dc).unwrap();
        inventory.create_cluster(&hosts, "ClusterA").unwrap();

        let mut names = vec!["DC1".to_string(), "ClusterA".to_string()];
        names.extend(rest);
        let raw = PathSegments::from_names(names).unwrap().to_string();

        let resolver = PathResolver::new(&inventory);
        let descriptor = ConnectionDescriptor::new("u", "p", "vc");
        let err = resolver.resolve(&descriptor, &raw, "below cluster").unwrap_err();
        prop_assert!(err.is_not_found());
    }
}
