//! Integration tests for the file-backed in-memory inventory.
//!
//! Covers loading hand-written YAML documents, persisting mutations and
//! the structural rules the backend enforces.

mod common;
use common::{descriptor, lab, resolve};

use std::fs;
use tempfile::TempDir;
use vcinv::inventory::{InventoryFault, InventoryService, NodeDocument, NodeKind};
use vcinv::{ConnectionDescriptor, Error, InMemoryInventory, InventoryDocument, PathResolver};

const LAB_YAML: &str = r"
credentials:
  user: administrator
  password: secret
certificates:
  esx20: AA:BB:CC
root:
  name: Datacenters
  kind: folder
  children:
    - name: DC1
      kind: datacenter
      children:
        - name: Prod
          kind: folder
        - name: ClusterA
          kind: cluster
          children:
            - name: esx01
              kind: host_system
        - name: esx02
          kind: host_system
";

fn write_lab(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("inventory.yaml");
    fs::write(&path, LAB_YAML).unwrap();
    path
}

#[test]
fn test_load_hand_written_document() {
    let dir = TempDir::new().unwrap();
    let inventory = InMemoryInventory::load(&write_lab(&dir)).unwrap();

    let dc = resolve(&inventory, "/DC1/");
    let mut names: Vec<String> = dc
        .children(&inventory)
        .unwrap()
        .iter()
        .map(|node| node.name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["ClusterA", "Prod", "esx02"]);

    // A bare host directly under a folder becomes a standalone entry.
    let esx02 = dc.find_child_by_name(&inventory, "esx02").unwrap().unwrap();
    assert_eq!(*esx02.kind(), NodeKind::ComputeResource);
}

#[test]
fn test_loaded_credentials_enforced() {
    let dir = TempDir::new().unwrap();
    let inventory = InMemoryInventory::load(&write_lab(&dir)).unwrap();

    assert!(inventory.connect(&descriptor()).is_ok());
    let wrong = ConnectionDescriptor::new("administrator", "nope", "vc01");
    assert!(matches!(
        inventory.connect(&wrong),
        Err(InventoryFault::Connection(_))
    ));
}

#[test]
fn test_loaded_certificates_enforced() {
    let dir = TempDir::new().unwrap();
    let inventory = InMemoryInventory::load(&write_lab(&dir)).unwrap();
    let hosts = inventory
        .host_folder(&resolve(&inventory, "/DC1/").node().clone())
        .unwrap();

    let err = inventory
        .add_standalone_host(&hosts, &vcinv::HostConnectSpec::new("esx20"), true)
        .unwrap_err();
    assert_eq!(
        err,
        InventoryFault::SslVerify {
            thumbprint: "AA:BB:CC".into()
        }
    );
}

#[test]
fn test_save_then_load_preserves_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.yaml");

    let inventory = lab();
    inventory.save(&path).unwrap();
    let reloaded = InMemoryInventory::load(&path).unwrap();

    assert_eq!(reloaded.to_document(), inventory.to_document());
    let resolver = PathResolver::new(&reloaded);
    assert!(resolver
        .resolve(&descriptor(), "/Lab/DC2/", "x")
        .unwrap()
        .is_datacenter());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = InMemoryInventory::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, Error::File { .. }));
}

#[test]
fn test_load_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "root:\n  name: Datacenters\n  kind: folder\n  colour: red\n").unwrap();

    let err = InMemoryInventory::load(&path).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_from_document_rejects_invalid_structure() {
    let doc = InventoryDocument {
        root: NodeDocument::new("Datacenters", NodeKind::Folder).with_child(
            NodeDocument::new("esx01", NodeKind::HostSystem)
                .with_child(NodeDocument::new("inner", NodeKind::Folder)),
        ),
        ..Default::default()
    };

    let err = InMemoryInventory::from_document(&doc).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_structural_rules() {
    let inventory = lab();
    let root = inventory.root();
    let dc = resolve(&inventory, "/DC1/").node().clone();
    let hosts = inventory.host_folder(&dc).unwrap();

    // Clusters only inside a datacenter.
    assert!(matches!(
        inventory.create_cluster(&root, "Loose"),
        Err(InventoryFault::NotSupported(_))
    ));
    // No datacenter inside a datacenter.
    assert!(inventory.create_datacenter(&hosts, "Nested").is_err());
    // The host folder cannot be destroyed.
    assert!(inventory.destroy(&hosts).is_err());
    // Nor the root.
    assert!(inventory.destroy(&root).is_err());
}
