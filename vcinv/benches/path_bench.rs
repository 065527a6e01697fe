use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vcinv::inventory::{InMemoryInventory, InventoryService};
use vcinv::path::{parse, PathResolver};
use vcinv::ConnectionDescriptor;

fn nested_path(depth: usize) -> String {
    let mut path = String::from("/DC1/");
    for i in 0..depth {
        path.push_str(&format!("Folder{i}/"));
    }
    path
}

/// Datacenters / DC1 / host / Folder0 / Folder1 / ... with `width` siblings
/// at each level.
fn nested_inventory(depth: usize, width: usize) -> InMemoryInventory {
    let inventory = InMemoryInventory::new();
    let dc = inventory.create_datacenter(&inventory.root(), "DC1").unwrap();
    let mut parent = inventory.host_folder(&dc).unwrap();
    for i in 0..depth {
        for j in 0..width {
            inventory
                .create_folder(&parent, &format!("Sibling{i}_{j}"))
                .unwrap();
        }
        parent = inventory.create_folder(&parent, &format!("Folder{i}")).unwrap();
    }
    inventory
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("root", |b| {
        b.iter(|| parse(black_box("/")));
    });

    group.bench_function("short", |b| {
        b.iter(|| parse(black_box("/DC1/ClusterA/")));
    });

    let long = nested_path(32);
    group.bench_function("deep", |b| {
        b.iter(|| parse(black_box(&long)));
    });

    group.bench_function("malformed", |b| {
        b.iter(|| parse(black_box("/DC1//ClusterA")));
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let descriptor = ConnectionDescriptor::new("administrator", "secret", "vc01");

    for depth in [1, 4, 16] {
        let inventory = nested_inventory(depth, 8);
        let resolver = PathResolver::new(&inventory);
        let path = nested_path(depth);

        group.bench_with_input(BenchmarkId::new("depth", depth), &path, |b, path| {
            b.iter(|| {
                resolver
                    .resolve(&descriptor, black_box(path), "not found")
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_resolve);
criterion_main!(benches);
