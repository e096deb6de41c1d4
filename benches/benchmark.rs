use compact_tree::CompactTree;
use compact_tree::newick::parse_str;
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

const NEWICK_FILES: &[(&str, &str)] = &[("Primates", "tests/fixtures/primates.nwk")];

/// Balanced binary tree with `2^depth` leaves.
fn balanced_newick(depth: u32) -> String {
    fn build(depth: u32, next_leaf: &mut usize, newick: &mut String) {
        if depth == 0 {
            newick.push_str(&format!("T{}:0.1", next_leaf));
            *next_leaf += 1;
            return;
        }
        newick.push('(');
        build(depth - 1, next_leaf, newick);
        newick.push(',');
        build(depth - 1, next_leaf, newick);
        newick.push_str("):0.5");
    }

    let mut newick = String::new();
    build(depth, &mut 0, &mut newick);
    newick.push(';');
    newick
}

/// Comb (caterpillar) tree with `num_leaves` leaves.
fn comb_newick(num_leaves: usize) -> String {
    let mut newick = "(".repeat(num_leaves - 1);
    newick.push_str("T0:1");
    for i in 1..num_leaves {
        newick.push_str(&format!(",T{i}:1):1"));
    }
    newick.push(';');
    newick
}

fn parsing(c: &mut Criterion) {
    let balanced = balanced_newick(16);
    let comb = comb_newick(50_000);

    c.bench_function("parse balanced 2^16", |b| b.iter(|| parse_str(black_box(&balanced)).unwrap()));
    c.bench_function("parse comb 50k", |b| b.iter(|| parse_str(black_box(&comb)).unwrap()));

    for (name, path) in NEWICK_FILES {
        c.bench_function(&format!("parse file {name}"), |b| {
            b.iter(|| CompactTree::from_file(black_box(path)).unwrap())
        });
    }
}

fn traversal(c: &mut Criterion) {
    let tree = parse_str(balanced_newick(16)).unwrap();

    c.bench_function("preorder", |b| b.iter(|| tree.preorder().count()));
    c.bench_function("preorder begin/end", |b| {
        b.iter(|| {
            let end = tree.preorder_end();
            let mut it = tree.preorder_begin();
            let mut sum = 0;
            while it != end {
                sum += black_box(it.get().unwrap_or_default());
                it.advance();
            }
            sum
        })
    });
    c.bench_function("attribute scan", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for index in 0..tree.num_nodes() {
                let node = tree.attributes(index).unwrap();
                total += node.edge_length + node.children.len() as f64 + node.label.len() as f64;
            }
            total
        })
    });
}

fn analyses(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2024);
    let t1 = CompactTree::yule(10_000, &mut rng);
    let t2 = CompactTree::uniform(10_000, &mut rng);
    let keep: Vec<_> = t1.leaves().step_by(10).collect();

    c.bench_function("yule 10k", |b| b.iter(|| CompactTree::yule(black_box(10_000), &mut rng)));
    c.bench_function("robinson foulds 10k", |b| b.iter(|| t1.robinson_foulds(black_box(&t2)).unwrap()));
    c.bench_function("contract to 1k leaves", |b| b.iter(|| t1.contract_tree(black_box(&keep)).unwrap()));
}

criterion_group!(benches, parsing, traversal, analyses);
criterion_main!(benches);
