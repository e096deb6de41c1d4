use compact_tree::newick::{parse_file_all, parse_str, to_newick, write_newick_file};
use compact_tree::CompactTree;
use std::fs::File;

#[test]
fn test_to_newick_simple() {
    let tree = parse_str("(A:1,B:2)C;").unwrap();
    assert_eq!(tree.to_newick(), "(A:1,B:2)C;");
}

#[test]
fn test_to_newick_without_lengths() {
    let tree = parse_str("((A,B),(C,D)E)F;").unwrap();
    assert_eq!(to_newick(&tree), "((A,B),(C,D)E)F;");
}

#[test]
fn test_to_newick_keeps_root_edge_length() {
    let tree = parse_str("((A:1,B:2):3,C:4):0.5;").unwrap();
    assert_eq!(to_newick(&tree), "((A:1,B:2):3,C:4):0.5;");
}

#[test]
fn test_to_newick_writes_only_given_lengths() {
    for newick in ["(A,B)C:1;", "(A:0,B)C;", "((A,B):0,C:2);", "(A,B):0;"] {
        let tree = parse_str(newick).unwrap();
        assert_eq!(to_newick(&tree), newick);
    }
}

#[test]
fn test_to_newick_output_parses_back() {
    let tree = parse_str("(A:1e300,B:0.000001,C:-2.5e-8)D:123456789;").unwrap();
    let reparsed = parse_str(to_newick(&tree)).unwrap();
    assert_eq!(tree, reparsed);
}

#[test]
fn test_to_newick_quotes_labels() {
    let tree = parse_str("('Papio anubis','Baillon''s Crake',Pu_ke_ko);").unwrap();
    assert_eq!(
        to_newick(&tree),
        "('Papio anubis','Baillon''s Crake',Pu_ke_ko);"
    );
}

#[test]
fn test_single_node() {
    assert_eq!(to_newick(&parse_str("A;").unwrap()), "A;");
    assert_eq!(to_newick(&parse_str(";").unwrap()), ";");
}

#[test]
fn test_round_trip_file() {
    let tree = CompactTree::from_file("tests/fixtures/primates.nwk").unwrap();
    let reparsed = parse_str(tree.to_newick()).unwrap();
    assert_eq!(tree, reparsed);
}

#[test]
fn test_write_newick_file() {
    let trees = parse_file_all("tests/fixtures/three_trees.nwk").unwrap();

    let path = std::env::temp_dir().join(format!("compact_tree_writer_{}.nwk", std::process::id()));
    write_newick_file(File::create(&path).unwrap(), &trees).unwrap();

    let reread = parse_file_all(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(trees, reread);
}
