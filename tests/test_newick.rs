use compact_tree::newick::{NewickParser, parse_file, parse_file_all, parse_str};
use compact_tree::parser::{ByteParser, ParsingErrorType};
use compact_tree::{CompactTree, NULL_NODE, parse_newick_file, parse_newick_str};

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_single_node_tree() {
    let tree = parse_str("A;").unwrap();

    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.root(), 0);
    let root = tree.attributes(0).unwrap();
    assert_eq!(root.label, "A");
    assert_eq!(root.parent, NULL_NODE);
    assert!(root.children.is_empty());
}

#[test]
fn test_empty_tree_is_single_unlabeled_node() {
    let tree = parse_str(";").unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.label(0), "");
    assert!(!tree.has_labels());
}

#[test]
fn test_three_node_tree() {
    let tree = parse_str("(A:1,B:2)C;").unwrap();

    assert_eq!(tree.num_nodes(), 3);
    let c = tree.find_label("C").unwrap();
    let a = tree.find_label("A").unwrap();
    let b = tree.find_label("B").unwrap();
    assert_eq!(c, tree.root());

    let preorder: Vec<_> = tree.preorder().collect();
    assert_eq!(preorder, vec![c, a, b]);

    assert_eq!(tree.attributes(a).unwrap().edge_length, 1.0);
    assert_eq!(tree.attributes(b).unwrap().edge_length, 2.0);
    assert_eq!(tree.attributes(a).unwrap().parent, c);
    assert_eq!(tree.attributes(c).unwrap().children, &[a, b]);
}

#[test]
fn test_basic_tree_relationships() {
    let tree = parse_newick_str("((A:1.0,B:2.0):3.0,C:4.0):0.5;").unwrap();

    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);

    // - Root has children (internal, C)
    let root = tree.root();
    let &[internal, c] = tree.children(root) else {
        panic!("root should have two children");
    };
    // - Internal node has children (A, B)
    let &[a, b] = tree.children(internal) else {
        panic!("internal node should have two children");
    };

    assert_eq!(tree.label(a), "A");
    assert_eq!(tree.label(b), "B");
    assert_eq!(tree.label(c), "C");
    assert_eq!(tree.label(internal), "");

    assert_eq!(tree.parent(internal), root);
    assert_eq!(tree.parent(a), internal);
    assert_eq!(tree.parent(b), internal);
    assert_eq!(tree.parent(c), root);

    assert_eq!(tree.edge_length(internal), 3.0);
    assert_eq!(tree.edge_length(root), 0.5);
    assert!(tree.is_valid());
}

#[test]
fn test_multifurcation() {
    let tree = parse_str("(A,B,C,D,(E,F,G)H)root;").unwrap();
    assert_eq!(tree.children(tree.root()).len(), 5);
    let h = tree.find_label("H").unwrap();
    let children: Vec<_> = tree.children(h).iter().map(|&i| tree.label(i)).collect();
    assert_eq!(children, ["E", "F", "G"]);
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd Taxon':4.0):0.0;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert!(tree.find_label("Taxon one").is_some());
    assert!(tree.find_label("Second's taxon").is_some());
    assert!(tree.find_label("3rd Taxon").is_some());
}

#[test]
fn test_tree_with_scientific_notation() {
    let newick = "((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;";
    let tree = parse_str(newick).unwrap();

    assert_eq!(tree.edge_length(tree.find_label("A").unwrap()), 1e-5);
    assert_eq!(tree.edge_length(tree.find_label("B").unwrap()), 2500.0);
    assert_eq!(tree.edge_length(tree.find_label("C").unwrap()), 3.14e-10);
    assert_eq!(tree.edge_length(1), 100.0);
}

#[test]
fn test_integer_edge_lengths() {
    let tree = parse_str("(A:1,B:20)C:0;").unwrap();
    assert_eq!(tree.edge_length(2), 20.0);
    assert!(tree.has_edge_lengths());
}

#[test]
fn test_optional_labels_and_lengths() {
    let tree = parse_str("((:1.0,B),(,));").unwrap();
    assert_eq!(tree.num_nodes(), 7);
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.label(2), "");
    assert_eq!(tree.edge_length(2), 1.0);
    assert_eq!(tree.edge_length(3), 0.0);
    assert!(tree.is_valid());
}

#[test]
fn test_whitespace_is_ignored() {
    let tree = parse_str("  (\n\tA : 1 ,\r\n B:2 ) C ;").unwrap();
    let expected = parse_str("(A:1,B:2)C;").unwrap();
    assert_eq!(tree, expected);
}

#[test]
fn test_newick_with_comments() {
    let newick = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2):0.0[The end.];";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.edge_length(tree.find_label("C").unwrap()), 2.2);
}

#[test]
fn test_trailing_input_is_ignored() {
    let tree = parse_str("(A,B); (C,D);").unwrap();
    assert!(tree.find_label("A").is_some());
    assert!(tree.find_label("C").is_none());
}

#[test]
fn test_from_str() {
    let tree: CompactTree = "(A,B)C;".parse().unwrap();
    assert_eq!(tree.label(tree.root()), "C");
}

#[test]
fn test_deep_comb_does_not_overflow() {
    let depth = 100_000;
    let mut newick = "(".repeat(depth);
    newick.push('A');
    for i in 0..depth {
        newick.push_str(&format!(",B{i})"));
    }
    newick.push(';');

    let tree = parse_str(&newick).unwrap();
    assert_eq!(tree.num_nodes(), 2 * depth + 1);
    assert_eq!(tree.preorder().count(), tree.num_nodes());
    assert_eq!(tree.depth(tree.find_label("A").unwrap()), depth);
    assert!(tree.is_valid());
}

// --- TESTS PARSER CONFIGURATION ---
#[test]
fn test_without_labels() {
    let mut parser = NewickParser::new().with_labels(false);
    let tree = parser
        .parse_tree(&mut ByteParser::for_str("(A:1,B:2)C;"))
        .unwrap();
    assert!(!tree.has_labels());
    assert!(tree.preorder().all(|i| tree.label(i).is_empty()));
    assert_eq!(tree.edge_length(2), 2.0);
}

#[test]
fn test_without_edge_lengths() {
    let mut parser = NewickParser::new().with_edge_lengths(false);
    let tree = parser
        .parse_tree(&mut ByteParser::for_str("(A:1,B:2)C;"))
        .unwrap();
    assert!(!tree.has_edge_lengths());
    assert_eq!(tree.total_branch_length(), 0.0);
    assert_eq!(tree.label(1), "A");
}

#[test]
fn test_edge_lengths_validated_even_when_not_stored() {
    let mut parser = NewickParser::new().with_edge_lengths(false);
    let result = parser.parse_tree(&mut ByteParser::for_str("(A:x,B:2)C;"));
    assert!(result.is_err());
}

#[test]
fn test_underscores_as_spaces() {
    let mut parser = NewickParser::new().with_underscores_as_spaces(true);
    let tree = parser
        .parse_tree(&mut ByteParser::for_str("(Homo_sapiens,'Pan_troglodytes');"))
        .unwrap();
    assert_eq!(tree.label(1), "Homo sapiens");
    assert_eq!(tree.label(2), "Pan_troglodytes");
}

#[test]
fn test_parse_all_from_str() {
    let byte_parser = ByteParser::for_str("(A,B);\n[comment]\n((A,B),C);\n");
    let trees = NewickParser::new().parse_all(byte_parser).unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0].num_nodes(), 3);
    assert_eq!(trees[1].num_nodes(), 5);
}

// --- TESTS MALFORMED INPUT ---
#[test]
fn test_unbalanced_open_parenthesis() {
    let err = parse_str("(A,B;").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::UnbalancedParentheses(_)));
    assert_eq!(err.position(), 4);
}

#[test]
fn test_unbalanced_close_parenthesis() {
    let err = parse_str("(A,B));").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::UnbalancedParentheses(_)));
    assert_eq!(err.position(), 5);
}

#[test]
fn test_missing_semicolon() {
    let err = parse_str("(A,B)C").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEof);
    assert_eq!(err.position(), 6);

    let err = parse_str("").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEof);
}

#[test]
fn test_invalid_edge_length() {
    let malformed = [
        "(A:abc,B);",
        "(A:,B);",
        "(A:1.2.3,B);",
        "(A:1e,B);",
        "(A:1e400,B);",
        "(A:-1e309,B);",
    ];
    for newick in malformed {
        let err = parse_str(newick).unwrap_err();
        assert!(
            matches!(err.kind(), ParsingErrorType::InvalidEdgeLength(_)),
            "expected invalid edge length for {newick}, got {err}"
        );
    }
}

#[test]
fn test_unclosed_comment_and_quote() {
    let err = parse_str("(A[oops,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);

    let err = parse_str("('A,B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedQuote);
}

#[test]
fn test_error_message_has_context() {
    let err = parse_str("((A,B),C;").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("position 8"), "{msg}");
    assert_eq!(err.context(), ";");
}

// --- TESTS NEWICK FILE PARSING ---
#[test]
fn test_parse_file() {
    let tree = parse_file("tests/fixtures/primates.nwk").unwrap();

    assert_eq!(tree.num_nodes(), 12);
    assert_eq!(tree.num_leaves(), 7);
    assert_eq!(tree.label(tree.root()), "Simiiformes");
    assert_eq!(tree.children(tree.root()).len(), 3);
    assert!(tree.find_label("Papio anubis").is_some());
    assert!(tree.is_valid());

    let homo = tree.find_label("Homo_sapiens").unwrap();
    let pan = tree.find_label("Pan_troglodytes").unwrap();
    assert_eq!(tree.label(tree.mrca(homo, pan)), "Hominini");
}

#[test]
fn test_parse_newick_file_reads_first_tree() {
    let tree = parse_newick_file("tests/fixtures/three_trees.nwk").unwrap();
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.total_branch_length(), 10.0);
}

#[test]
fn test_parse_file_all() {
    let trees = parse_file_all("tests/fixtures/three_trees.nwk").unwrap();
    assert_eq!(trees.len(), 3);
    assert_eq!(trees[1].edge_length(1), 0.1);
    assert_eq!(trees[2].label(0), "root");
    assert_eq!(trees[2].children(0).len(), 4);
}

#[test]
fn test_parse_file_all_matches_in_memory() {
    let buffered = parse_file_all("tests/fixtures/three_trees.nwk").unwrap();
    let byte_parser = ByteParser::from_file("tests/fixtures/three_trees.nwk").unwrap();
    let in_memory = NewickParser::new().parse_all(byte_parser).unwrap();
    assert_eq!(buffered, in_memory);
}

#[test]
fn test_parse_unbalanced_file() {
    let err = parse_file("tests/fixtures/unbalanced.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::UnbalancedParentheses(_)));
}

#[test]
fn test_missing_file() {
    let err = CompactTree::from_file("tests/fixtures/missing.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::IoError(_)));
}
