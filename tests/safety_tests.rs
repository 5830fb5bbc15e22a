use conceptpath::{
    ConceptGraph, GraphBuilder, GraphSnapshot,
    graph::SnapshotEdge,
    safety::{run_safety_checks, run_strict_safety_checks, validate_adjacency, validate_descriptors},
};

fn edge(from: usize, to: usize, label: usize, weight: f64) -> SnapshotEdge {
    SnapshotEdge {
        from,
        to,
        label,
        weight,
        row: 0,
    }
}

fn snapshot(adjacency: Vec<Vec<usize>>, edges: Vec<SnapshotEdge>) -> ConceptGraph {
    ConceptGraph::from_snapshot_unaudited(GraphSnapshot {
        nodes: vec!["a".into(), "b".into(), "c".into()],
        labels: vec!["rel".into()],
        adjacency,
        edges,
    })
    .unwrap()
}

#[test]
fn report_for_clean_graph_no_issues() {
    let mut builder = GraphBuilder::new();
    builder.add_edge("a", "rel", "b", 1.0).unwrap();
    builder.add_edge("c", "rel", "b", 1.0).unwrap();
    let graph = builder.build();
    let report = run_safety_checks(&graph);
    assert_eq!(report.total_nodes, 3);
    assert_eq!(report.total_edges, 2);
    assert!(!report.has_issues());
    assert!(run_strict_safety_checks(&graph).is_ok());
}

#[test]
fn asymmetric_adjacency_detected() {
    let graph = snapshot(vec![vec![1], vec![], vec![]], vec![edge(0, 1, 0, 1.0)]);
    let report = validate_adjacency(&graph);
    assert_eq!(report.asymmetric_adjacency, 1);
    assert_eq!(report.unresolvable_edges, 0);
}

#[test]
fn unresolvable_edge_detected_once_per_pair() {
    let graph = snapshot(vec![vec![1], vec![0], vec![]], Vec::new());
    assert_eq!(validate_adjacency(&graph).unresolvable_edges, 1);
    let one_sided = snapshot(vec![vec![], vec![], vec![1]], Vec::new());
    let report = validate_adjacency(&one_sided);
    assert_eq!(report.unresolvable_edges, 1);
    assert_eq!(report.asymmetric_adjacency, 1);
}

#[test]
fn dangling_descriptor_detected() {
    let graph = snapshot(vec![vec![], vec![], vec![]], vec![edge(2, 0, 0, 1.0)]);
    assert_eq!(validate_adjacency(&graph).dangling_descriptors, 1);
}

#[test]
fn invalid_label_and_weight_detected() {
    let graph = snapshot(
        vec![vec![1, 2], vec![0], vec![0]],
        vec![edge(0, 1, 5, 1.0), edge(0, 2, 0, -2.0)],
    );
    let report = validate_descriptors(&graph);
    assert_eq!(report.invalid_labels, 1);
    assert_eq!(report.invalid_weights, 1);
    let err = run_strict_safety_checks(&graph).unwrap_err();
    assert!(err.report.has_issues());
    assert_eq!(err.to_string(), "graph consistency violations detected");
}
