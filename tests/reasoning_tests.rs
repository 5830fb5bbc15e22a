use conceptpath::{
    CacheStats, ConceptGraph, ConceptPathError, GraphBuilder, GraphSnapshot, PathReasoner,
    QuestionExample, ReasoningConfig, SearchLimits, StopwordExtractor, TripleRenderer,
};

fn concept_graph() -> ConceptGraph {
    let mut builder = GraphBuilder::new();
    builder.add_edge("dog", "IsA", "animal", 2.0).unwrap();
    builder.add_edge("dog", "Desires", "bone", 3.0).unwrap();
    builder.add_edge("bone", "PartOf", "skeleton", 1.5).unwrap();
    builder.add_edge("animal", "HasA", "skeleton", 1.0).unwrap();
    builder.add_edge("ice cream", "AtLocation", "freezer", 4.0).unwrap();
    builder.add_edge("freezer", "AtLocation", "kitchen", 2.0).unwrap();
    builder.build()
}

fn config(parallel: bool) -> ReasoningConfig {
    ReasoningConfig {
        parallel,
        ..ReasoningConfig::default()
    }
}

#[test]
fn test_out_of_vocabulary_pair_is_skipped() {
    let graph = concept_graph();
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), config(true)).unwrap();
    let report = reasoner.connect_terms(["dog", "unicorn"], ["bone"]).unwrap();
    assert_eq!(report.stats.pairs_total, 2);
    assert_eq!(report.stats.pairs_skipped, 1);
    assert_eq!(report.stats.searches, 1);
    assert_eq!(report.paths.len(), 1);
    assert_eq!(report.paths[0].premise_term, "dog");
    assert_eq!(report.paths[0].text, "dog desires bone");
}

#[test]
fn test_unreachable_pairs_contribute_nothing() {
    let graph = concept_graph();
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), config(false)).unwrap();
    let report = reasoner.connect_terms(["dog"], ["kitchen"]).unwrap();
    assert_eq!(report.stats.searches, 1);
    assert_eq!(report.stats.paths_found, 0);
    assert!(report.paths.is_empty());
}

#[test]
fn test_explain_extracts_terms_and_ranks() {
    let graph = concept_graph();
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), config(true)).unwrap();
    let report = reasoner
        .explain(&StopwordExtractor::default(), "The dog wants a bone", "animal")
        .unwrap();
    assert_eq!(report.stats.pairs_total, 4);
    assert_eq!(report.stats.pairs_skipped, 2);
    assert_eq!(report.stats.searches, 2);
    let texts: Vec<_> = report.paths.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["dog is a animal", "dog desires bone, dog is a animal"]
    );
    assert_eq!(report.paths[1].weights, vec![3.0, 2.0]);
}

#[test]
fn test_max_paths_keeps_shortest() {
    let graph = concept_graph();
    let cfg = ReasoningConfig {
        max_paths: 1,
        ..config(true)
    };
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), cfg).unwrap();
    let report = reasoner.connect_terms(["dog", "bone"], ["skeleton"]).unwrap();
    assert_eq!(report.stats.paths_found, 2);
    assert_eq!(report.paths.len(), 1);
    assert_eq!(report.paths[0].text, "bone part of skeleton");
}

#[test]
fn test_parallel_and_sequential_agree() {
    let graph = concept_graph();
    let premise = ["dog", "bone", "ice cream", "skeleton"];
    let choice = ["animal", "kitchen", "freezer", "bone"];
    let parallel = PathReasoner::new(&graph, TripleRenderer::default(), config(true))
        .unwrap()
        .connect_terms(premise, choice)
        .unwrap();
    let sequential = PathReasoner::new(&graph, TripleRenderer::default(), config(false))
        .unwrap()
        .connect_terms(premise, choice)
        .unwrap();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.stats.searches, 16);
}

#[test]
fn test_invalid_config_rejected_before_search() {
    let graph = concept_graph();
    let zero_paths = ReasoningConfig {
        max_paths: 0,
        ..ReasoningConfig::default()
    };
    assert!(matches!(
        PathReasoner::new(&graph, TripleRenderer::default(), zero_paths),
        Err(ConceptPathError::InvalidInput(_))
    ));
    let zero_len = ReasoningConfig {
        limits: SearchLimits::with_max_path_len(0),
        ..ReasoningConfig::default()
    };
    assert!(PathReasoner::new(&graph, TripleRenderer::default(), zero_len).is_err());
}

#[test]
fn test_consistency_violation_aborts_query() {
    let snapshot = GraphSnapshot {
        nodes: vec!["sun".into(), "moon".into()],
        labels: vec!["RelatedTo".into()],
        adjacency: vec![vec![1], vec![0]],
        edges: Vec::new(),
    };
    let graph = ConceptGraph::from_snapshot_unaudited(snapshot).unwrap();
    for parallel in [true, false] {
        let reasoner =
            PathReasoner::new(&graph, TripleRenderer::default(), config(parallel)).unwrap();
        let err = reasoner.connect_terms(["sun"], ["moon"]).unwrap_err();
        assert!(err.is_consistency_violation());
    }
}

#[test]
fn test_cache_serves_repeated_queries() {
    let graph = concept_graph();
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), config(true))
        .unwrap()
        .with_cache();
    let first = reasoner.connect_terms(["dog", "bone"], ["animal"]).unwrap();
    let second = reasoner.connect_terms(["dog", "bone"], ["animal"]).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        reasoner.cache_stats(),
        Some(CacheStats {
            hits: 2,
            misses: 2,
            entries: 2,
        })
    );
    reasoner.clear_cache();
    let third = reasoner.connect_terms(["dog", "bone"], ["animal"]).unwrap();
    assert_eq!(first, third);
    let stats = reasoner.cache_stats().unwrap();
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.entries, 2);
}

#[test]
fn test_reasoner_without_cache_reports_no_stats() {
    let graph = concept_graph();
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), config(false)).unwrap();
    assert!(reasoner.cache_stats().is_none());
}

#[test]
fn test_same_node_pair_does_not_outrank_real_paths() {
    let mut builder = GraphBuilder::new();
    builder.add_edge("dog", "Desires", "bone", 3.0).unwrap();
    let graph = builder.build();
    let cfg = ReasoningConfig {
        max_paths: 1,
        ..config(true)
    };
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), cfg).unwrap();
    let report = reasoner.connect_terms(["dog"], ["dog", "bone"]).unwrap();
    assert_eq!(report.stats.searches, 2);
    assert_eq!(report.stats.paths_found, 1);
    assert_eq!(report.paths.len(), 1);
    assert_eq!(report.paths[0].text, "dog desires bone");
    assert_eq!(report.paths[0].weights, vec![3.0]);
}

#[test]
fn test_explain_example_unions_question_context_and_choices() {
    let graph = concept_graph();
    let reasoner = PathReasoner::new(&graph, TripleRenderer::default(), config(true)).unwrap();
    let example = QuestionExample {
        question: "Where would you keep ice cream?".into(),
        context: "The dogs are hungry.".into(),
        choices: vec!["kitchen".into(), "skeleton".into()],
    };
    let report = reasoner
        .explain_example(&StopwordExtractor::default(), &example)
        .unwrap();
    let texts: Vec<_> = report.paths.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "ice cream at location freezer, freezer at location kitchen",
            "dog is a animal, animal has a skeleton",
        ]
    );
    assert_eq!(report.paths[1].premise_term, "dog");
}
