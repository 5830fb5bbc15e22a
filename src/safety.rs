use std::{fmt, result};

use serde::Serialize;

use crate::graph::{ConceptGraph, GraphIndex};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Adjacency entries whose mirror entry is missing.
    pub asymmetric_adjacency: usize,
    /// Adjacent pairs with no descriptor in either direction.
    pub unresolvable_edges: usize,
    /// Descriptor pairs that are not adjacent.
    pub dangling_descriptors: usize,
    pub invalid_labels: usize,
    pub invalid_weights: usize,
}

impl SafetyReport {
    pub fn merge(&mut self, other: &SafetyReport) {
        self.total_nodes = self.total_nodes.max(other.total_nodes);
        self.total_edges = self.total_edges.max(other.total_edges);
        self.asymmetric_adjacency += other.asymmetric_adjacency;
        self.unresolvable_edges += other.unresolvable_edges;
        self.dangling_descriptors += other.dangling_descriptors;
        self.invalid_labels += other.invalid_labels;
        self.invalid_weights += other.invalid_weights;
    }

    pub fn has_issues(&self) -> bool {
        self.asymmetric_adjacency > 0
            || self.unresolvable_edges > 0
            || self.dangling_descriptors > 0
            || self.invalid_labels > 0
            || self.invalid_weights > 0
    }
}

#[derive(Debug)]
pub struct SafetyError {
    pub report: SafetyReport,
}

impl fmt::Display for SafetyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph consistency violations detected")
    }
}

impl std::error::Error for SafetyError {}

pub fn validate_adjacency(graph: &ConceptGraph) -> SafetyReport {
    let mut report = base_report(graph);
    for node in graph.node_ids() {
        for &next in graph.neighbors(node) {
            let mirrored = graph.neighbors(next).contains(&node);
            if !mirrored {
                report.asymmetric_adjacency += 1;
            }
            if (node < next || !mirrored)
                && graph.edge_descriptors(node, next).is_empty()
                && graph.edge_descriptors(next, node).is_empty()
            {
                report.unresolvable_edges += 1;
            }
        }
    }
    for (from, to) in graph.descriptor_pairs() {
        if !graph.neighbors(from).contains(&to) {
            report.dangling_descriptors += 1;
        }
    }
    report
}

pub fn validate_descriptors(graph: &ConceptGraph) -> SafetyReport {
    let mut report = base_report(graph);
    for (from, to) in graph.descriptor_pairs() {
        for descriptor in graph.edge_descriptors(from, to) {
            if graph.label_name(descriptor.label).is_none() {
                report.invalid_labels += 1;
            }
            if !descriptor.weight.is_finite() || descriptor.weight < 0.0 {
                report.invalid_weights += 1;
            }
        }
    }
    report
}

pub fn run_safety_checks(graph: &ConceptGraph) -> SafetyReport {
    let mut report = SafetyReport::default();
    report.merge(&validate_adjacency(graph));
    report.merge(&validate_descriptors(graph));
    report
}

pub fn run_strict_safety_checks(graph: &ConceptGraph) -> result::Result<(), SafetyError> {
    let report = run_safety_checks(graph);
    if report.has_issues() {
        Err(SafetyError { report })
    } else {
        Ok(())
    }
}

fn base_report(graph: &ConceptGraph) -> SafetyReport {
    SafetyReport {
        total_nodes: graph.node_count(),
        total_edges: graph.edge_count(),
        ..SafetyReport::default()
    }
}
