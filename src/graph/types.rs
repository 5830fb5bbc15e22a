use serde::{Deserialize, Serialize};

use crate::errors::ConceptPathError;

pub type NodeIdx = usize;
pub type LabelIdx = usize;

/// One recorded edge between two nodes in a fixed direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EdgeDescriptor {
    pub label: LabelIdx,
    pub weight: f64,
    /// Row of the source corpus the edge came from.
    pub row: usize,
}

/// Read-only access contract every graph index provides to search, resolution
/// and rendering. Missing entries read as empty slices, never as errors.
pub trait GraphIndex {
    fn node_count(&self) -> usize;
    fn label_count(&self) -> usize;
    fn node_index(&self, name: &str) -> Option<NodeIdx>;
    fn node_name(&self, node: NodeIdx) -> Option<&str>;
    fn label_index(&self, name: &str) -> Option<LabelIdx>;
    fn label_name(&self, label: LabelIdx) -> Option<&str>;
    fn neighbors(&self, node: NodeIdx) -> &[NodeIdx];
    fn edge_descriptors(&self, from: NodeIdx, to: NodeIdx) -> &[EdgeDescriptor];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotEdge {
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub label: LabelIdx,
    pub weight: f64,
    pub row: usize,
}

/// Serialized form of a [`crate::graph::ConceptGraph`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    pub labels: Vec<String>,
    pub adjacency: Vec<Vec<NodeIdx>>,
    pub edges: Vec<SnapshotEdge>,
}

pub fn validate_name(kind: &str, name: &str) -> Result<(), ConceptPathError> {
    if name.trim().is_empty() {
        return Err(ConceptPathError::invalid_input(format!(
            "{kind} name must be set"
        )));
    }
    Ok(())
}

pub fn validate_weight(weight: f64) -> Result<(), ConceptPathError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ConceptPathError::invalid_input(format!(
            "edge weight must be a non-negative finite number, got {weight}"
        )));
    }
    Ok(())
}
