//! In-memory concept graph index. Nodes and labels are addressed by dense integer
//! indices; adjacency is stored per node as a sorted neighbour list so traversal
//! order is deterministic, and edge descriptors are keyed by the ordered pair they
//! were recorded for. A pair that is only adjacent in one stored direction is
//! resolved through the reverse key (see [`crate::resolver`]).

mod types;

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use ahash::{AHashMap, AHashSet};

use crate::errors::ConceptPathError;

pub use types::{
    EdgeDescriptor, GraphIndex, GraphSnapshot, LabelIdx, NodeIdx, SnapshotEdge, validate_name,
    validate_weight,
};

#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    nodes: Vec<String>,
    node_lookup: AHashMap<String, NodeIdx>,
    labels: Vec<String>,
    label_lookup: AHashMap<String, LabelIdx>,
    adjacency: Vec<Vec<NodeIdx>>,
    descriptors: AHashMap<(NodeIdx, NodeIdx), Vec<EdgeDescriptor>>,
}

impl ConceptGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Total number of recorded edge descriptors across all ordered pairs.
    pub fn edge_count(&self) -> usize {
        self.descriptors.values().map(Vec::len).sum()
    }

    /// Number of undirected adjacency edges.
    pub fn adjacency_edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        0..self.nodes.len()
    }

    /// Ordered pairs that carry at least one descriptor, sorted for stable output.
    pub fn descriptor_pairs(&self) -> Vec<(NodeIdx, NodeIdx)> {
        let mut pairs: Vec<_> = self.descriptors.keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn require_node(&self, name: &str) -> Result<NodeIdx, ConceptPathError> {
        self.node_index(name)
            .ok_or_else(|| ConceptPathError::not_found(format!("node '{name}'")))
    }

    /// Loads a snapshot and rejects it if the safety audit reports any issue.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, ConceptPathError> {
        let graph = Self::from_snapshot_unaudited(snapshot)?;
        let report = crate::safety::run_safety_checks(&graph);
        if report.has_issues() {
            return Err(ConceptPathError::load(format!(
                "graph failed consistency audit: {report:?}"
            )));
        }
        Ok(graph)
    }

    /// Loads a snapshot checking only name bijectivity and index ranges. Used to
    /// inspect graphs that may violate the adjacency/descriptor invariant.
    pub fn from_snapshot_unaudited(snapshot: GraphSnapshot) -> Result<Self, ConceptPathError> {
        let GraphSnapshot {
            nodes,
            labels,
            mut adjacency,
            edges,
        } = snapshot;
        let node_lookup = build_lookup("node", &nodes)?;
        let label_lookup = build_lookup("label", &labels)?;
        if adjacency.len() > nodes.len() {
            return Err(ConceptPathError::load(format!(
                "adjacency lists {} entries for {} nodes",
                adjacency.len(),
                nodes.len()
            )));
        }
        adjacency.resize_with(nodes.len(), Vec::new);
        for (node, neighbors) in adjacency.iter_mut().enumerate() {
            if let Some(bad) = neighbors.iter().find(|n| **n >= nodes.len()) {
                return Err(ConceptPathError::load(format!(
                    "node {node} lists unknown neighbour {bad}"
                )));
            }
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        let mut descriptors: AHashMap<(NodeIdx, NodeIdx), Vec<EdgeDescriptor>> = AHashMap::new();
        for edge in edges {
            if edge.from >= nodes.len() || edge.to >= nodes.len() {
                return Err(ConceptPathError::load(format!(
                    "edge row {} references unknown node",
                    edge.row
                )));
            }
            descriptors
                .entry((edge.from, edge.to))
                .or_default()
                .push(EdgeDescriptor {
                    label: edge.label,
                    weight: edge.weight,
                    row: edge.row,
                });
        }
        Ok(Self {
            nodes,
            node_lookup,
            labels,
            label_lookup,
            adjacency,
            descriptors,
        })
    }

    pub fn to_snapshot(&self) -> GraphSnapshot {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (from, to) in self.descriptor_pairs() {
            for descriptor in &self.descriptors[&(from, to)] {
                edges.push(SnapshotEdge {
                    from,
                    to,
                    label: descriptor.label,
                    weight: descriptor.weight,
                    row: descriptor.row,
                });
            }
        }
        GraphSnapshot {
            nodes: self.nodes.clone(),
            labels: self.labels.clone(),
            adjacency: self.adjacency.clone(),
            edges,
        }
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ConceptPathError> {
        Self::from_snapshot(read_snapshot(path)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConceptPathError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| ConceptPathError::load(format!("{}: {e}", path.display())))?;
        serde_json::to_writer(BufWriter::new(file), &self.to_snapshot())
            .map_err(|e| ConceptPathError::load(format!("{}: {e}", path.display())))
    }
}

impl GraphIndex for ConceptGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn label_count(&self) -> usize {
        self.labels.len()
    }

    fn node_index(&self, name: &str) -> Option<NodeIdx> {
        self.node_lookup.get(name).copied()
    }

    fn node_name(&self, node: NodeIdx) -> Option<&str> {
        self.nodes.get(node).map(String::as_str)
    }

    fn label_index(&self, name: &str) -> Option<LabelIdx> {
        self.label_lookup.get(name).copied()
    }

    fn label_name(&self, label: LabelIdx) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    fn neighbors(&self, node: NodeIdx) -> &[NodeIdx] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn edge_descriptors(&self, from: NodeIdx, to: NodeIdx) -> &[EdgeDescriptor] {
        self.descriptors
            .get(&(from, to))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Incrementally assembles a [`ConceptGraph`]. Names are interned, each recorded
/// edge is stored once in its original direction and adjacency is derived
/// symmetrically from it.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<String>,
    node_lookup: AHashMap<String, NodeIdx>,
    labels: Vec<String>,
    label_lookup: AHashMap<String, LabelIdx>,
    adjacency: Vec<AHashSet<NodeIdx>>,
    descriptors: AHashMap<(NodeIdx, NodeIdx), Vec<EdgeDescriptor>>,
    next_row: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `name`, interning it if unseen.
    pub fn add_node(&mut self, name: &str) -> Result<NodeIdx, ConceptPathError> {
        validate_name("node", name)?;
        if let Some(&idx) = self.node_lookup.get(name) {
            return Ok(idx);
        }
        let idx = self.nodes.len();
        self.nodes.push(name.to_string());
        self.node_lookup.insert(name.to_string(), idx);
        self.adjacency.push(AHashSet::new());
        Ok(idx)
    }

    pub fn add_label(&mut self, name: &str) -> Result<LabelIdx, ConceptPathError> {
        validate_name("label", name)?;
        if let Some(&idx) = self.label_lookup.get(name) {
            return Ok(idx);
        }
        let idx = self.labels.len();
        self.labels.push(name.to_string());
        self.label_lookup.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Records `from -[label]-> to`, interning names, with the next row number.
    pub fn add_edge(
        &mut self,
        from: &str,
        label: &str,
        to: &str,
        weight: f64,
    ) -> Result<(), ConceptPathError> {
        let from = self.add_node(from)?;
        let to = self.add_node(to)?;
        let label = self.add_label(label)?;
        let row = self.next_row;
        self.add_descriptor(from, to, EdgeDescriptor { label, weight, row })
    }

    pub fn add_descriptor(
        &mut self,
        from: NodeIdx,
        to: NodeIdx,
        descriptor: EdgeDescriptor,
    ) -> Result<(), ConceptPathError> {
        if from == to {
            return Err(ConceptPathError::invalid_input(
                "self loops are not supported",
            ));
        }
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return Err(ConceptPathError::invalid_input(
                "edge endpoints must reference existing nodes",
            ));
        }
        if descriptor.label >= self.labels.len() {
            return Err(ConceptPathError::invalid_input(format!(
                "unknown label index {}",
                descriptor.label
            )));
        }
        validate_weight(descriptor.weight)?;
        self.descriptors
            .entry((from, to))
            .or_default()
            .push(descriptor);
        self.adjacency[from].insert(to);
        self.adjacency[to].insert(from);
        self.next_row = self.next_row.max(descriptor.row + 1);
        Ok(())
    }

    pub fn build(self) -> ConceptGraph {
        let adjacency = self
            .adjacency
            .into_iter()
            .map(|set| {
                let mut neighbors: Vec<_> = set.into_iter().collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();
        ConceptGraph {
            nodes: self.nodes,
            node_lookup: self.node_lookup,
            labels: self.labels,
            label_lookup: self.label_lookup,
            adjacency,
            descriptors: self.descriptors,
        }
    }
}

pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<GraphSnapshot, ConceptPathError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ConceptPathError::load(format!("{}: {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ConceptPathError::load(format!("{}: {e}", path.display())))
}

fn build_lookup(kind: &str, names: &[String]) -> Result<AHashMap<String, usize>, ConceptPathError> {
    let mut lookup = AHashMap::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        validate_name(kind, name)?;
        if lookup.insert(name.clone(), idx).is_some() {
            return Err(ConceptPathError::load(format!(
                "duplicate {kind} name '{name}'"
            )));
        }
    }
    Ok(lookup)
}
