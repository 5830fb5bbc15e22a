//! Edge resolution for consecutive path nodes. Descriptors are only stored in the
//! direction they were recorded, so a traversal step `u -> v` is looked up as
//! `(u, v)` first and as `(v, u)` second, in which case the step is reversed.

use tracing::error;

use crate::{
    errors::ConceptPathError,
    graph::{EdgeDescriptor, GraphIndex, NodeIdx},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedEdge<'a> {
    pub descriptors: &'a [EdgeDescriptor],
    /// The descriptors were recorded as `to -> from`.
    pub reversed: bool,
}

impl ResolvedEdge<'_> {
    /// Descriptor with the largest weight; ties keep the first recorded one.
    pub fn strongest(&self) -> Option<&EdgeDescriptor> {
        self.descriptors.iter().fold(None, |best, candidate| match best {
            Some(current) if current.weight >= candidate.weight => Some(current),
            _ => Some(candidate),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStep<'a> {
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub edge: ResolvedEdge<'a>,
}

pub fn resolve_edge<G>(
    graph: &G,
    from: NodeIdx,
    to: NodeIdx,
) -> Result<ResolvedEdge<'_>, ConceptPathError>
where
    G: GraphIndex + ?Sized,
{
    let forward = graph.edge_descriptors(from, to);
    if !forward.is_empty() {
        return Ok(ResolvedEdge {
            descriptors: forward,
            reversed: false,
        });
    }
    let backward = graph.edge_descriptors(to, from);
    if !backward.is_empty() {
        return Ok(ResolvedEdge {
            descriptors: backward,
            reversed: true,
        });
    }
    error!(from, to, "adjacent nodes have no edge descriptor in either direction");
    Err(ConceptPathError::consistency(from, to))
}

/// Resolves every consecutive pair of `path`. Paths with fewer than two nodes
/// have no steps.
pub fn resolve_path<'g, G>(
    graph: &'g G,
    path: &[NodeIdx],
) -> Result<Vec<ResolvedStep<'g>>, ConceptPathError>
where
    G: GraphIndex + ?Sized,
{
    path.windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            resolve_edge(graph, from, to).map(|edge| ResolvedStep { from, to, edge })
        })
        .collect()
}
