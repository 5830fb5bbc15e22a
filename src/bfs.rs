use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::ConceptPathError,
    graph::{GraphIndex, NodeIdx},
};

pub const DEFAULT_MAX_PATH_LEN: usize = 3;

/// Bounds on a single path search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of edges in a returned path. Must be at least 1.
    pub max_path_len: usize,
    /// Stop once this many nodes have been visited. `None` is unbounded.
    pub max_visits: Option<usize>,
    /// Stop once the search has run this long. `None` is unbounded.
    pub deadline: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_path_len: DEFAULT_MAX_PATH_LEN,
            max_visits: None,
            deadline: None,
        }
    }
}

impl SearchLimits {
    pub fn with_max_path_len(max_path_len: usize) -> Self {
        Self {
            max_path_len,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConceptPathError> {
        if self.max_path_len == 0 {
            return Err(ConceptPathError::invalid_input(
                "max_path_len must be positive",
            ));
        }
        if self.max_visits == Some(0) {
            return Err(ConceptPathError::invalid_input(
                "max_visits must be positive when set",
            ));
        }
        Ok(())
    }
}

/// Breadth-first search for the shortest path (in edges) from `start` to `end`,
/// treating adjacency as undirected.
///
/// Returns the node sequence `start..=end`, or an empty vector when `end` is not
/// reachable within `limits.max_path_len` edges or a safety limit cut the search
/// short. `search(x, x, ..)` is `[x]` for every valid limit.
///
/// Nodes discovered at the depth boundary are marked visited but never expanded,
/// so they cannot be rediscovered through a later branch.
pub fn search<G>(
    graph: &G,
    start: NodeIdx,
    end: NodeIdx,
    limits: &SearchLimits,
) -> Result<Vec<NodeIdx>, ConceptPathError>
where
    G: GraphIndex + ?Sized,
{
    limits.validate()?;
    if start == end {
        return Ok(vec![start]);
    }
    let started = limits.deadline.map(|_| Instant::now());
    let mut queue = VecDeque::new();
    let mut predecessors: AHashMap<NodeIdx, Option<NodeIdx>> = AHashMap::new();
    predecessors.insert(start, None);
    queue.push_back((start, 0usize));

    while let Some((node, depth)) = queue.pop_front() {
        if let (Some(deadline), Some(started)) = (limits.deadline, started) {
            if started.elapsed() >= deadline {
                debug!(start, end, ?deadline, "path search deadline reached");
                return Ok(Vec::new());
            }
        }
        for &next in graph.neighbors(node) {
            if predecessors.contains_key(&next) {
                continue;
            }
            predecessors.insert(next, Some(node));
            if next == end {
                return Ok(reconstruct(&predecessors, end));
            }
            if let Some(max_visits) = limits.max_visits {
                if predecessors.len() >= max_visits {
                    debug!(start, end, max_visits, "path search visit cap reached");
                    return Ok(Vec::new());
                }
            }
            if depth + 1 < limits.max_path_len {
                queue.push_back((next, depth + 1));
            }
        }
    }
    Ok(Vec::new())
}

fn reconstruct(predecessors: &AHashMap<NodeIdx, Option<NodeIdx>>, end: NodeIdx) -> Vec<NodeIdx> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&Some(parent)) = predecessors.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_walks_back_to_root() {
        let mut predecessors = AHashMap::new();
        predecessors.insert(4, None);
        predecessors.insert(7, Some(4));
        predecessors.insert(2, Some(7));
        assert_eq!(reconstruct(&predecessors, 2), vec![4, 7, 2]);
    }

    #[test]
    fn test_limits_reject_zero_length() {
        assert!(SearchLimits::with_max_path_len(0).validate().is_err());
        assert!(SearchLimits::with_max_path_len(1).validate().is_ok());
    }
}
