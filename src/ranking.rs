use std::cmp::Ordering;

use crate::errors::ConceptPathError;

/// Anything rankable by its per-edge weight sequence.
pub trait WeightedPath {
    fn weights(&self) -> &[f64];

    fn edge_count(&self) -> usize {
        self.weights().len()
    }

    /// Product of the edge weights; `1.0` for a path without edges.
    fn weight_product(&self) -> f64 {
        self.weights().iter().product()
    }
}

impl WeightedPath for crate::render::RenderedPath {
    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Shorter paths first, then larger weight product. Equal keys compare equal so a
/// stable sort keeps their input order.
pub fn compare_paths<P: WeightedPath>(a: &P, b: &P) -> Ordering {
    a.edge_count().cmp(&b.edge_count()).then_with(|| {
        b.weight_product()
            .partial_cmp(&a.weight_product())
            .unwrap_or(Ordering::Equal)
    })
}

/// Sorts `paths` by [`compare_paths`] and keeps at most `max_paths` of them.
pub fn select_paths<P: WeightedPath>(
    mut paths: Vec<P>,
    max_paths: usize,
) -> Result<Vec<P>, ConceptPathError> {
    if max_paths == 0 {
        return Err(ConceptPathError::invalid_input(
            "max_paths must be positive",
        ));
    }
    paths.sort_by(compare_paths);
    paths.truncate(max_paths);
    Ok(paths)
}
