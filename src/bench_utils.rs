//! Seeded synthetic concept graphs for benchmarks and tests.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    errors::ConceptPathError,
    graph::{ConceptGraph, EdgeDescriptor, GraphBuilder},
};

const LABELS: &[&str] = &["RelatedTo", "IsA", "AtLocation", "PartOf", "UsedFor"];

#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticEdge {
    pub from: usize,
    pub to: usize,
    pub label: usize,
    pub weight: f64,
}

#[derive(Clone, Debug)]
pub struct GraphDataset {
    pub nodes: usize,
    pub edges: Vec<SyntheticEdge>,
}

impl GraphDataset {
    pub fn degrees(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.nodes];
        for edge in &self.edges {
            counts[edge.from] += 1;
            counts[edge.to] += 1;
        }
        counts
    }

    pub fn hub_index(&self) -> usize {
        let mut best = (0usize, 0usize);
        for (idx, deg) in self.degrees().into_iter().enumerate() {
            if deg > best.0 {
                best = (deg, idx);
            }
        }
        best.1
    }

    pub fn node_name(idx: usize) -> String {
        format!("concept {idx}")
    }

    pub fn to_graph(&self) -> Result<ConceptGraph, ConceptPathError> {
        let mut builder = GraphBuilder::new();
        for idx in 0..self.nodes {
            builder.add_node(&Self::node_name(idx))?;
        }
        for label in LABELS {
            builder.add_label(label)?;
        }
        for (row, edge) in self.edges.iter().enumerate() {
            builder.add_descriptor(
                edge.from,
                edge.to,
                EdgeDescriptor {
                    label: edge.label,
                    weight: edge.weight,
                    row,
                },
            )?;
        }
        Ok(builder.build())
    }
}

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Star,
    Grid2D { width: usize, height: usize },
    RandomErdosRenyi { edges: usize },
    ScaleFree { m: usize },
}

/// Builds a dataset of `node_count` nodes. Each edge gets a seeded label and
/// weight, and roughly half are recorded in the opposite direction so reverse
/// lookups get exercised.
pub fn generate_graph(shape: GraphShape, node_count: usize, seed: u64) -> GraphDataset {
    assert!(node_count > 1, "node_count must exceed 1");
    let pairs = match shape {
        GraphShape::Line => (0..node_count - 1).map(|idx| (idx, idx + 1)).collect(),
        GraphShape::Star => (1..node_count).map(|leaf| (0, leaf)).collect(),
        GraphShape::Grid2D { width, height } => grid_pairs(width, height, node_count),
        GraphShape::RandomErdosRenyi { edges } => random_pairs(node_count, edges, seed),
        GraphShape::ScaleFree { m } => scale_free_pairs(node_count, m, seed),
    };
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5EED);
    let edges = pairs
        .into_iter()
        .map(|(a, b)| {
            let (from, to) = if rng.gen_bool(0.5) { (a, b) } else { (b, a) };
            SyntheticEdge {
                from,
                to,
                label: rng.gen_range(0..LABELS.len()),
                weight: rng.gen_range(0.5..4.0),
            }
        })
        .collect();
    GraphDataset {
        nodes: node_count,
        edges,
    }
}

fn grid_pairs(width: usize, height: usize, node_count: usize) -> Vec<(usize, usize)> {
    assert_eq!(
        width * height,
        node_count,
        "grid dimensions must match node count"
    );
    let mut pairs = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in 0..width {
            let base = y * width + x;
            if x + 1 < width {
                pairs.push((base, base + 1));
            }
            if y + 1 < height {
                pairs.push((base, base + width));
            }
        }
    }
    pairs
}

fn random_pairs(node_count: usize, edge_count: usize, seed: u64) -> Vec<(usize, usize)> {
    let total_pairs = (node_count as u128 * (node_count as u128 - 1) / 2) as u64;
    assert!(
        edge_count as u64 <= total_pairs,
        "edge_count exceeds possible pairs"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = Vec::with_capacity(edge_count);
    let mut idx = 0u64;
    let mut remaining = edge_count as u64;
    while remaining > 0 && idx < total_pairs {
        let p = remaining as f64 / (total_pairs - idx) as f64;
        idx += sample_geometric(&mut rng, p);
        if idx >= total_pairs {
            break;
        }
        pairs.push(pair_from_index(idx, node_count as u64));
        idx += 1;
        remaining -= 1;
    }
    pairs
}

fn scale_free_pairs(node_count: usize, m: usize, seed: u64) -> Vec<(usize, usize)> {
    assert!(m > 0, "m must be positive");
    assert!(node_count > m + 1, "node_count must exceed m + 1");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut degrees = vec![0usize; node_count];
    let mut pairs = Vec::new();
    for u in 0..=m {
        for v in (u + 1)..=m {
            pairs.push((u, v));
            degrees[u] += 1;
            degrees[v] += 1;
        }
    }
    let mut total_degree: usize = degrees.iter().sum();
    for new_node in (m + 1)..node_count {
        let mut targets: Vec<usize> = Vec::with_capacity(m);
        while targets.len() < m {
            let mut pick = rng.gen_range(0..total_degree);
            for (candidate, &degree) in degrees.iter().enumerate().take(new_node) {
                if pick < degree {
                    if !targets.contains(&candidate) {
                        targets.push(candidate);
                    }
                    break;
                }
                pick -= degree;
            }
        }
        targets.sort_unstable();
        for target in targets {
            pairs.push((target, new_node));
            degrees[target] += 1;
            degrees[new_node] += 1;
            total_degree += 2;
        }
    }
    pairs
}

fn sample_geometric(rng: &mut StdRng, p: f64) -> u64 {
    let u = rng.gen_range(f64::MIN_POSITIVE..1.0);
    (u.ln() / (1.0 - p).ln()).floor().max(0.0) as u64
}

fn pair_from_index(idx: u64, nodes: u64) -> (usize, usize) {
    let mut left = 0u64;
    let mut start = 0u64;
    while left < nodes - 1 {
        let remaining = nodes - left - 1;
        if idx < start + remaining {
            return (left as usize, (left + 1 + (idx - start)) as usize);
        }
        start += remaining;
        left += 1;
    }
    ((nodes - 2) as usize, (nodes - 1) as usize)
}
