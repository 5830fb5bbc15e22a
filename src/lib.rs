//! Bounded shortest-path search and ranking over a static concept graph.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod bfs;
pub mod cache;
pub mod client;
pub mod errors;
pub mod graph;
pub mod import;
pub mod logger;
pub mod questions;
pub mod ranking;
pub mod reasoning;
pub mod render;
pub mod resolver;
pub mod safety;
pub mod terms;

pub use crate::bfs::{SearchLimits, search};
pub use crate::cache::{CacheStats, PathCache};
pub use crate::errors::ConceptPathError;
pub use crate::graph::{
    ConceptGraph, EdgeDescriptor, GraphBuilder, GraphIndex, GraphSnapshot, LabelIdx, NodeIdx,
};
pub use crate::import::{ImportStats, import_assertions};
pub use crate::questions::{QuestionExample, load_examples, parse_examples};
pub use crate::ranking::{WeightedPath, compare_paths, select_paths};
pub use crate::reasoning::{
    KnowledgeReport, PathCandidate, PathReasoner, ReasoningConfig, ReasoningStats,
};
pub use crate::render::{PathRenderer, RenderedPath, TripleRenderer};
pub use crate::resolver::{ResolvedEdge, ResolvedStep, resolve_edge, resolve_path};
pub use crate::terms::{NormalizationContext, StopwordExtractor, TermExtractor};
