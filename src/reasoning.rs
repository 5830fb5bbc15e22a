//! Term-pair orchestration: every premise term is paired with every choice term,
//! each resolvable pair is searched, rendered and finally ranked.
//!
//! Cost is one path search per resolvable pair, i.e. up to
//! `|premise terms| x |choice terms|` searches per query. Callers with large term
//! sets should keep [`SearchLimits`] tight or bound the visit count.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    bfs::{self, SearchLimits},
    cache::{CacheStats, PathCache},
    errors::ConceptPathError,
    graph::{GraphIndex, NodeIdx},
    questions::QuestionExample,
    ranking::{WeightedPath, select_paths},
    render::PathRenderer,
    terms::TermExtractor,
};

pub const DEFAULT_MAX_PATHS: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReasoningConfig {
    pub limits: SearchLimits,
    /// Cap on the ranked output of one query.
    pub max_paths: usize,
    /// Fan term pairs out over the rayon pool.
    pub parallel: bool,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            limits: SearchLimits::default(),
            max_paths: DEFAULT_MAX_PATHS,
            parallel: true,
        }
    }
}

impl ReasoningConfig {
    pub fn validate(&self) -> Result<(), ConceptPathError> {
        self.limits.validate()?;
        if self.max_paths == 0 {
            return Err(ConceptPathError::invalid_input(
                "max_paths must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathCandidate {
    pub premise_term: String,
    pub choice_term: String,
    pub nodes: Vec<NodeIdx>,
    pub text: String,
    pub weights: Vec<f64>,
}

impl WeightedPath for PathCandidate {
    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReasoningStats {
    pub pairs_total: usize,
    pub pairs_skipped: usize,
    pub searches: usize,
    pub paths_found: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KnowledgeReport {
    pub paths: Vec<PathCandidate>,
    pub stats: ReasoningStats,
}

pub struct PathReasoner<'a, G, R> {
    graph: &'a G,
    renderer: R,
    config: ReasoningConfig,
    cache: Option<PathCache>,
}

struct TermPair<'t> {
    premise: &'t str,
    choice: &'t str,
    start: NodeIdx,
    end: NodeIdx,
}

impl<'a, G, R> PathReasoner<'a, G, R>
where
    G: GraphIndex + Sync,
    R: PathRenderer + Sync,
{
    /// Rejects invalid configuration before any search can run.
    pub fn new(graph: &'a G, renderer: R, config: ReasoningConfig) -> Result<Self, ConceptPathError> {
        config.validate()?;
        Ok(Self {
            graph,
            renderer,
            config,
            cache: None,
        })
    }

    /// Memoizes search results across queries. The cache lives inside the
    /// reasoner so it can never serve paths of another graph.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(PathCache::new());
        self
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(PathCache::stats)
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Extracts terms from both texts and connects them.
    pub fn explain<E>(
        &self,
        extractor: &E,
        premise: &str,
        choice: &str,
    ) -> Result<KnowledgeReport, ConceptPathError>
    where
        E: TermExtractor + ?Sized,
    {
        let premise_terms = extractor.extract(premise);
        let choice_terms = extractor.extract(choice);
        self.connect_terms(&premise_terms, &choice_terms)
    }

    /// Connects the terms of question and context with the terms of all answer
    /// choices of one example.
    pub fn explain_example<E>(
        &self,
        extractor: &E,
        example: &QuestionExample,
    ) -> Result<KnowledgeReport, ConceptPathError>
    where
        E: TermExtractor + ?Sized,
    {
        let (premise_terms, choice_terms) = example.terms(extractor);
        self.connect_terms(&premise_terms, &choice_terms)
    }

    /// Searches every (premise, choice) term pair and returns the top
    /// `max_paths` paths. Out-of-vocabulary terms are skipped silently; pairs
    /// without a path within the bound, or naming the same node, contribute
    /// nothing.
    pub fn connect_terms<P, C>(
        &self,
        premise_terms: P,
        choice_terms: C,
    ) -> Result<KnowledgeReport, ConceptPathError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let premise_terms = collect_terms(premise_terms);
        let choice_terms = collect_terms(choice_terms);
        let mut stats = ReasoningStats {
            pairs_total: premise_terms.len() * choice_terms.len(),
            ..ReasoningStats::default()
        };

        let mut pairs = Vec::new();
        for premise in &premise_terms {
            for choice in &choice_terms {
                match (self.graph.node_index(premise), self.graph.node_index(choice)) {
                    (Some(start), Some(end)) => pairs.push(TermPair {
                        premise,
                        choice,
                        start,
                        end,
                    }),
                    _ => {
                        debug!(premise = %premise, choice = %choice, "skipping out-of-vocabulary pair");
                        stats.pairs_skipped += 1;
                    }
                }
            }
        }
        stats.searches = pairs.len();

        let results: Vec<Option<PathCandidate>> = if self.config.parallel {
            pairs
                .par_iter()
                .map(|pair| self.connect_pair(pair))
                .collect::<Result<_, _>>()?
        } else {
            pairs
                .iter()
                .map(|pair| self.connect_pair(pair))
                .collect::<Result<_, _>>()?
        };
        let candidates: Vec<PathCandidate> = results.into_iter().flatten().collect();
        stats.paths_found = candidates.len();

        let paths = select_paths(candidates, self.config.max_paths)?;
        info!(
            pairs = stats.pairs_total,
            skipped = stats.pairs_skipped,
            found = stats.paths_found,
            kept = paths.len(),
            "term pairs connected"
        );
        Ok(KnowledgeReport { paths, stats })
    }

    fn connect_pair(&self, pair: &TermPair<'_>) -> Result<Option<PathCandidate>, ConceptPathError> {
        let nodes = self.find_path(pair.start, pair.end)?;
        if nodes.is_empty() {
            return Ok(None);
        }
        let rendered = self.renderer.render(self.graph, &nodes)?;
        // A pair naming the same node renders without any edge.
        if rendered.weights.is_empty() {
            debug!(premise = pair.premise, choice = pair.choice, "dropping weightless path");
            return Ok(None);
        }
        Ok(Some(PathCandidate {
            premise_term: pair.premise.to_string(),
            choice_term: pair.choice.to_string(),
            nodes,
            text: rendered.text,
            weights: rendered.weights,
        }))
    }

    fn find_path(&self, start: NodeIdx, end: NodeIdx) -> Result<Vec<NodeIdx>, ConceptPathError> {
        let limits = &self.config.limits;
        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(start, end, limits)) {
            return Ok(hit);
        }
        let path = bfs::search(self.graph, start, end, limits)?;
        if let Some(cache) = &self.cache {
            cache.insert(start, end, limits, path.clone());
        }
        Ok(path)
    }
}

fn collect_terms<I>(terms: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| term.as_ref().to_string())
        .filter(|term| !term.is_empty())
        .collect()
}
