//! Builds a [`ConceptGraph`] from ConceptNet assertion rows:
//!
//! ```text
//! /a/[...]<TAB>/r/IsA<TAB>/c/en/dog/n<TAB>/c/en/animal<TAB>{"weight": 2.0}
//! ```
//!
//! Only rows with English concepts at both ends are kept. Node names are
//! normalized through the same [`NormalizationContext`] the term extractor uses,
//! and each descriptor records its zero-based line number as `row`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    errors::ConceptPathError,
    graph::{ConceptGraph, EdgeDescriptor, GraphBuilder},
    terms::NormalizationContext,
};

const ENGLISH_PREFIX: &str = "/c/en/";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub rows: usize,
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Deserialize)]
struct AssertionInfo {
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

pub fn import_assertions_from_path<P: AsRef<Path>>(
    path: P,
    context: &NormalizationContext,
) -> Result<(ConceptGraph, ImportStats), ConceptPathError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ConceptPathError::load(format!("{}: {e}", path.display())))?;
    import_assertions(BufReader::new(file), context)
}

pub fn import_assertions<R: BufRead>(
    reader: R,
    context: &NormalizationContext,
) -> Result<(ConceptGraph, ImportStats), ConceptPathError> {
    let mut builder = GraphBuilder::new();
    let mut stats = ImportStats::default();
    for (row, line) in reader.lines().enumerate() {
        let at_line = |msg: String| ConceptPathError::load(format!("line {}: {msg}", row + 1));
        let line = line.map_err(|e| at_line(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        stats.rows += 1;
        let columns: Vec<&str> = line.split('\t').collect();
        let [_, relation, start, end, rest @ ..] = columns.as_slice() else {
            return Err(at_line("expected at least 4 tab-separated columns".into()));
        };
        if !start.starts_with(ENGLISH_PREFIX) || !end.starts_with(ENGLISH_PREFIX) {
            stats.skipped += 1;
            continue;
        }
        let from = context.normalize_concept_uri(start);
        let to = context.normalize_concept_uri(end);
        if from.is_empty() || to.is_empty() || from == to {
            debug!(row, start = *start, end = *end, "skipping degenerate assertion");
            stats.skipped += 1;
            continue;
        }
        let weight = match rest.first() {
            Some(info) => {
                serde_json::from_str::<AssertionInfo>(info)
                    .map_err(|e| at_line(e.to_string()))?
                    .weight
            }
            None => default_weight(),
        };
        let from = builder.add_node(&from)?;
        let to = builder.add_node(&to)?;
        let label = builder.add_label(relation)?;
        builder
            .add_descriptor(from, to, EdgeDescriptor { label, weight, row })
            .map_err(|e| at_line(e.to_string()))?;
        stats.imported += 1;
    }
    info!(
        rows = stats.rows,
        imported = stats.imported,
        skipped = stats.skipped,
        "assertions imported"
    );
    Ok((builder.build(), stats))
}
