use serde::{Deserialize, Serialize};

use crate::{
    errors::ConceptPathError,
    graph::{GraphIndex, NodeIdx},
    resolver::{ResolvedStep, resolve_path},
};

pub const NO_PATH: &str = "no path";

/// Human-readable form of a path plus one weight per traversed edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderedPath {
    pub text: String,
    pub weights: Vec<f64>,
}

impl RenderedPath {
    pub fn no_path() -> Self {
        Self {
            text: NO_PATH.to_string(),
            weights: Vec::new(),
        }
    }
}

/// Turns a node path into prose. An empty path must render as a "no path"
/// value with no weights.
pub trait PathRenderer {
    fn render(
        &self,
        graph: &dyn GraphIndex,
        path: &[NodeIdx],
    ) -> Result<RenderedPath, ConceptPathError>;
}

/// Renders each step as `subject relation object`, using the strongest
/// descriptor of the step and the direction it was recorded in.
#[derive(Clone, Debug)]
pub struct TripleRenderer {
    pub separator: String,
}

impl Default for TripleRenderer {
    fn default() -> Self {
        Self {
            separator: ", ".to_string(),
        }
    }
}

impl PathRenderer for TripleRenderer {
    fn render(
        &self,
        graph: &dyn GraphIndex,
        path: &[NodeIdx],
    ) -> Result<RenderedPath, ConceptPathError> {
        match path {
            [] => Ok(RenderedPath::no_path()),
            [only] => Ok(RenderedPath {
                text: node_label(graph, *only)?.to_string(),
                weights: Vec::new(),
            }),
            _ => {
                let steps = resolve_path(graph, path)?;
                let mut clauses = Vec::with_capacity(steps.len());
                let mut weights = Vec::with_capacity(steps.len());
                for step in &steps {
                    let (clause, weight) = render_step(graph, step)?;
                    clauses.push(clause);
                    weights.push(weight);
                }
                Ok(RenderedPath {
                    text: clauses.join(&self.separator),
                    weights,
                })
            }
        }
    }
}

fn render_step(
    graph: &dyn GraphIndex,
    step: &ResolvedStep<'_>,
) -> Result<(String, f64), ConceptPathError> {
    let descriptor = step
        .edge
        .strongest()
        .ok_or_else(|| ConceptPathError::consistency(step.from, step.to))?;
    let relation = graph
        .label_name(descriptor.label)
        .map(humanize_label)
        .ok_or_else(|| ConceptPathError::not_found(format!("label {}", descriptor.label)))?;
    let (subject, object) = if step.edge.reversed {
        (step.to, step.from)
    } else {
        (step.from, step.to)
    };
    let clause = format!(
        "{} {} {}",
        node_label(graph, subject)?,
        relation,
        node_label(graph, object)?
    );
    Ok((clause, descriptor.weight))
}

fn node_label(graph: &dyn GraphIndex, node: NodeIdx) -> Result<&str, ConceptPathError> {
    graph
        .node_name(node)
        .ok_or_else(|| ConceptPathError::not_found(format!("node {node}")))
}

/// `/r/AtLocation` -> `at location`, `is_a` -> `is a`.
pub fn humanize_label(label: &str) -> String {
    let raw = label.strip_prefix("/r/").unwrap_or(label);
    let mut out = String::with_capacity(raw.len() + 4);
    for (idx, ch) in raw.chars().enumerate() {
        if ch == '_' || ch == '-' {
            out.push(' ');
        } else if ch.is_uppercase() {
            if idx > 0 && !out.ends_with(' ') {
                out.push(' ');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
