use thiserror::Error;

use crate::graph::NodeIdx;

#[derive(Debug, Error)]
pub enum ConceptPathError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// An adjacency edge with no descriptor in either direction. The graph index
    /// itself is malformed; this never means "no path".
    #[error("internal graph consistency error: no edge descriptor between {from} and {to}")]
    GraphConsistency { from: NodeIdx, to: NodeIdx },
    #[error("load error: {0}")]
    Load(String),
    #[error("logger error: {0}")]
    Logger(String),
}

impl ConceptPathError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ConceptPathError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ConceptPathError::NotFound(msg.into())
    }

    pub fn consistency(from: NodeIdx, to: NodeIdx) -> Self {
        ConceptPathError::GraphConsistency { from, to }
    }

    pub fn load<T: Into<String>>(msg: T) -> Self {
        ConceptPathError::Load(msg.into())
    }

    pub fn logger<T: Into<String>>(msg: T) -> Self {
        ConceptPathError::Logger(msg.into())
    }

    pub fn is_consistency_violation(&self) -> bool {
        matches!(self, ConceptPathError::GraphConsistency { .. })
    }
}
