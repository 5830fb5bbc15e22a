//! Multiple-choice question examples. A file holds blocks separated by `#`:
//!
//! ```text
//! # Question: Where would you keep ice cream?
//! Context: It is a hot day.
//! (A) freezer
//! (B) oven
//! ```
//!
//! `Context:` is optional; every line starting with `(` is an answer choice.

use std::{collections::BTreeSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{errors::ConceptPathError, terms::TermExtractor};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionExample {
    pub question: String,
    /// Empty when the block has no context line.
    pub context: String,
    pub choices: Vec<String>,
}

impl QuestionExample {
    /// Premise terms come from question and context, choice terms from the
    /// union over all answer choices.
    pub fn terms<E>(&self, extractor: &E) -> (BTreeSet<String>, BTreeSet<String>)
    where
        E: TermExtractor + ?Sized,
    {
        let mut premise = extractor.extract(&self.question);
        premise.extend(extractor.extract(&self.context));
        let choices = self
            .choices
            .iter()
            .flat_map(|choice| extractor.extract(choice))
            .collect();
        (premise, choices)
    }
}

pub fn parse_examples(text: &str) -> Vec<QuestionExample> {
    text.split('#')
        .skip(1)
        .filter(|block| !block.trim().is_empty())
        .map(parse_block)
        .collect()
}

pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionExample>, ConceptPathError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| ConceptPathError::load(format!("{}: {e}", path.display())))?;
    Ok(parse_examples(&text))
}

fn parse_block(block: &str) -> QuestionExample {
    let mut example = QuestionExample::default();
    for line in block.lines().map(str::trim) {
        if let Some(question) = line.strip_prefix("Question:") {
            if example.question.is_empty() {
                example.question = question.trim().to_string();
            }
        } else if let Some(context) = line.strip_prefix("Context:") {
            if example.context.is_empty() {
                example.context = context.trim().to_string();
            }
        } else if line.starts_with('(') {
            if let Some((_, choice)) = line.split_once(')') {
                example.choices.push(choice.trim().to_string());
            }
        }
    }
    example
}
