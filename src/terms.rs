//! Term extraction collaborators. Extraction is pluggable through
//! [`TermExtractor`]; the bundled [`StopwordExtractor`] only case-folds, drops
//! stop words and leading articles, reduces plurals, and emits adjacent-word
//! bigrams so multi-word concepts ("ice cream") can match. Callers needing full
//! lemmatisation supply their own extractor.

use std::{borrow::Cow, collections::BTreeSet};

use ahash::AHashSet;

/// Free text in, normalized terms out. No duplicates; iteration order is not
/// part of the contract.
pub trait TermExtractor {
    fn extract(&self, text: &str) -> BTreeSet<String>;
}

const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
    "doing", "for", "from", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "may", "me", "might",
    "more", "most", "my", "no", "nor", "not", "of", "on", "once", "only", "or", "other", "our",
    "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your",
];

const ARTICLES: &[&str] = &["the ", "a ", "an "];

/// Irregular plurals the suffix rules cannot reach.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Explicitly constructed normalization state shared by extractors and graph
/// import. Input terms and node names must go through the same context or they
/// will not match.
#[derive(Clone, Debug)]
pub struct NormalizationContext {
    stopwords: AHashSet<String>,
    lemmatize: bool,
}

impl Default for NormalizationContext {
    fn default() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl NormalizationContext {
    pub fn with_stopwords<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            stopwords: words.into_iter().map(str::to_lowercase).collect(),
            lemmatize: true,
        }
    }

    /// Turns plural reduction on or off (on by default).
    pub fn with_lemmatization(mut self, enabled: bool) -> Self {
        self.lemmatize = enabled;
        self
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    /// Case-folds, trims, strips one leading article and lemmatizes the head
    /// word.
    pub fn normalize(&self, raw: &str) -> String {
        let folded = raw.trim().to_lowercase();
        let stripped = ARTICLES
            .iter()
            .find_map(|article| folded.strip_prefix(article))
            .map(str::trim_start)
            .unwrap_or(&folded);
        self.lemmatize(stripped)
    }

    /// Reduces the last word of an already case-folded term to its singular
    /// form. Multi-word terms keep their modifiers ("ice creams" -> "ice cream").
    pub fn lemmatize(&self, term: &str) -> String {
        if !self.lemmatize {
            return term.to_string();
        }
        match term.rsplit_once(' ') {
            Some((head, last)) => format!("{head} {}", singular_noun(last)),
            None => singular_noun(term).to_string(),
        }
    }

    /// Normalizes a concept URI such as `/c/en/ice_cream/n` to `ice cream`,
    /// lemmatized like input terms.
    pub fn normalize_concept_uri(&self, uri: &str) -> String {
        self.lemmatize(&normalize_concept_uri(uri))
    }
}

/// Rule-based noun singularisation following WordNet's noun detachment rules,
/// minus the dictionary check. Words of three letters or fewer are left alone.
fn singular_noun(word: &str) -> Cow<'_, str> {
    if let Some((_, lemma)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| *plural == word) {
        return Cow::Borrowed(*lemma);
    }
    if let Some(stem) = word.strip_suffix("'s") {
        return Cow::Borrowed(stem);
    }
    if word.len() <= 3 {
        return Cow::Borrowed(word);
    }
    if let Some(stem) = word.strip_suffix("ies").filter(|stem| stem.len() > 1) {
        return Cow::Owned(format!("{stem}y"));
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return Cow::Borrowed(&word[..word.len() - 2]);
        }
    }
    if ["ss", "us", "is"].iter().any(|end| word.ends_with(end)) {
        return Cow::Borrowed(word);
    }
    match word.strip_suffix('s') {
        Some(stem) => Cow::Borrowed(stem),
        None => Cow::Borrowed(word),
    }
}

#[derive(Clone, Debug, Default)]
pub struct StopwordExtractor {
    context: NormalizationContext,
}

impl StopwordExtractor {
    pub fn new(context: NormalizationContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &NormalizationContext {
        &self.context
    }
}

impl TermExtractor for StopwordExtractor {
    fn extract(&self, text: &str) -> BTreeSet<String> {
        // Stop words are matched on the surface form, before lemmatization.
        let tokens: Vec<Option<String>> = text
            .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
            .filter(|token| !token.is_empty())
            .map(|token| {
                let folded = token.to_lowercase();
                if self.context.is_stopword(&folded) {
                    None
                } else {
                    Some(self.context.lemmatize(&folded))
                }
            })
            .collect();
        let mut terms: BTreeSet<String> = tokens.iter().flatten().cloned().collect();
        for pair in tokens.windows(2) {
            if let [Some(first), Some(second)] = pair {
                terms.insert(format!("{first} {second}"));
            }
        }
        terms
    }
}

/// Strips the `/c/en/` prefix and part-of-speech suffix of a concept URI and
/// case-folds it. No lemmatization; see
/// [`NormalizationContext::normalize_concept_uri`].
pub fn normalize_concept_uri(uri: &str) -> String {
    let rest = uri.strip_prefix("/c/en/").unwrap_or(uri);
    let head = rest.split('/').next().unwrap_or_default();
    head.replace('_', " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_article() {
        let ctx = NormalizationContext::default();
        assert_eq!(ctx.normalize("The Kitchen"), "kitchen");
        assert_eq!(ctx.normalize("another"), "another");
        assert_eq!(ctx.normalize("The Bones"), "bone");
    }

    #[test]
    fn test_singular_noun_rules() {
        assert_eq!(singular_noun("bones"), "bone");
        assert_eq!(singular_noun("berries"), "berry");
        assert_eq!(singular_noun("boxes"), "box");
        assert_eq!(singular_noun("glasses"), "glass");
        assert_eq!(singular_noun("houses"), "house");
        assert_eq!(singular_noun("children"), "child");
        assert_eq!(singular_noun("bus"), "bus");
        assert_eq!(singular_noun("gas"), "gas");
        assert_eq!(singular_noun("dog's"), "dog");
    }

    #[test]
    fn test_lemmatization_can_be_disabled() {
        let ctx = NormalizationContext::default().with_lemmatization(false);
        assert_eq!(ctx.normalize("Bones"), "bones");
        assert_eq!(ctx.lemmatize("ice creams"), "ice creams");
        assert_eq!(NormalizationContext::default().lemmatize("ice creams"), "ice cream");
    }

    #[test]
    fn test_concept_uri_normalization() {
        assert_eq!(normalize_concept_uri("/c/en/ice_cream/n"), "ice cream");
        assert_eq!(normalize_concept_uri("/c/en/Dog"), "dog");
        assert_eq!(normalize_concept_uri("plain"), "plain");
        let ctx = NormalizationContext::default();
        assert_eq!(ctx.normalize_concept_uri("/c/en/bones/n"), "bone");
    }
}
