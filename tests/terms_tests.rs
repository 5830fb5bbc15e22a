use conceptpath::{NormalizationContext, StopwordExtractor, TermExtractor};

#[test]
fn test_extract_filters_stopwords_and_punctuation() {
    let extractor = StopwordExtractor::default();
    let terms = extractor.extract("Where would you keep ice cream?");
    let terms: Vec<_> = terms.iter().map(String::as_str).collect();
    assert_eq!(terms, vec!["cream", "ice", "ice cream", "keep", "keep ice"]);
}

#[test]
fn test_extract_case_folds_and_dedups() {
    let extractor = StopwordExtractor::default();
    let terms = extractor.extract("Dog dog DOG");
    assert!(terms.contains("dog"));
    assert!(terms.contains("dog dog"));
    assert_eq!(terms.len(), 2);
}

#[test]
fn test_custom_stopwords_are_respected() {
    let context = NormalizationContext::with_stopwords(["Keep", "cream"]);
    let extractor = StopwordExtractor::new(context);
    let terms = extractor.extract("keep ice cream");
    let terms: Vec<_> = terms.iter().map(String::as_str).collect();
    assert_eq!(terms, vec!["ice"]);
    assert!(extractor.context().is_stopword("keep"));
}

#[test]
fn test_empty_text_yields_no_terms() {
    let extractor = StopwordExtractor::default();
    assert!(extractor.extract("  ?!. ").is_empty());
}

#[test]
fn test_plurals_match_singular_concepts() {
    let extractor = StopwordExtractor::default();
    let terms = extractor.extract("Dogs chew bones and boxes");
    let terms: Vec<_> = terms.iter().map(String::as_str).collect();
    assert_eq!(
        terms,
        vec!["bone", "box", "chew", "chew bone", "dog", "dog chew"]
    );
    // Stop words are checked before plural reduction.
    assert!(extractor.extract("does this").is_empty());
}

#[test]
fn test_uri_and_input_normalization_agree() {
    let context = NormalizationContext::default();
    let extractor = StopwordExtractor::new(context.clone());
    let node = context.normalize_concept_uri("/c/en/ice_cream/n");
    assert!(extractor.extract("two ice creams").contains(&node));
}
