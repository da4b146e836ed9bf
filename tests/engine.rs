use proptest::prelude::*;

use recipe_recommender::{best_match, similarity, Error, RecommendEngine, TFIDFVectorizer, ZeroSpVec};

fn scenario() -> RecommendEngine<u32> {
    RecommendEngine::fit(vec![(0, "tomato onion garlic"), (1, "rice beans")]).unwrap()
}

#[test]
fn onion_garlic_recommends_first_recipe() {
    let hit = scenario().query("onion garlic").unwrap();
    assert_eq!(hit.id, 0);
    assert!(!hit.is_zero_similarity());
}

#[test]
fn unknown_query_falls_back_to_lowest_index() {
    let engine = scenario();
    let query = engine.vectorizer().transform("xyz123");
    assert!(query.is_zero());
    let hit = engine.query("xyz123").unwrap();
    assert_eq!(hit.id, 0);
    assert_eq!(hit.score, 0.0);
    assert!(hit.is_zero_similarity());
}

#[test]
fn duplicate_rows_tie_to_lower_index() {
    let engine: RecommendEngine<&str> = RecommendEngine::fit(vec![
        ("pasta", "pasta basil parmesan"),
        ("curry", "chickpeas coconut milk curry"),
        ("curry again", "chickpeas coconut milk curry"),
    ])
    .unwrap();
    let hit = engine.query("chickpeas coconut milk curry").unwrap();
    assert_eq!(hit.id, "curry");
    assert_eq!(hit.row, 1);
}

#[test]
fn empty_inputs() {
    let none: Vec<(u32, &str)> = Vec::new();
    assert!(matches!(RecommendEngine::<u32>::fit(none), Err(Error::EmptyCorpus)));

    let v: ZeroSpVec<f64> = ZeroSpVec::zeros(3);
    assert!(matches!(best_match(&v, &[]), Err(Error::EmptyCorpus)));

    let engine = scenario();
    let empty = engine.vectorizer().transform("");
    assert!(empty.is_zero());
    assert_eq!(empty.len(), engine.vectorizer().vocab_size());
}

#[test]
fn vocabulary_is_reproducible() {
    let docs = ["tomato onion garlic", "rice beans"];
    let v: TFIDFVectorizer = TFIDFVectorizer::fit(&docs).unwrap();
    let vocab: Vec<&str> = v.vocabulary().collect();
    assert_eq!(vocab, ["beans", "garlic", "onion", "rice", "tomato"]);
    // every term sits in exactly one of two documents
    let idf = (3.0_f64 / 2.0).ln() + 1.0;
    for w in v.idf() {
        assert!((*w - idf).abs() < 1e-12);
    }
}

#[test]
fn snapshot_roundtrip_through_writer_and_file() {
    let engine = scenario();
    let mut buf = Vec::new();
    engine.to_writer(&mut buf, 7).unwrap();
    let (loaded, fingerprint) = RecommendEngine::<u32>::from_reader(buf.as_slice()).unwrap();
    assert_eq!(fingerprint, 7);
    assert_eq!(loaded.vectorizer().idf(), engine.vectorizer().idf());
    for q in ["onion garlic", "beans", "xyz123", ""] {
        assert_eq!(loaded.query(q).unwrap(), engine.query(q).unwrap());
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.cbor");
    engine.save(&path, 8).unwrap();
    let (from_file, fingerprint) = RecommendEngine::<u32>::load(&path).unwrap();
    assert_eq!(fingerprint, 8);
    assert_eq!(from_file.matrix(), engine.matrix());
    assert_eq!(from_file.ids(), engine.ids());
}

const WORDS: [&str; 12] = [
    "salt", "pepper", "onion", "garlic", "rice", "beans", "tomato", "basil", "egg", "flour",
    "milk", "butter",
];

fn doc_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..8).prop_map(|w| w.join(", "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(doc_strategy(), 1..12)
        .prop_filter("needs at least one term", |docs| docs.iter().any(|d| !d.is_empty()))
}

proptest! {
    #[test]
    fn vectors_are_unit_or_zero(corpus in corpus_strategy(), query in doc_strategy()) {
        let v: TFIDFVectorizer = TFIDFVectorizer::fit(&corpus).unwrap();
        for doc in corpus.iter().chain(std::iter::once(&query)) {
            let vec = v.transform(doc);
            let shares_vocab = doc
                .split(", ")
                .any(|t| !t.is_empty() && v.contains_term(t));
            if shares_vocab {
                prop_assert!((vec.norm() - 1.0).abs() < 1e-9);
            } else {
                prop_assert!(vec.is_zero());
            }
        }
    }

    #[test]
    fn similarity_stays_in_unit_interval(corpus in corpus_strategy(), query in doc_strategy()) {
        let (v, matrix) = TFIDFVectorizer::<f64>::fit_transform(&corpus).unwrap();
        let q = v.transform(&query);
        for row in &matrix {
            let s = similarity(&q, row);
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn fit_and_query_are_deterministic(corpus in corpus_strategy(), query in doc_strategy()) {
        let records = || corpus.iter().enumerate().map(|(i, d)| (i, d.as_str()));
        let a: RecommendEngine<usize> = RecommendEngine::fit(records()).unwrap();
        let b: RecommendEngine<usize> = RecommendEngine::fit(records()).unwrap();
        prop_assert_eq!(a.query(&query).unwrap(), b.query(&query).unwrap());
        prop_assert_eq!(a.query(&query).unwrap(), a.query(&query).unwrap());
    }

    #[test]
    fn best_match_scores_at_least_every_row(corpus in corpus_strategy(), query in doc_strategy()) {
        let (v, matrix) = TFIDFVectorizer::<f64>::fit_transform(&corpus).unwrap();
        let q = v.transform(&query);
        let hit = best_match(&q, &matrix).unwrap();
        for (row, vec) in matrix.iter().enumerate() {
            let s = similarity(&q, vec);
            prop_assert!(s <= hit.score);
            if row < hit.row {
                prop_assert!(s < hit.score);
            }
        }
    }
}
