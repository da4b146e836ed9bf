//! This crate recommends recipes by matching an ingredient query against
//! a recipe corpus with a TF-IDF vectorizer.

pub mod config;
pub mod engine;
pub mod error;
pub mod recipes;
pub mod utils;
pub mod vectorizer;

/// Recommendation Engine
/// The top-level handle of this crate.
/// It is fitted once on `(id, ingredient text)` records and then answers
/// queries with the id of the most similar record.
///
/// Internally, it holds:
/// - The fitted `TFIDFVectorizer` (vocabulary, document frequencies, IDF)
/// - The corpus matrix, one unit-length term vector per record
/// - The caller ids, in fit order
///
/// `RecommendEngine<K, N>` has the following generic parameters:
/// - `K`: Record id type (e.g., usize, String)
/// - `N`: Weight type (f64 or f32)
///
/// # Thread Safety
/// Nothing is mutated after `fit`, so the engine can be shared behind an
/// `Arc` and queried from many threads without locking.
///
/// # Serialization
/// Supported through `to_writer` / `from_reader` (CBOR).
pub use engine::{Match, RecommendEngine};

/// TF-IDF Vectorizer
/// Builds the vocabulary from a corpus and turns any text into a sparse,
/// L2-normalized TF-IDF vector.
///
/// - Terms are lower-cased and split on non-alphanumeric characters.
/// - Vocabulary columns follow lexicographic term order.
/// - IDF is smoothed: `ln((1 + N) / (1 + df)) + 1`.
/// - Terms unknown to the vocabulary are dropped.
pub use vectorizer::TFIDFVectorizer;

/// Term vector type produced by the vectorizer
pub use vectorizer::TermVector;

/// Corpus statistics
/// Vocabulary and per-term document frequency of the fit corpus.
/// Immutable once built.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// Occurrence counts of the terms of one document.
pub use vectorizer::token::TermFrequency;

/// TF IDF Calculation Engine Trait
/// Pluggable weighting strategy; `DefaultTFIDFEngine` implements the
/// raw-count TF with smoothed IDF.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Matching
/// - `best_match`: exhaustive cosine scan, ties go to the lowest row
/// - `similarity`: cosine of two normalized term vectors
pub use vectorizer::evaluate::scoring::{best_match, similarity, HitEntry};

/// Errors and the crate-wide `Result` alias
pub use error::{Error, Result};

/// Sparse vector used for every term vector
pub use utils::math::vector::ZeroSpVec;
