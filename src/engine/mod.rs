pub mod snapshot;

use num::Float;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::vectorizer::{
    evaluate::scoring::{best_match, HitEntry},
    tfidf::DefaultTFIDFEngine,
    token::TermFrequency,
    TFIDFVectorizer, TermVector,
};

/// Result of [`RecommendEngine::query`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match<K> {
    /// caller id of the winning record
    pub id: K,
    /// row of the winning record in fit order
    pub row: usize,
    /// cosine similarity in [0, 1]
    pub score: f64,
}

impl<K> Match<K> {
    /// The query shared no vocabulary with the winner. Still a valid
    /// answer; callers usually show it as "no close match".
    #[inline]
    pub fn is_zero_similarity(&self) -> bool {
        self.score <= 0.0
    }
}

/// Fitted recommendation engine.
///
/// Owns the vectorizer, the corpus matrix (row `i` is the term vector of
/// the `i`-th fit record) and the caller ids in the same order. Everything
/// is immutable after [`fit`](RecommendEngine::fit); share it with `&` or
/// `Arc` and call [`query`](RecommendEngine::query) from any thread.
#[derive(Debug, Clone)]
pub struct RecommendEngine<K, N = f64>
where
    N: Float,
{
    vectorizer: TFIDFVectorizer<N, DefaultTFIDFEngine>,
    matrix: Vec<TermVector<N>>,
    ids: Vec<K>,
}

impl<K, N> RecommendEngine<K, N>
where
    N: Float + Send + Sync + Into<f64>,
{
    /// Fit on `(id, ingredient text)` records.
    ///
    /// # Errors
    /// * `EmptyCorpus` if there are no records
    /// * `EmptyVocabulary` if no record has a usable term
    pub fn fit<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        S: AsRef<str> + Sync,
    {
        let (ids, texts): (Vec<K>, Vec<S>) = records.into_iter().unzip();
        let (vectorizer, matrix) = TFIDFVectorizer::fit_transform(&texts)?;
        tracing::info!(
            documents = matrix.len(),
            vocabulary = vectorizer.vocab_size(),
            "recommendation engine ready"
        );
        Ok(RecommendEngine {
            vectorizer,
            matrix,
            ids,
        })
    }

    /// Best matching record for `text`.
    ///
    /// Never fails on a fitted engine: an empty or entirely unknown query
    /// still returns row 0 with a score of 0.0.
    pub fn query(&self, text: &str) -> Result<Match<K>>
    where
        K: Clone,
    {
        let freq = TermFrequency::from_text(text);
        let query = self.vectorizer.transform_freq(&freq);
        if query.is_zero() && !freq.is_empty() {
            tracing::warn!(
                terms = freq.unique_term_num(),
                "query shares no term with the recipe vocabulary"
            );
        }
        let hit = self.best_hit(&query)?;
        tracing::debug!(terms = freq.term_sum(), row = hit.row, score = hit.score, "query matched");
        self.to_match(hit)
    }

    /// Best matching record for an already transformed query
    pub fn query_vector(&self, query: &TermVector<N>) -> Result<Match<K>>
    where
        K: Clone,
    {
        let hit = self.best_hit(query)?;
        self.to_match(hit)
    }

    #[inline]
    fn best_hit(&self, query: &TermVector<N>) -> Result<HitEntry> {
        best_match(query, &self.matrix)
    }

    fn to_match(&self, hit: HitEntry) -> Result<Match<K>>
    where
        K: Clone,
    {
        let id = self.ids.get(hit.row).cloned().ok_or(Error::EmptyCorpus)?;
        Ok(Match {
            id,
            row: hit.row,
            score: hit.score,
        })
    }
}

impl<K, N> RecommendEngine<K, N>
where
    N: Float,
{
    /// Number of fit records
    #[inline]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    #[inline]
    pub fn vectorizer(&self) -> &TFIDFVectorizer<N, DefaultTFIDFEngine> {
        &self.vectorizer
    }

    /// Corpus matrix in fit order
    #[inline]
    pub fn matrix(&self) -> &[TermVector<N>] {
        &self.matrix
    }

    /// Caller ids in fit order
    #[inline]
    pub fn ids(&self) -> &[K] {
        &self.ids
    }
}
