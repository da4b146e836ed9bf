pub mod corpus;
pub mod evaluate;
pub mod serde;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use num::Float;
use rayon::prelude::*;

use crate::error::Result;
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{
    corpus::Corpus,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    token::TermFrequency,
};

/// Term vector of one document: sparse, non-negative, unit length or all-zero
pub type TermVector<N = f64> = ZeroSpVec<N>;

/// Fitted TF-IDF vectorizer.
///
/// Holds the vocabulary with its document frequencies (`Corpus`) and the IDF
/// weights derived from them. A value only exists after a successful
/// [`fit`](TFIDFVectorizer::fit) and nothing mutates it afterwards, so it can
/// be shared by reference between threads and `transform` needs no locking.
#[derive(Debug, Clone)]
pub struct TFIDFVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    /// Corpus statistics
    corpus: Corpus,
    /// IDF weights, one per vocabulary column
    idf_cache: Vec<N>,
    _marker: PhantomData<E>,
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    /// Fit the vocabulary and term statistics on `docs`.
    ///
    /// # Errors
    /// * `EmptyCorpus` if `docs` is empty
    /// * `EmptyVocabulary` if no document contains a term
    pub fn fit<S>(docs: &[S]) -> Result<Self>
    where
        S: AsRef<str> + Sync,
    {
        let freqs: Vec<TermFrequency> = docs
            .par_iter()
            .map(|doc| TermFrequency::from_text(doc.as_ref()))
            .collect();
        let corpus = Corpus::build(&freqs)?;
        let vectorizer = Self::from_corpus(corpus);
        tracing::debug!(
            docs = vectorizer.corpus.get_doc_num(),
            vocab = vectorizer.vocab_size(),
            "vectorizer fitted"
        );
        Ok(vectorizer)
    }

    /// Fit on `docs` and return their term vectors, row `i` for `docs[i]`
    pub fn fit_transform<S>(docs: &[S]) -> Result<(Self, Vec<TermVector<N>>)>
    where
        S: AsRef<str> + Sync,
    {
        let vectorizer = Self::fit(docs)?;
        let matrix = vectorizer.transform_batch(docs);
        Ok((vectorizer, matrix))
    }

    /// Build from already computed statistics; IDF is derived here
    pub fn from_corpus(corpus: Corpus) -> Self {
        let idf_cache = E::idf_vec(&corpus);
        TFIDFVectorizer {
            corpus,
            idf_cache,
            _marker: PhantomData,
        }
    }

    /// Term vector of `doc`.
    ///
    /// Terms the vocabulary does not know are dropped. A document that
    /// shares no term with the vocabulary (including `""`) yields the
    /// all-zero vector.
    pub fn transform(&self, doc: &str) -> TermVector<N> {
        self.transform_freq(&TermFrequency::from_text(doc))
    }

    /// Term vector of pre-counted terms
    pub fn transform_freq(&self, freq: &TermFrequency) -> TermVector<N> {
        E::tfidf_vec(freq, &self.corpus, &self.idf_cache)
    }

    /// 並列変換 (order preserving)
    pub fn transform_batch<S>(&self, docs: &[S]) -> Vec<TermVector<N>>
    where
        S: AsRef<str> + Sync,
    {
        docs.par_iter()
            .map(|doc| {
                let mut vec = self.transform(doc.as_ref());
                vec.shrink_to_fit();
                vec
            })
            .collect()
    }
}

impl<N, E> TFIDFVectorizer<N, E>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    /// Corpus statistics
    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// IDF weights in column order
    #[inline]
    pub fn idf(&self) -> &[N] {
        &self.idf_cache
    }

    /// Dimension of every term vector
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.corpus.vocab_size()
    }

    /// Check if the term is part of the vocabulary
    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.corpus.term_index(term).is_some()
    }

    /// Vocabulary terms in column order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.corpus.iter().map(|(term, _)| term)
    }
}
