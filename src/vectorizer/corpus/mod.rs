use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::token::TermFrequency;

/// Vocabulary and document-frequency statistics of the fit corpus.
///
/// `term_counts` maps each vocabulary term to the number of fit documents
/// that contain it. Terms are stored in ascending lexicographic order and a
/// term's position in the map is its column in every term vector, so the
/// same corpus always produces the same columns.
///
/// Built once by [`Corpus::build`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CorpusData")]
pub struct Corpus {
    /// number of fit documents
    doc_num: u64,
    /// term -> document frequency, sorted by term
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// コーパスを構築する
    /// Count document frequencies over `docs` and fix the vocabulary.
    ///
    /// # Errors
    /// * `EmptyCorpus` when `docs` is empty
    /// * `EmptyVocabulary` when no document holds a single term
    pub fn build(docs: &[TermFrequency]) -> Result<Self> {
        if docs.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let mut term_counts: IndexMap<Box<str>, u64> = IndexMap::new();
        for doc in docs {
            // one count per document, however often the term repeats
            for (term, _) in doc.iter() {
                if let Some(count) = term_counts.get_mut(term) {
                    *count += 1;
                } else {
                    term_counts.insert(term.into(), 1);
                }
            }
        }
        if term_counts.is_empty() {
            return Err(Error::EmptyVocabulary);
        }
        term_counts.sort_keys();
        Ok(Corpus {
            doc_num: docs.len() as u64,
            term_counts,
        })
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Documents containing `term`, 0 for terms outside the vocabulary
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Column of `term`
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.term_counts.get_index_of(term)
    }

    /// Term stored at `index`
    #[inline]
    pub fn term_at(&self, index: usize) -> Option<&str> {
        self.term_counts.get_index(index).map(|(term, _)| &**term)
    }

    /// number of unique terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// `(term, document frequency)` in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(term, df)| (&**term, *df))
    }
}

/// デシリアライズ用の中間表現
/// Decoded form that is checked before it becomes a `Corpus`.
#[derive(Deserialize)]
struct CorpusData {
    doc_num: u64,
    term_counts: IndexMap<Box<str>, u64>,
}

impl TryFrom<CorpusData> for Corpus {
    type Error = String;

    fn try_from(data: CorpusData) -> std::result::Result<Self, Self::Error> {
        if data.doc_num == 0 {
            return Err("corpus has no documents".to_string());
        }
        if data.term_counts.is_empty() {
            return Err("corpus has no terms".to_string());
        }
        let mut prev: Option<&str> = None;
        for (term, df) in &data.term_counts {
            if prev.map_or(false, |p| p >= &**term) {
                return Err(format!("term `{term}` is out of order"));
            }
            if *df == 0 || *df > data.doc_num {
                return Err(format!("term `{term}` has document frequency {df}"));
            }
            prev = Some(&**term);
        }
        Ok(Corpus {
            doc_num: data.doc_num,
            term_counts: data.term_counts,
        })
    }
}
