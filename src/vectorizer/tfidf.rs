use num::Float;

use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{corpus::Corpus, token::TermFrequency};

/// TF-IDF計算エンジン
/// Weighting strategy plugged into `TFIDFVectorizer<N, E>`.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// IDFベクトルを生成するメソッド
    ///
    /// # Arguments
    /// * `corpus` - コーパス
    ///
    /// # Returns
    /// * `Vec<N>` - one weight per vocabulary column
    fn idf_vec(corpus: &Corpus) -> Vec<N>;

    /// TF-IDFベクトルを生成するメソッド
    /// Terms outside the vocabulary contribute nothing.
    ///
    /// # Arguments
    /// * `freq` - term counts of the document
    /// * `corpus` - コーパス
    /// * `idf` - output of `idf_vec` for the same corpus
    fn tfidf_vec(freq: &TermFrequency, corpus: &Corpus, idf: &[N]) -> ZeroSpVec<N>;
}

/// デフォルトのTF-IDFエンジン
///
/// * tf = raw count of the term in the document
/// * idf = `ln((1 + N) / (1 + df)) + 1` (smoothed, always > 0)
/// * the product vector is L2-normalized, so cosine similarity is a dot product
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// IDFの計算
    ///
    /// # Arguments
    /// * `doc_num` - 全ドキュメント数
    /// * `doc_freq` - termを含むドキュメント数
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

impl<N> TFIDFEngine<N> for DefaultTFIDFEngine
where
    N: Float,
{
    fn idf_vec(corpus: &Corpus) -> Vec<N> {
        let doc_num = corpus.get_doc_num();
        corpus
            .iter()
            .map(|(_, doc_freq)| to_weight(Self::idf_calc(doc_num, doc_freq)))
            .collect()
    }

    fn tfidf_vec(freq: &TermFrequency, corpus: &Corpus, idf: &[N]) -> ZeroSpVec<N> {
        debug_assert_eq!(idf.len(), corpus.vocab_size());
        let entries: Vec<(u32, N)> = freq
            .iter()
            .filter_map(|(term, count)| {
                let idx = corpus.term_index(term)?;
                let weight = to_weight::<N>(f64::from(count)) * idf[idx];
                Some((idx as u32, weight))
            })
            .collect();
        let mut vec = ZeroSpVec::from_entries(corpus.vocab_size(), entries);
        vec.normalize();
        vec
    }
}

/// f64 -> N, saturating to zero when the value cannot be represented
#[inline]
fn to_weight<N: Float>(value: f64) -> N {
    num::cast::<f64, N>(value).unwrap_or_else(N::zero)
}
