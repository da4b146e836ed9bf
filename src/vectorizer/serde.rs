use num::Float;
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

use crate::vectorizer::{corpus::Corpus, tfidf::TFIDFEngine, TFIDFVectorizer};

/// TFIDFVectorizerのデシリアライズ用のデータ構造
/// Only the corpus statistics are stored; IDF weights are derived again
/// on load so they always agree with the engine `E` in use.
#[derive(Debug, Deserialize)]
pub struct TFIDFData {
    pub corpus: Corpus,
}

impl TFIDFData {
    /// `TFIDFData`から`TFIDFVectorizer`に変換します。
    pub fn into_tf_idf_vectorizer<N, E>(self) -> TFIDFVectorizer<N, E>
    where
        N: Float + Send + Sync,
        E: TFIDFEngine<N> + Send + Sync,
    {
        TFIDFVectorizer::from_corpus(self.corpus)
    }
}

impl<N, E> Serialize for TFIDFVectorizer<N, E>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TFIDFVectorizer", 1)?;
        state.serialize_field("corpus", self.corpus())?;
        state.end()
    }
}

impl<'de, N, E> Deserialize<'de> for TFIDFVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = TFIDFData::deserialize(deserializer)?;
        Ok(data.into_tf_idf_vectorizer())
    }
}
