//! CBOR snapshot of a fitted engine.
//!
//! Lets a caller skip re-fitting at startup. The snapshot carries a caller
//! supplied fingerprint of the source data so a stale file can be told
//! apart from a current one.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use num::Float;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::engine::RecommendEngine;
use crate::error::{Error, Result};
use crate::vectorizer::{tfidf::DefaultTFIDFEngine, TFIDFVectorizer, TermVector};

/// bump when the layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a, K, N>
where
    N: Float,
{
    version: u32,
    fingerprint: u64,
    vectorizer: &'a TFIDFVectorizer<N, DefaultTFIDFEngine>,
    matrix: &'a [TermVector<N>],
    ids: &'a [K],
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>, N: Float + Send + Sync + Deserialize<'de>"))]
struct SnapshotData<K, N>
where
    N: Float + Send + Sync,
{
    version: u32,
    fingerprint: u64,
    vectorizer: TFIDFVectorizer<N, DefaultTFIDFEngine>,
    matrix: Vec<TermVector<N>>,
    ids: Vec<K>,
}

impl<K, N> RecommendEngine<K, N>
where
    K: Serialize,
    N: Float + Serialize,
{
    /// Write the engine as CBOR
    pub fn to_writer<W: Write>(&self, writer: W, fingerprint: u64) -> Result<()> {
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            fingerprint,
            vectorizer: &self.vectorizer,
            matrix: &self.matrix,
            ids: &self.ids,
        };
        serde_cbor::to_writer(writer, &snapshot)?;
        Ok(())
    }

    /// Write the engine to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P, fingerprint: u64) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.to_writer(&mut writer, fingerprint)?;
        writer.flush()?;
        tracing::info!(path = %path.as_ref().display(), rows = self.len(), "snapshot written");
        Ok(())
    }
}

impl<K, N> RecommendEngine<K, N>
where
    K: DeserializeOwned,
    N: Float + Send + Sync + DeserializeOwned,
{
    /// Read an engine written by [`to_writer`](RecommendEngine::to_writer).
    /// Returns the engine together with the fingerprint it was saved with.
    ///
    /// # Errors
    /// * `Snapshot` if the bytes are not a valid snapshot encoding
    /// * `CorruptSnapshot` if the decoded engine breaks an invariant
    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, u64)> {
        let data: SnapshotData<K, N> = serde_cbor::from_reader(reader)?;
        let fingerprint = data.fingerprint;
        let engine = Self::from_snapshot(data).map_err(|err| {
            tracing::warn!(error = %err, "snapshot rejected");
            err
        })?;
        Ok((engine, fingerprint))
    }

    /// Read an engine from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, u64)> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader)
    }

    fn from_snapshot(data: SnapshotData<K, N>) -> Result<Self> {
        if data.version != SNAPSHOT_VERSION {
            return Err(Error::CorruptSnapshot(format!(
                "version {} is not supported (expected {SNAPSHOT_VERSION})",
                data.version
            )));
        }
        if data.matrix.is_empty() {
            return Err(Error::CorruptSnapshot("no rows".to_string()));
        }
        if data.matrix.len() != data.ids.len() {
            return Err(Error::CorruptSnapshot(format!(
                "{} rows but {} ids",
                data.matrix.len(),
                data.ids.len()
            )));
        }
        let dim = data.vectorizer.vocab_size();
        if let Some(row) = data.matrix.iter().position(|row| row.len() != dim) {
            return Err(Error::CorruptSnapshot(format!(
                "row {row} has dimension {} instead of {dim}",
                data.matrix[row].len()
            )));
        }
        Ok(RecommendEngine {
            vectorizer: data.vectorizer,
            matrix: data.matrix,
            ids: data.ids,
        })
    }
}
