//! One-shot CSV to vector index construction
//!
//! The index is built exactly once: if the index directory already exists
//! on disk the CSV is not even opened. There is no diffing against changed
//! source data - deleting the directory is the only way to force a rebuild.

use std::path::Path;

use crate::doc::MatchDoc;
use crate::embed::Embedder;
use crate::record;
use crate::store::{DiskStore, VectorStore};
use crate::Result;

/// Open the index at `db_path`, building it from `csv_path` if absent.
///
/// On a build, every record is rendered, embedded in one batch, inserted,
/// and the store is persisted before returning. Any CSV, embedding, or
/// persistence error propagates; a partial build leaves no directory behind
/// to suppress the next attempt unless persistence itself failed mid-write.
pub fn load_or_build<E: Embedder>(
    embedder: &mut E,
    csv_path: &Path,
    db_path: &Path,
) -> Result<DiskStore> {
    if DiskStore::exists(db_path) {
        tracing::debug!(path = %db_path.display(), "index present, skipping ingestion");
        return DiskStore::open(db_path);
    }

    let records = record::load_records(csv_path)?;
    let docs: Vec<MatchDoc> = records
        .iter()
        .enumerate()
        .map(|(i, r)| r.to_doc(i))
        .collect();

    let texts: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
    let embeddings = embedder.embed_documents(&texts)?;

    let mut store = DiskStore::open(db_path)?;
    store.insert(&docs, &embeddings)?;
    store.persist()?;

    tracing::debug!(count = docs.len(), path = %db_path.display(), "indexed match records");
    Ok(store)
}
