use std::fs;
use std::path::{Path, PathBuf};

use crate::doc::MatchDoc;
use crate::embed::Embedding;
use crate::store::{MemoryStore, SearchResult, StoredDoc, VectorStore};
use crate::{Error, Result};

/// Snapshot file written inside the index directory.
const SNAPSHOT_FILE: &str = "matches.json";

/// Directory-backed vector store.
///
/// Holds everything in memory and snapshots the full contents to a JSON
/// file inside the index directory on [`persist`](Self::persist). The
/// directory's existence is the only signal the indexer checks before
/// rebuilding - there is no staleness detection against the source CSV.
pub struct DiskStore {
    path: PathBuf,
    mem: MemoryStore,
}

impl DiskStore {
    /// Does an index already exist at this path?
    #[must_use]
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Open the store at `path`, loading a snapshot if one is present.
    ///
    /// A missing directory or snapshot yields an empty store; nothing is
    /// written until [`persist`](Self::persist).
    pub fn open(path: &Path) -> Result<Self> {
        let mut mem = MemoryStore::new();

        let snapshot = path.join(SNAPSHOT_FILE);
        if snapshot.exists() {
            let data = fs::read_to_string(&snapshot)
                .map_err(|e| Error::Store(format!("{}: {e}", snapshot.display())))?;
            let rows: Vec<StoredDoc> =
                serde_json::from_str(&data).map_err(|e| Error::Store(e.to_string()))?;
            for row in rows {
                mem.push_row(row);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            mem,
        })
    }

    /// Write the current contents to the snapshot file, creating the index
    /// directory if needed.
    pub fn persist(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .map_err(|e| Error::Store(format!("{}: {e}", self.path.display())))?;

        let json =
            serde_json::to_string(self.mem.rows()).map_err(|e| Error::Store(e.to_string()))?;

        let snapshot = self.path.join(SNAPSHOT_FILE);
        fs::write(&snapshot, json)
            .map_err(|e| Error::Store(format!("{}: {e}", snapshot.display())))
    }

    /// The index directory this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VectorStore for DiskStore {
    fn insert(&mut self, docs: &[MatchDoc], embeddings: &[Embedding]) -> Result<()> {
        self.mem.insert(docs, embeddings)
    }

    fn search(&self, query_embedding: &Embedding, k: usize) -> Result<Vec<SearchResult>> {
        self.mem.search(query_embedding, k)
    }

    fn all(&self) -> Vec<MatchDoc> {
        self.mem.all()
    }

    fn len(&self) -> usize {
        self.mem.len()
    }

    fn clear(&mut self) {
        self.mem.clear();
    }
}
