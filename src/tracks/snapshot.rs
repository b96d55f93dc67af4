use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    io::{Error, ErrorKind},
    path::PathBuf,
    sync::Arc,
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    tracks::state::{CacheMeta, QueryMeta, QueryPages, TracksState},
    types::TrackSummary,
};

pub const SNAPSHOT_TTL_MS: i64 = 30 * 60 * 1000;
pub const SNAPSHOT_ROOT_KEY: &str = "root";
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SnapshotError {
    IoError(Error),
    SerdeError(serde_json::Error),
    UnsupportedVersion(u32),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::IoError(e) => write!(f, "snapshot io error: {}", e),
            SnapshotError::SerdeError(e) => write!(f, "snapshot is malformed: {}", e),
            SnapshotError::UnsupportedVersion(v) => {
                write!(f, "snapshot version {} is not supported", v)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<Error> for SnapshotError {
    fn from(err: Error) -> Self {
        SnapshotError::IoError(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::SerdeError(err)
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A snapshot is fresh while it is younger than [`SNAPSHOT_TTL_MS`].
pub fn is_snapshot_fresh(snapshot_at: Option<i64>, now: i64) -> bool {
    match snapshot_at {
        Some(at) if at > 0 => now - at < SNAPSHOT_TTL_MS,
        _ => false,
    }
}

/// The part of [`TracksState`] that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistableSnapshot {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub entities: HashMap<String, TrackSummary>,
    #[serde(default)]
    pub pages: HashMap<String, QueryPages>,
    #[serde(default)]
    pub page_meta: HashMap<String, QueryMeta>,
    #[serde(default)]
    pub cache_meta: CacheMeta,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    tracks: PersistableSnapshot,
}

/// Reduces the state to the first page of the last successful query and
/// the entities it references.
pub fn prune(state: &TracksState) -> PersistableSnapshot {
    let Some(last_query) = state.cache_meta.last_query.clone() else {
        return PersistableSnapshot {
            query: state.query.clone(),
            ..PersistableSnapshot::default()
        };
    };

    let first_page: Vec<String> = state
        .pages
        .get(&last_query)
        .and_then(|pages| pages.get(&0))
        .cloned()
        .unwrap_or_default();

    let entities = first_page
        .iter()
        .filter_map(|id| state.entities.get(id).map(|e| (id.clone(), e.clone())))
        .collect();

    // Only page 0 is kept, so the meta must point at it. A query that had
    // pages past 0 still has more to load.
    let meta = state.page_meta.get(&last_query).map(|m| QueryMeta {
        last_offset: 0,
        has_more: m.has_more || m.last_offset > 0,
    });

    let mut pages = HashMap::new();
    let mut page_meta = HashMap::new();
    if !first_page.is_empty() {
        pages.insert(last_query.clone(), BTreeMap::from([(0, first_page)]));
        if let Some(meta) = meta {
            page_meta.insert(last_query.clone(), meta);
        }
    }

    PersistableSnapshot {
        query: state.query.clone(),
        entities,
        pages,
        page_meta,
        cache_meta: CacheMeta {
            last_query: Some(last_query),
            snapshot_at: state.cache_meta.snapshot_at,
        },
    }
}

/// Rebuilds a store state from a snapshot. Stale snapshots yield an empty
/// state with an empty query.
pub fn restore_at(snapshot: PersistableSnapshot, now: i64) -> TracksState {
    if !is_snapshot_fresh(snapshot.cache_meta.snapshot_at, now) {
        return TracksState::default();
    }

    TracksState {
        entities: Arc::new(snapshot.entities),
        pages: Arc::new(snapshot.pages),
        page_meta: Arc::new(snapshot.page_meta),
        query: snapshot.query,
        cache_meta: snapshot.cache_meta,
        ..TracksState::default()
    }
}

pub fn restore(snapshot: PersistableSnapshot) -> TracksState {
    restore_at(snapshot, now_millis())
}

/// File-backed key-value byte store. Each key is one file in `dir`.
#[derive(Debug, Clone)]
pub struct PersistStorage {
    dir: PathBuf,
}

impl PersistStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>, SnapshotError> {
        match async_fs::read(self.get_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::IoError(e)),
        }
    }

    pub async fn set_item(&self, key: &str, bytes: &[u8]) -> Result<(), SnapshotError> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(SnapshotError::IoError)?;
        async_fs::write(self.get_path(key), bytes)
            .await
            .map_err(SnapshotError::IoError)
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), SnapshotError> {
        match async_fs::remove_file(self.get_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnapshotError::IoError(e)),
        }
    }

    fn get_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

/// Persists and restores the versioned tracks snapshot under the root key.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    storage: PersistStorage,
}

impl SnapshotManager {
    pub fn new(storage: PersistStorage) -> Self {
        Self { storage }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(PersistStorage::new(dir))
    }

    pub async fn persist(&self, snapshot: &PersistableSnapshot) -> Result<(), SnapshotError> {
        let envelope = SnapshotEnvelope {
            version: SNAPSHOT_VERSION,
            tracks: snapshot.clone(),
        };
        let json = serde_json::to_vec_pretty(&envelope)?;
        self.storage.set_item(SNAPSHOT_ROOT_KEY, &json).await
    }

    /// Reads the stored snapshot as-is, without a freshness check.
    pub async fn load_raw(&self) -> Result<Option<PersistableSnapshot>, SnapshotError> {
        let Some(bytes) = self.storage.get_item(SNAPSHOT_ROOT_KEY).await? else {
            return Ok(None);
        };

        let envelope: SnapshotEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(envelope.version));
        }
        Ok(Some(envelope.tracks))
    }

    /// Loads and restores the snapshot. A missing snapshot gives an empty state.
    pub async fn load(&self) -> Result<TracksState, SnapshotError> {
        Ok(self
            .load_raw()
            .await?
            .map(restore)
            .unwrap_or_default())
    }

    pub async fn clear(&self) -> Result<(), SnapshotError> {
        self.storage.remove_item(SNAPSHOT_ROOT_KEY).await
    }
}
