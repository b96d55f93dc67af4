use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
    tracks::connectivity::NetState,
    types::{TrackDetail, TrackSummary},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMeta {
    pub last_offset: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub last_query: Option<String>,
    pub snapshot_at: Option<i64>,
}

/// Page id lists of one query, ordered by offset.
pub type QueryPages = BTreeMap<u32, Vec<String>>;

/// Normalized tracks state.
///
/// Every map lives behind its own `Arc`. Reducers never mutate a slice in
/// place: a touched slice is rebuilt and swapped, so two states share a
/// slice pointer exactly when that slice did not change.
#[derive(Debug, Clone, Default)]
pub struct TracksState {
    pub entities: Arc<HashMap<String, TrackSummary>>,
    pub detail: Arc<HashMap<String, TrackDetail>>,
    pub pages: Arc<HashMap<String, QueryPages>>,
    pub page_meta: Arc<HashMap<String, QueryMeta>>,
    pub query: String,
    pub status: Arc<HashMap<String, RequestStatus>>,
    pub error: Arc<HashMap<String, Option<String>>>,
    pub cache_meta: CacheMeta,
    /// Last reachability signal seen by the controller. Never persisted.
    pub net: NetState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetQuery(String),
    /// Drops pages, pagination meta and the request ledger. Entities,
    /// details and cache meta are kept.
    ClearResults,
    Reset,
    SetStatus {
        key: String,
        status: RequestStatus,
    },
    SetError {
        key: String,
        error: Option<String>,
    },
    MergeTracksPage {
        query: String,
        offset: u32,
        items: Vec<TrackSummary>,
        has_more: bool,
    },
    SetDetail(TrackDetail),
    UpdatePageMeta {
        query: String,
        meta: QueryMeta,
    },
    /// Merges the set fields into the current cache meta.
    UpdateCacheMeta(CacheMeta),
    SetNetState(NetState),
}

fn replace<T: Clone>(slice: &mut Arc<T>, f: impl FnOnce(&mut T)) {
    let mut next = T::clone(slice);
    f(&mut next);
    *slice = Arc::new(next);
}

fn unique_ids(items: &[TrackSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.id.as_str()))
        .map(|item| item.id.clone())
        .collect()
}

pub fn reduce(state: &mut TracksState, action: Action) {
    match action {
        Action::SetQuery(query) => state.query = query,
        Action::ClearResults => {
            state.pages = Arc::default();
            state.page_meta = Arc::default();
            state.status = Arc::default();
            state.error = Arc::default();
        }
        Action::Reset => {
            *state = TracksState {
                net: state.net,
                ..TracksState::default()
            }
        }
        Action::SetStatus { key, status } => replace(&mut state.status, |s| {
            s.insert(key, status);
        }),
        Action::SetError { key, error } => replace(&mut state.error, |e| {
            e.insert(key, error);
        }),
        Action::MergeTracksPage {
            query,
            offset,
            items,
            has_more,
        } => {
            let ids = unique_ids(&items);
            replace(&mut state.entities, |entities| {
                for item in items {
                    entities.insert(item.id.clone(), item);
                }
            });
            replace(&mut state.pages, |pages| {
                pages.entry(query.clone()).or_default().insert(offset, ids);
            });
            replace(&mut state.page_meta, |meta| {
                meta.insert(
                    query,
                    QueryMeta {
                        last_offset: offset as i64,
                        has_more,
                    },
                );
            });
        }
        Action::SetDetail(detail) => {
            let summary = detail.summary();
            replace(&mut state.entities, |entities| {
                entities.insert(summary.id.clone(), summary);
            });
            replace(&mut state.detail, |details| {
                details.insert(detail.id.clone(), detail);
            });
        }
        Action::UpdatePageMeta { query, meta } => replace(&mut state.page_meta, |m| {
            m.insert(query, meta);
        }),
        Action::UpdateCacheMeta(update) => {
            if update.last_query.is_some() {
                state.cache_meta.last_query = update.last_query;
            }
            if update.snapshot_at.is_some() {
                state.cache_meta.snapshot_at = update.snapshot_at;
            }
        }
        Action::SetNetState(net) => state.net = net,
    }
}
