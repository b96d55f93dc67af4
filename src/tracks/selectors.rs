//! Read-side projections of [`TracksState`].
//!
//! The free functions are pure and cheap to call. [`Selectors`] adds
//! memoization for the list projections: a cached result is reused while the
//! state slices it was computed from are the same `Arc` allocations, and the
//! returned `Arc` is then pointer-identical to the previous one.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    tracks::{
        keys::detail_key,
        state::{CacheMeta, QueryMeta, QueryPages, RequestStatus, TracksState},
    },
    types::{TrackDetail, TrackSummary},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationMeta {
    pub offsets: Vec<u32>,
    pub last_offset: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    /// Offset of the page that would follow the last fetched one.
    pub fn next_offset(&self, limit: u32) -> u32 {
        if self.last_offset >= 0 {
            self.last_offset as u32 + limit
        } else {
            0
        }
    }
}

/// A track as shown on the detail screen: the full record when fetched,
/// otherwise the summary known from search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackView {
    Detail(TrackDetail),
    Summary(TrackSummary),
}

impl TrackView {
    pub fn name(&self) -> &str {
        match self {
            TrackView::Detail(d) => &d.name,
            TrackView::Summary(s) => &s.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub track: Option<TrackView>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub error: Option<String>,
    pub is_offline: bool,
}

pub fn current_query(state: &TracksState) -> &str {
    &state.query
}

pub fn track_by_id<'a>(state: &'a TracksState, id: &str) -> Option<&'a TrackSummary> {
    state.entities.get(id)
}

pub fn detail_by_id<'a>(state: &'a TracksState, id: &str) -> Option<&'a TrackDetail> {
    state.detail.get(id)
}

pub fn cache_meta(state: &TracksState) -> &CacheMeta {
    &state.cache_meta
}

/// Whether the last reachability signal reported the device offline.
pub fn is_offline(state: &TracksState) -> bool {
    state.net.is_offline()
}

fn ordered_ids_of(pages: Option<&QueryPages>) -> Vec<String> {
    let Some(pages) = pages else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for ids in pages.values() {
        for id in ids {
            if seen.insert(id.as_str()) {
                ordered.push(id.clone());
            }
        }
    }
    ordered
}

/// Ids of all pages of `query`, by ascending offset, first occurrence wins.
pub fn ordered_ids(state: &TracksState, query: &str) -> Vec<String> {
    ordered_ids_of(state.pages.get(query))
}

fn resolve(entities: &HashMap<String, TrackSummary>, ids: &[String]) -> Vec<TrackSummary> {
    ids.iter().filter_map(|id| entities.get(id).cloned()).collect()
}

/// Tracks of `query` in display order. Ids without an entity are skipped.
pub fn tracks(state: &TracksState, query: &str) -> Vec<TrackSummary> {
    resolve(&state.entities, &ordered_ids(state, query))
}

fn pagination_of(pages: Option<&QueryPages>, meta: Option<&QueryMeta>) -> PaginationMeta {
    let offsets: Vec<u32> = pages.map(|p| p.keys().copied().collect()).unwrap_or_default();
    if offsets.is_empty() {
        return PaginationMeta {
            offsets,
            last_offset: -1,
            has_more: false,
        };
    }

    let fallback_last = offsets.last().map(|o| *o as i64).unwrap_or(-1);
    PaginationMeta {
        last_offset: meta.map(|m| m.last_offset).unwrap_or(fallback_last),
        has_more: meta.map(|m| m.has_more).unwrap_or(false),
        offsets,
    }
}

pub fn pagination_meta(state: &TracksState, query: &str) -> PaginationMeta {
    pagination_of(state.pages.get(query), state.page_meta.get(query))
}

pub fn has_more(state: &TracksState, query: &str) -> bool {
    state.page_meta.get(query).map(|m| m.has_more).unwrap_or(false)
}

pub fn status(state: &TracksState, key: &str) -> RequestStatus {
    state.status.get(key).copied().unwrap_or_default()
}

pub fn error(state: &TracksState, key: &str) -> Option<String> {
    state.error.get(key).cloned().flatten()
}

pub fn detail_view(state: &TracksState, id: &str) -> DetailView {
    let key = detail_key(id);
    let detail = detail_by_id(state, id);
    let loading = status(state, &key) == RequestStatus::Loading;

    let track = match detail {
        Some(d) => Some(TrackView::Detail(d.clone())),
        None => track_by_id(state, id).cloned().map(TrackView::Summary),
    };

    DetailView {
        track,
        is_loading: loading && detail.is_none(),
        is_refreshing: loading && detail.is_some(),
        error: error(state, &key),
        is_offline: is_offline(state),
    }
}

type PagesSlice = Arc<HashMap<String, QueryPages>>;
type EntitiesSlice = Arc<HashMap<String, TrackSummary>>;
type MetaSlice = Arc<HashMap<String, QueryMeta>>;

struct IdsEntry {
    pages: PagesSlice,
    value: Arc<Vec<String>>,
}

struct TracksEntry {
    ids: Arc<Vec<String>>,
    entities: EntitiesSlice,
    value: Arc<Vec<TrackSummary>>,
}

struct PaginationEntry {
    pages: PagesSlice,
    meta: MetaSlice,
    value: Arc<PaginationMeta>,
}

/// Memoizing wrapper around the list projections, one cache entry per query.
#[derive(Default)]
pub struct Selectors {
    ids: HashMap<String, IdsEntry>,
    tracks: HashMap<String, TracksEntry>,
    pagination: HashMap<String, PaginationEntry>,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordered_ids(&mut self, state: &TracksState, query: &str) -> Arc<Vec<String>> {
        if let Some(entry) = self.ids.get(query) {
            if Arc::ptr_eq(&entry.pages, &state.pages) {
                return Arc::clone(&entry.value);
            }
        }

        let value = Arc::new(ordered_ids_of(state.pages.get(query)));
        self.ids.insert(
            query.to_string(),
            IdsEntry {
                pages: Arc::clone(&state.pages),
                value: Arc::clone(&value),
            },
        );
        value
    }

    pub fn tracks(&mut self, state: &TracksState, query: &str) -> Arc<Vec<TrackSummary>> {
        let ids = self.ordered_ids(state, query);
        if let Some(entry) = self.tracks.get(query) {
            if Arc::ptr_eq(&entry.ids, &ids) && Arc::ptr_eq(&entry.entities, &state.entities) {
                return Arc::clone(&entry.value);
            }
        }

        let value = Arc::new(resolve(&state.entities, &ids));
        self.tracks.insert(
            query.to_string(),
            TracksEntry {
                ids,
                entities: Arc::clone(&state.entities),
                value: Arc::clone(&value),
            },
        );
        value
    }

    pub fn pagination_meta(&mut self, state: &TracksState, query: &str) -> Arc<PaginationMeta> {
        if let Some(entry) = self.pagination.get(query) {
            if Arc::ptr_eq(&entry.pages, &state.pages) && Arc::ptr_eq(&entry.meta, &state.page_meta)
            {
                return Arc::clone(&entry.value);
            }
        }

        let value = Arc::new(pagination_of(
            state.pages.get(query),
            state.page_meta.get(query),
        ));
        self.pagination.insert(
            query.to_string(),
            PaginationEntry {
                pages: Arc::clone(&state.pages),
                meta: Arc::clone(&state.page_meta),
                value: Arc::clone(&value),
            },
        );
        value
    }
}
