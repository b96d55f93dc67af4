use crate::{
    jamendo::{ApiErrorCode, CatalogApi},
    tracks::{
        connectivity::{Connectivity, NetState},
        keys::{detail_key, list_key},
        messages::{OFFLINE_DETAIL_MESSAGE, OFFLINE_LIST_MESSAGE, ledger_message},
        snapshot::{SnapshotManager, is_snapshot_fresh, now_millis, prune},
        state::{Action, CacheMeta, RequestStatus},
        store::SharedStore,
    },
    warning,
};

/// What a fetch call ended up doing. Failures are also recorded in the
/// request ledger; this value only tells the caller which path was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The query was blank and query-scoped state was cleared.
    Reset,
    /// Already loading, or the data is cached.
    Skipped,
    /// The device is offline; the catalog was not called.
    Offline,
    Fetched,
    Failed(ApiErrorCode),
}

/// Decides when the catalog has to be called and commits the results.
///
/// Every state change goes through the shared store. A fetch holds the
/// store lock only to read, to mark itself as loading, and to commit; the
/// lock is never held across the network call.
pub struct SyncController<C, N> {
    store: SharedStore,
    catalog: C,
    connectivity: N,
    snapshots: Option<SnapshotManager>,
}

impl<C, N> SyncController<C, N>
where
    C: CatalogApi + Sync,
    N: Connectivity + Sync,
{
    pub fn new(store: SharedStore, catalog: C, connectivity: N) -> Self {
        Self {
            store,
            catalog,
            connectivity,
            snapshots: None,
        }
    }

    /// Persists a pruned snapshot after every cache meta update. Writes
    /// happen under the store lock, so the file always matches the last
    /// committed cache meta.
    pub fn with_snapshots(mut self, snapshots: SnapshotManager) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub async fn fetch_page(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
        force: bool,
    ) -> FetchOutcome {
        let query = query.trim();
        if query.is_empty() {
            self.store.lock().await.dispatch(Action::ClearResults);
            return FetchOutcome::Reset;
        }

        let key = list_key(query, offset);
        {
            let mut store = self.store.lock().await;
            let state = store.state();
            if !force {
                if state.status.get(&key) == Some(&RequestStatus::Loading) {
                    return FetchOutcome::Skipped;
                }

                let cached = state
                    .pages
                    .get(query)
                    .and_then(|pages| pages.get(&offset))
                    .is_some_and(|ids| !ids.is_empty());
                if cached {
                    return FetchOutcome::Skipped;
                }

                let exhausted = state
                    .page_meta
                    .get(query)
                    .is_some_and(|m| !m.has_more && offset as i64 > m.last_offset);
                if exhausted {
                    return FetchOutcome::Skipped;
                }
            }

            // Marking the key before the connectivity check closes the
            // window in which a second caller could pass the dedup test.
            // Offline calls therefore pass through `Loading` before `Failed`.
            store.dispatch_all([
                Action::SetStatus {
                    key: key.clone(),
                    status: RequestStatus::Loading,
                },
                Action::SetError {
                    key: key.clone(),
                    error: None,
                },
            ]);
        }

        let net = self.connectivity.fetch().await;
        if net.is_offline() {
            self.store.lock().await.dispatch_all([
                Action::SetNetState(net),
                Action::SetError {
                    key: key.clone(),
                    error: Some(OFFLINE_LIST_MESSAGE.to_string()),
                },
                Action::SetStatus {
                    key,
                    status: RequestStatus::Failed,
                },
            ]);
            return FetchOutcome::Offline;
        }

        match self.catalog.search_tracks(query, limit, offset).await {
            Ok(page) => {
                let mut actions = vec![
                    Action::SetNetState(net),
                    Action::MergeTracksPage {
                        query: query.to_string(),
                        offset,
                        items: page.items,
                        has_more: page.has_more,
                    },
                ];
                if offset == 0 {
                    actions.push(Action::UpdateCacheMeta(CacheMeta {
                        last_query: Some(query.to_string()),
                        snapshot_at: Some(now_millis()),
                    }));
                }
                actions.push(Action::SetStatus {
                    key: key.clone(),
                    status: RequestStatus::Succeeded,
                });
                actions.push(Action::SetError { key, error: None });

                // The lock is held through the write so snapshots reach the
                // disk in commit order.
                let mut store = self.store.lock().await;
                let state = store.dispatch_all(actions);
                if let (0, Some(manager)) = (offset, &self.snapshots) {
                    if let Err(e) = manager.persist(&prune(state)).await {
                        warning!("Failed to persist tracks snapshot: {}", e);
                    }
                }
                FetchOutcome::Fetched
            }
            Err(e) => {
                self.store.lock().await.dispatch_all([
                    Action::SetNetState(net),
                    Action::SetStatus {
                        key: key.clone(),
                        status: RequestStatus::Failed,
                    },
                    Action::SetError {
                        key,
                        error: Some(ledger_message(&e)),
                    },
                ]);
                FetchOutcome::Failed(e.code)
            }
        }
    }

    pub async fn fetch_detail(&self, id: &str, force: bool) -> FetchOutcome {
        let key = detail_key(id);
        {
            let mut store = self.store.lock().await;
            let state = store.state();
            if !force
                && (state.status.get(&key) == Some(&RequestStatus::Loading)
                    || state.detail.contains_key(id))
            {
                return FetchOutcome::Skipped;
            }

            store.dispatch_all([
                Action::SetStatus {
                    key: key.clone(),
                    status: RequestStatus::Loading,
                },
                Action::SetError {
                    key: key.clone(),
                    error: None,
                },
            ]);
        }

        let net = self.connectivity.fetch().await;
        if net.is_offline() {
            self.store.lock().await.dispatch_all([
                Action::SetNetState(net),
                Action::SetError {
                    key: key.clone(),
                    error: Some(OFFLINE_DETAIL_MESSAGE.to_string()),
                },
                Action::SetStatus {
                    key,
                    status: RequestStatus::Failed,
                },
            ]);
            return FetchOutcome::Offline;
        }

        match self.catalog.fetch_track_detail(id).await {
            Ok(detail) => {
                self.store.lock().await.dispatch_all([
                    Action::SetNetState(net),
                    Action::SetDetail(detail),
                    Action::SetStatus {
                        key: key.clone(),
                        status: RequestStatus::Succeeded,
                    },
                    Action::SetError { key, error: None },
                ]);
                FetchOutcome::Fetched
            }
            Err(e) => {
                self.store.lock().await.dispatch_all([
                    Action::SetNetState(net),
                    Action::SetStatus {
                        key: key.clone(),
                        status: RequestStatus::Failed,
                    },
                    Action::SetError {
                        key,
                        error: Some(ledger_message(&e)),
                    },
                ]);
                FetchOutcome::Failed(e.code)
            }
        }
    }

    /// Asks the connectivity source for a fresh signal and records it.
    pub async fn check_connectivity(&self) -> NetState {
        let net = self.connectivity.fetch().await;
        self.store.lock().await.dispatch(Action::SetNetState(net));
        net
    }

    /// Sets the active query. With `reset_results` the query-scoped state
    /// is cleared too; entities and cache meta stay.
    pub async fn update_search_query(&self, query: &str, reset_results: bool) {
        let mut store = self.store.lock().await;
        if reset_results {
            store.dispatch_all([Action::SetQuery(query.to_string()), Action::ClearResults]);
        } else {
            store.dispatch(Action::SetQuery(query.to_string()));
        }
    }

    /// Runs once after the snapshot was restored into the store.
    pub async fn hydrate_from_snapshot(&self) {
        let mut store = self.store.lock().await;
        let cache_meta = store.state().cache_meta.clone();
        let Some(last_query) = cache_meta.last_query else {
            return;
        };

        if !is_snapshot_fresh(cache_meta.snapshot_at, now_millis()) {
            store.dispatch(Action::ClearResults);
            return;
        }

        store.dispatch(Action::SetQuery(last_query));
    }

    /// Drops all tracks state and the persisted snapshot.
    pub async fn reset(&self) {
        let mut store = self.store.lock().await;
        store.dispatch(Action::Reset);
        if let Some(manager) = &self.snapshots {
            if let Err(e) = manager.clear().await {
                warning!("Failed to remove tracks snapshot: {}", e);
            }
        }
    }
}
