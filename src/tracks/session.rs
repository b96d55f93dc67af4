use std::sync::Arc;

use crate::{
    jamendo::CatalogApi,
    tracks::{
        connectivity::Connectivity,
        controller::{FetchOutcome, SyncController},
        keys::list_key,
        selectors::{self, PaginationMeta, Selectors},
        state::RequestStatus,
    },
    types::TrackSummary,
};

/// Everything a search results screen renders for the active query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub tracks: Arc<Vec<TrackSummary>>,
    pub pagination: Arc<PaginationMeta>,
    pub next_offset: u32,
    pub list_status: RequestStatus,
    pub list_error: Option<String>,
    pub has_active_query: bool,
    pub is_initial_loading: bool,
    pub is_refreshing: bool,
    pub is_fetching_more: bool,
    pub show_load_more_hint: bool,
    pub is_offline: bool,
}

/// Drives the controller from settled search input.
///
/// Feed it the output of a debouncer; it turns each settled text into at
/// most one forced first-page fetch and handles paging for the active query.
pub struct SearchSession<'a, C, N> {
    controller: &'a SyncController<C, N>,
    limit: u32,
    last_fetched: String,
    selectors: Selectors,
}

impl<'a, C, N> SearchSession<'a, C, N>
where
    C: CatalogApi + Sync,
    N: Connectivity + Sync,
{
    pub fn new(controller: &'a SyncController<C, N>, limit: u32) -> Self {
        Self {
            controller,
            limit,
            last_fetched: String::new(),
            selectors: Selectors::new(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    async fn active_query(&self) -> String {
        self.controller.store().lock().await.state().query.clone()
    }

    /// Handles one settled input value. Returns the fetch outcome when a new
    /// search was started.
    pub async fn on_settled_text(&mut self, text: &str) -> Option<FetchOutcome> {
        let trimmed = text.trim();
        let stored = self.active_query().await;

        if trimmed.is_empty() {
            if !stored.is_empty() {
                self.controller.update_search_query("", true).await;
                self.last_fetched.clear();
            }
            return None;
        }

        if trimmed == stored || trimmed == self.last_fetched {
            return None;
        }

        self.last_fetched = trimmed.to_string();
        self.controller.update_search_query(trimmed, true).await;
        Some(
            self.controller
                .fetch_page(trimmed, 0, self.limit, true)
                .await,
        )
    }

    /// Requests the page after the last fetched one, if there is one and it
    /// is not already loading.
    pub async fn load_more(&mut self) -> Option<FetchOutcome> {
        let view = self.view().await;
        if !view.has_active_query || !view.pagination.has_more || view.is_fetching_more {
            return None;
        }

        Some(
            self.controller
                .fetch_page(&view.query, view.next_offset, self.limit, false)
                .await,
        )
    }

    /// Re-fetches the first page of the active query.
    pub async fn refresh(&mut self) -> Option<FetchOutcome> {
        let query = self.active_query().await;
        if query.trim().is_empty() {
            return None;
        }
        Some(self.controller.fetch_page(&query, 0, self.limit, true).await)
    }

    pub async fn retry(&mut self) -> Option<FetchOutcome> {
        self.refresh().await
    }

    pub async fn view(&mut self) -> SearchView {
        let store = self.controller.store().lock().await;
        let state = store.state();
        let query = state.query.clone();

        let tracks = self.selectors.tracks(state, &query);
        let pagination = self.selectors.pagination_meta(state, &query);
        let next_offset = pagination.next_offset(self.limit);

        let first_key = list_key(&query, 0);
        let list_status = selectors::status(state, &first_key);
        let list_error = selectors::error(state, &first_key);
        let next_status = selectors::status(state, &list_key(&query, next_offset));

        let has_active_query = !query.trim().is_empty();
        let is_offline = selectors::is_offline(state);
        let is_fetching_more = pagination.has_more && next_status == RequestStatus::Loading;
        let show_load_more_hint = pagination.has_more && !pagination.offsets.is_empty();

        SearchView {
            is_initial_loading: list_status == RequestStatus::Loading
                && tracks.is_empty()
                && has_active_query,
            is_refreshing: list_status == RequestStatus::Loading && !tracks.is_empty(),
            query,
            tracks,
            pagination,
            next_offset,
            list_status,
            list_error,
            has_active_query,
            is_fetching_more,
            show_load_more_hint,
            is_offline,
        }
    }
}
