mod common;

use std::sync::Arc;

use common::{FakeCatalog, numbered, page};
use jamsearch::{
    jamendo::{ApiError, ApiErrorCode},
    tracks::{
        FetchOutcome, NetState, RequestStatus, SearchSession, Store, SyncController,
        messages::OFFLINE_LIST_MESSAGE,
    },
};
use tokio::sync::Notify;

const LIMIT: u32 = 20;

fn catalog() -> FakeCatalog {
    let catalog = FakeCatalog::new();
    catalog.set_page("piano", 0, Ok(page(numbered(0, 20), LIMIT, 0)));
    catalog.set_page("piano", 20, Ok(page(numbered(20, 30), LIMIT, 20)));
    catalog.set_page("drums", 0, Ok(page(numbered(100, 104), LIMIT, 0)));
    catalog
}

fn controller(catalog: FakeCatalog) -> SyncController<FakeCatalog, NetState> {
    SyncController::new(Store::new().shared(), catalog, NetState::online())
}

#[tokio::test]
async fn test_settled_text_starts_search() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);

    let outcome = session.on_settled_text("piano").await;
    assert_eq!(outcome, Some(FetchOutcome::Fetched));

    let view = session.view().await;
    assert_eq!(view.query, "piano");
    assert!(view.has_active_query);
    assert_eq!(view.tracks.len(), 20);
    assert_eq!(view.list_status, RequestStatus::Succeeded);
    assert_eq!(view.next_offset, 20);
    assert!(view.show_load_more_hint);
    assert!(!view.is_initial_loading);
    assert!(!view.is_refreshing);
    assert!(!view.is_offline);
}

#[tokio::test]
async fn test_same_text_does_not_refetch() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);

    session.on_settled_text("piano").await;
    assert_eq!(session.on_settled_text("piano").await, None);
    assert_eq!(session.on_settled_text("  piano ").await, None);
    assert_eq!(controller.catalog().search_calls(), 1);
}

#[tokio::test]
async fn test_new_text_replaces_results() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);

    session.on_settled_text("piano").await;
    session.on_settled_text("drums").await;

    let view = session.view().await;
    assert_eq!(view.query, "drums");
    assert_eq!(view.tracks.len(), 4);
    assert!(!view.pagination.has_more);
    assert!(!view.show_load_more_hint);
}

#[tokio::test]
async fn test_blank_text_clears_query() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);

    session.on_settled_text("piano").await;
    assert_eq!(session.on_settled_text("   ").await, None);

    let view = session.view().await;
    assert!(!view.has_active_query);
    assert!(view.tracks.is_empty());
    assert_eq!(session.refresh().await, None);

    // The cleared query can be searched again
    assert_eq!(
        session.on_settled_text("piano").await,
        Some(FetchOutcome::Fetched)
    );
}

#[tokio::test]
async fn test_load_more_until_exhausted() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);
    session.on_settled_text("piano").await;

    assert_eq!(session.load_more().await, Some(FetchOutcome::Fetched));

    let view = session.view().await;
    assert_eq!(view.tracks.len(), 30);
    assert!(!view.pagination.has_more);
    assert_eq!(view.pagination.offsets, vec![0, 20]);

    assert_eq!(session.load_more().await, None);
    assert_eq!(controller.catalog().search_calls(), 2);
}

#[tokio::test]
async fn test_load_more_without_query_does_nothing() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);

    assert_eq!(session.load_more().await, None);
    assert_eq!(controller.catalog().search_calls(), 0);
}

#[tokio::test]
async fn test_refresh_forces_first_page() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);
    session.on_settled_text("piano").await;

    assert_eq!(session.refresh().await, Some(FetchOutcome::Fetched));
    assert_eq!(session.retry().await, Some(FetchOutcome::Fetched));
    assert_eq!(controller.catalog().search_calls(), 3);
}

#[tokio::test]
async fn test_failed_search_is_reported_and_retried() {
    let catalog = catalog();
    catalog.set_page(
        "violin",
        0,
        Err(ApiError::new(ApiErrorCode::Timeout, "slow")),
    );
    let controller = controller(catalog);
    let mut session = SearchSession::new(&controller, LIMIT);

    let outcome = session.on_settled_text("violin").await;
    assert_eq!(outcome, Some(FetchOutcome::Failed(ApiErrorCode::Timeout)));

    let view = session.view().await;
    assert_eq!(view.list_status, RequestStatus::Failed);
    assert_eq!(
        view.list_error.as_deref(),
        Some("The request timed out. Please try again.")
    );

    controller
        .catalog()
        .set_page("violin", 0, Ok(page(numbered(0, 2), LIMIT, 0)));
    assert_eq!(session.retry().await, Some(FetchOutcome::Fetched));
    assert_eq!(session.view().await.list_error, None);
}

#[tokio::test]
async fn test_view_reports_initial_loading() {
    let gate = Arc::new(Notify::new());
    let controller = controller(catalog().with_gate(Arc::clone(&gate)));
    let mut session = SearchSession::new(&controller, LIMIT);
    let mut observer = SearchSession::new(&controller, LIMIT);

    let search = session.on_settled_text("piano");
    let observe = async {
        while controller.catalog().search_calls() == 0 {
            tokio::task::yield_now().await;
        }
        let view = observer.view().await;
        gate.notify_one();
        view
    };

    let (outcome, loading) = tokio::join!(search, observe);
    assert_eq!(outcome, Some(FetchOutcome::Fetched));
    assert!(loading.is_initial_loading);
    assert!(!loading.is_refreshing);
    assert_eq!(loading.list_status, RequestStatus::Loading);
}

#[tokio::test]
async fn test_memoized_view_is_stable_between_renders() {
    let controller = controller(catalog());
    let mut session = SearchSession::new(&controller, LIMIT);
    session.on_settled_text("piano").await;

    let first = session.view().await;
    let second = session.view().await;
    assert!(Arc::ptr_eq(&first.tracks, &second.tracks));
    assert!(Arc::ptr_eq(&first.pagination, &second.pagination));
}

#[tokio::test]
async fn test_view_reports_offline() {
    let controller = SyncController::new(Store::new().shared(), catalog(), NetState::offline());
    let mut session = SearchSession::new(&controller, LIMIT);

    let outcome = session.on_settled_text("piano").await;
    assert_eq!(outcome, Some(FetchOutcome::Offline));

    let view = session.view().await;
    assert!(view.is_offline);
    assert!(view.tracks.is_empty());
    assert_eq!(view.list_error.as_deref(), Some(OFFLINE_LIST_MESSAGE));
    assert_eq!(controller.catalog().search_calls(), 0);
}
