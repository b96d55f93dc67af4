use crate::{
    cli::{print_tracks, spinner},
    context::AppContext,
    info,
    tracks::{
        FetchOutcome, SearchSession, list_key, messages::OFFLINE_BANNER_MESSAGE, selectors,
    },
    warning,
};

/// Searches for `query` and prints up to `pages` pages of results.
///
/// A query that matches the restored snapshot is served from the cache
/// unless `force` is set.
pub async fn search(ctx: &AppContext, query: String, pages: u32, force: bool) {
    let query = query.trim().to_string();
    if query.is_empty() {
        warning!("Search tracks to get started.");
        return;
    }

    let mut session = SearchSession::new(&ctx.controller, ctx.page_limit);

    let pb = spinner(format!("Searching Jamendo for \"{}\"...", query));
    ctx.controller.check_connectivity().await;
    if session.on_settled_text(&query).await.is_none() && force {
        session.refresh().await;
    }

    let mut last_offset = 0;
    while (session.view().await.pagination.offsets.len() as u32) < pages.max(1) {
        let next_offset = session.view().await.next_offset;
        pb.set_message(format!("Loading results from offset {}...", next_offset));
        match session.load_more().await {
            Some(FetchOutcome::Fetched) => last_offset = next_offset,
            Some(_) => {
                last_offset = next_offset;
                break;
            }
            None => break,
        }
    }
    pb.finish_and_clear();

    let view = session.view().await;
    if view.is_offline {
        warning!("{}", OFFLINE_BANNER_MESSAGE);
    }
    if let Some(e) = &view.list_error {
        warning!("{}", e);
    }
    if last_offset > 0 {
        let state_error = {
            let store = ctx.controller.store().lock().await;
            selectors::error(store.state(), &list_key(&query, last_offset))
        };
        if let Some(e) = state_error {
            warning!("{}", e);
        }
    }

    if view.tracks.is_empty() {
        if view.list_error.is_none() {
            info!("No matches. Try a different search.");
        }
        return;
    }

    print_tracks(&view.tracks);
    if view.show_load_more_hint {
        info!(
            "More results available. Run with --pages {} to load them.",
            view.pagination.offsets.len() + 1
        );
    }
}
