use chrono::{Local, TimeZone};

use crate::{
    config,
    context::AppContext,
    info, success,
    tracks::{
        SnapshotManager,
        snapshot::{SNAPSHOT_TTL_MS, is_snapshot_fresh, now_millis},
    },
    warning,
};

/// Shows what the persisted snapshot holds, or clears it.
pub async fn cache(ctx: &AppContext, clear: bool) {
    if clear {
        ctx.controller.reset().await;
        success!("Cleared cached search results.");
        return;
    }

    let snapshot = match SnapshotManager::from_dir(config::data_dir()).load_raw().await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            info!("No cached search results.");
            return;
        }
        Err(e) => {
            warning!("Cannot read cached search results. Err: {}", e);
            return;
        }
    };

    let Some(last_query) = &snapshot.cache_meta.last_query else {
        info!("No cached search results.");
        return;
    };

    let now = now_millis();
    let captured = snapshot
        .cache_meta
        .snapshot_at
        .and_then(|at| Local.timestamp_millis_opt(at).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let tracks = snapshot
        .pages
        .get(last_query)
        .and_then(|pages| pages.get(&0))
        .map(|ids| ids.len())
        .unwrap_or(0);

    info!("Last query: \"{}\" ({} tracks)", last_query, tracks);
    info!("Captured at: {}", captured);

    if is_snapshot_fresh(snapshot.cache_meta.snapshot_at, now) {
        let age_min = snapshot
            .cache_meta
            .snapshot_at
            .map(|at| (now - at) / 60_000)
            .unwrap_or(0);
        success!(
            "Fresh for another {} minutes.",
            SNAPSHOT_TTL_MS / 60_000 - age_min
        );
    } else {
        warning!("Stale. It will be discarded on the next start.");
    }
}
