use tabled::Table;

use crate::{
    cli::spinner,
    context::AppContext,
    format::{format_duration, format_release_date, format_time},
    playback::{TrackPlayer, TrackPlayerConfig},
    success,
    tracks::{
        messages::OFFLINE_BANNER_MESSAGE,
        selectors::{self, TrackView},
    },
    types::{DetailTableRow, TrackDetail},
    warning,
};

fn row(field: &str, value: impl Into<String>) -> DetailTableRow {
    DetailTableRow {
        field: field.to_string(),
        value: value.into(),
    }
}

fn or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

fn player_config(detail: &TrackDetail) -> TrackPlayerConfig {
    TrackPlayerConfig {
        track_id: detail.id.clone(),
        title: detail.name.clone(),
        artist: detail.artist_name.clone(),
        album: detail.album_name.clone(),
        audio_url: detail.audio_url.clone(),
        artwork_url: detail.image_url.clone(),
        duration_ms: Some(detail.duration_seconds * 1000),
    }
}

/// Fetches and prints the detail record of track `id`.
pub async fn detail(ctx: &AppContext, id: String, force: bool, open: bool) {
    let pb = spinner(format!("Fetching track {}...", id));
    ctx.controller.check_connectivity().await;
    ctx.controller.fetch_detail(&id, force).await;
    pb.finish_and_clear();

    let view = {
        let store = ctx.controller.store().lock().await;
        selectors::detail_view(store.state(), &id)
    };

    if view.is_offline {
        warning!("{}", OFFLINE_BANNER_MESSAGE);
    }
    if let Some(e) = &view.error {
        warning!("{}", e);
    }

    let rows = match &view.track {
        Some(TrackView::Detail(d)) => {
            let player = TrackPlayer::unavailable(player_config(d));
            let mut rows = vec![
                row("Title", d.name.clone()),
                row("Artist", d.artist_name.clone()),
                row("Album", or_missing(&d.album_name)),
                row("Duration", format_duration(Some(d.duration_seconds))),
                row("Length", format_time(player.duration_ms() as i64)),
                row("Released", format_release_date(d.release_date_iso.as_deref())),
                row("License", or_missing(&d.license_url)),
                row("Share", or_missing(&d.share_url)),
                row("Audio", d.audio_url.clone()),
                row("Artwork", player.artwork()),
            ];
            if !player.is_available() {
                rows.push(row("Player", "Audio playback unavailable"));
            }
            rows
        }
        Some(TrackView::Summary(s)) => vec![
            row("Title", s.name.clone()),
            row("Artist", s.artist_name.clone()),
            row("Audio", s.audio_url.clone()),
            row("Artwork", or_missing(&s.image_url)),
        ],
        None => {
            if view.error.is_none() {
                warning!("Track not found.");
            }
            return;
        }
    };

    println!("{}", Table::new(rows));

    if open {
        let share_url = match &view.track {
            Some(TrackView::Detail(d)) => d.share_url.clone(),
            _ => None,
        };
        match share_url {
            Some(url) => match webbrowser::open(&url) {
                Ok(_) => success!("Opened {} in your browser.", url),
                Err(e) => warning!("Cannot open browser. Err: {}", e),
            },
            None => warning!("This track has no share link."),
        }
    }
}
