//! # CLI Module
//!
//! Command implementations for the `jamsearch` binary. Every command works on
//! an [`AppContext`](crate::context::AppContext) created at startup, so the
//! persisted snapshot has already been restored and re-validated when a
//! command runs.
//!
//! ## Commands
//!
//! - [`search`] - Search tracks and print one or more result pages
//! - [`detail`] - Show the detail record of one track
//! - [`browse`] - Interactive, debounced search from standard input
//! - [`cache`] - Inspect or clear the persisted search snapshot
//!
//! ## Offline Behavior
//!
//! Failed requests never abort a command. The last known results stay on
//! screen and the ledger message for the failed request is printed as a
//! warning, so running with `--offline` shows whatever the snapshot holds.

mod browse;
mod cache;
mod detail;
mod search;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::types::{TrackSummary, TrackTableRow};

pub use browse::browse;
pub use cache::cache;
pub use detail::detail;
pub use search::search;

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub(crate) fn print_tracks(tracks: &[TrackSummary]) {
    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artist: t.artist_name.clone(),
            id: t.id.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
