//! # Jamendo Integration Module
//!
//! Typed access to the Jamendo v3 catalog. Only the `GET /tracks` endpoint is
//! used, in two shapes:
//!
//! - **Search**: `namesearch`, `limit`, `offset`, `fields`, `order`
//! - **Detail**: `id`, `limit=1`, `fields`
//!
//! ## Error Taxonomy
//!
//! Every outcome of a request maps to exactly one [`ApiErrorCode`]:
//!
//! | outcome                         | code           |
//! |---------------------------------|----------------|
//! | request timed out               | `Timeout`      |
//! | no HTTP response                | `Offline`      |
//! | 429                             | `RateLimited`  |
//! | 401 / 403                       | `Unauthorized` / `Forbidden` |
//! | 404, or empty detail result     | `NotFound`     |
//! | 5xx                             | `ServerError`  |
//! | anything else                   | `Unknown`      |
//!
//! Callers never see a `reqwest::Error`.
//!
//! ## Seams
//!
//! The sync controller only depends on the [`CatalogApi`] trait, so tests and
//! alternative backends can stand in for [`JamendoClient`].

mod client;
mod error;
mod tracks;

use std::future::Future;

pub use client::JamendoClient;
pub use error::ApiError;
pub use error::ApiErrorCode;
pub use tracks::DETAIL_FIELDS;
pub use tracks::LIST_FIELDS;
pub use tracks::LIST_ORDER;
pub use tracks::extract_image_url;
pub use tracks::map_track_detail;
pub use tracks::map_track_summary;
pub use tracks::page_from_results;

use crate::types::{TrackDetail, TracksPage};

/// Remote catalog operations consumed by the sync controller.
pub trait CatalogApi {
    /// Fetches one page of search results. `query` is expected to be trimmed
    /// and non-empty, `limit` positive.
    fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<TracksPage, ApiError>> + Send;

    /// Fetches the detail record of one track, failing with `NotFound` when
    /// the catalog has no track with that id.
    fn fetch_track_detail(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<TrackDetail, ApiError>> + Send;
}
