use crate::{
    jamendo::{
        CatalogApi,
        client::JamendoClient,
        error::{ApiError, ApiErrorCode},
    },
    types::{JamendoTrack, TrackDetail, TrackSummary, TracksPage},
};

pub const LIST_FIELDS: &[&str] = &["id", "name", "artist_name", "audio", "image", "album_image"];

pub const DETAIL_FIELDS: &[&str] = &[
    "id",
    "name",
    "artist_name",
    "duration",
    "album_name",
    "releasedate",
    "license_ccurl",
    "shareurl",
    "audio",
    "image",
    "album_image",
];

pub const LIST_ORDER: &str = "popularity_total";

/// Picks the track image, falling back to the album cover.
pub fn extract_image_url(track: &JamendoTrack) -> Option<String> {
    track
        .image
        .clone()
        .filter(|url| !url.is_empty())
        .or_else(|| track.album_image.clone().filter(|url| !url.is_empty()))
}

pub fn map_track_summary(track: &JamendoTrack) -> TrackSummary {
    TrackSummary {
        id: track.id.clone(),
        name: track.name.clone(),
        artist_name: track.artist_name.clone(),
        audio_url: track.audio.clone(),
        image_url: extract_image_url(track),
    }
}

pub fn map_track_detail(track: &JamendoTrack) -> TrackDetail {
    let base = map_track_summary(track);
    TrackDetail {
        id: base.id,
        name: base.name,
        artist_name: base.artist_name,
        audio_url: base.audio_url,
        image_url: base.image_url,
        duration_seconds: track.duration.unwrap_or(0),
        album_name: track.album_name.clone(),
        release_date_iso: track.releasedate.clone(),
        license_url: track.license_ccurl.clone(),
        share_url: track.shareurl.clone(),
    }
}

/// Builds a page from mapped results and the reported result count.
///
/// `has_more` is a heuristic: a full page means more pages are likely.
/// A query with exactly `limit` results therefore reports one extra page.
///
/// # Arguments
///
/// * `items` - Tracks of this page, already mapped
/// * `count` - `headers.results_count` from the response, if Jamendo sent one
/// * `limit` - Requested page size
/// * `offset` - Offset this page was requested at
///
/// # Returns
///
/// A `TracksPage` whose `next_offset` is `offset + limit` when `has_more`
/// holds. A missing `count` falls back to the number of items.
pub fn page_from_results(
    items: Vec<TrackSummary>,
    count: Option<u64>,
    limit: u32,
    offset: u32,
) -> TracksPage {
    let count = count.unwrap_or(items.len() as u64);
    let has_more = count >= limit as u64;
    let next_offset = if has_more { Some(offset + limit) } else { None };

    TracksPage {
        items,
        has_more,
        next_offset,
        count,
    }
}

impl CatalogApi for JamendoClient {
    /// Searches tracks by name, ordered by popularity.
    ///
    /// # Arguments
    ///
    /// * `query` - Name search text, sent as `namesearch`
    /// * `limit` - Page size, must be greater than zero
    /// * `offset` - Number of results to skip
    ///
    /// # Returns
    ///
    /// One page of track summaries with its pagination hints.
    ///
    /// # Errors
    ///
    /// Returns `ApiErrorCode::Unknown` without sending a request when `limit`
    /// is zero. Transport, HTTP and in-band failures are classified by
    /// `get_tracks`.
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<TracksPage, ApiError> {
        if limit == 0 {
            return Err(ApiError::new(
                ApiErrorCode::Unknown,
                "Page size must be greater than zero.",
            ));
        }

        let data = self
            .get_tracks(&[
                ("namesearch", query.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("fields", LIST_FIELDS.join(",")),
                ("order", LIST_ORDER.to_string()),
            ])
            .await?;

        let count = data.headers.as_ref().and_then(|h| h.results_count);
        let items = data.results.iter().map(map_track_summary).collect();

        Ok(page_from_results(items, count, limit, offset))
    }

    /// Fetches the full detail of a single track.
    ///
    /// # Arguments
    ///
    /// * `id` - Jamendo track id
    ///
    /// # Returns
    ///
    /// The mapped `TrackDetail` of the first result.
    ///
    /// # Errors
    ///
    /// Returns `ApiErrorCode::NotFound` when Jamendo answers with no results,
    /// and any error classified by `get_tracks`.
    async fn fetch_track_detail(&self, id: &str) -> Result<TrackDetail, ApiError> {
        let data = self
            .get_tracks(&[
                ("id", id.to_string()),
                ("limit", "1".to_string()),
                ("fields", DETAIL_FIELDS.join(",")),
            ])
            .await?;

        match data.results.first() {
            Some(track) => Ok(map_track_detail(track)),
            None => Err(ApiError::track_not_found()),
        }
    }
}
