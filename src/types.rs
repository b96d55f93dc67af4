use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Header block of every Jamendo response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JamendoHeaders {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub warnings: Option<String>,
    #[serde(default)]
    pub results_count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JamendoTracksResponse {
    #[serde(default)]
    pub headers: Option<JamendoHeaders>,
    #[serde(default)]
    pub results: Vec<JamendoTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JamendoTrack {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub album_image: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub releasedate: Option<String>,
    #[serde(default)]
    pub license_ccurl: Option<String>,
    #[serde(default)]
    pub shareurl: Option<String>,
}

/// Error body Jamendo (or a proxy in front of it) may return on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JamendoErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub headers: Option<JamendoHeaders>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub audio_url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDetail {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub audio_url: String,
    pub image_url: Option<String>,
    pub duration_seconds: u64,
    pub album_name: Option<String>,
    pub release_date_iso: Option<String>,
    pub license_url: Option<String>,
    pub share_url: Option<String>,
}

impl TrackDetail {
    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            artist_name: self.artist_name.clone(),
            audio_url: self.audio_url.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// One page of search results as returned by the catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracksPage {
    pub items: Vec<TrackSummary>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
    pub count: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct DetailTableRow {
    pub field: String,
    pub value: String,
}
