#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use jamsearch::{
    jamendo::{ApiError, CatalogApi, page_from_results},
    types::{TrackDetail, TrackSummary, TracksPage},
};
use tokio::sync::Notify;

pub fn track(id: &str) -> TrackSummary {
    TrackSummary {
        id: id.to_string(),
        name: format!("Track {}", id),
        artist_name: format!("Artist {}", id),
        audio_url: format!("https://cdn.example.com/{}.mp3", id),
        image_url: None,
    }
}

pub fn tracks(ids: &[&str]) -> Vec<TrackSummary> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn numbered(from: usize, to: usize) -> Vec<TrackSummary> {
    (from..to).map(|i| track(&i.to_string())).collect()
}

/// A page whose server-reported count equals the number of items.
pub fn page(items: Vec<TrackSummary>, limit: u32, offset: u32) -> TracksPage {
    let count = items.len() as u64;
    page_from_results(items, Some(count), limit, offset)
}

pub fn detail(id: &str) -> TrackDetail {
    TrackDetail {
        id: id.to_string(),
        name: format!("Track {}", id),
        artist_name: format!("Artist {}", id),
        audio_url: format!("https://cdn.example.com/{}.mp3", id),
        image_url: Some(format!("https://img.example.com/{}.jpg", id)),
        duration_seconds: 215,
        album_name: Some("Album".to_string()),
        release_date_iso: Some("2010-05-14".to_string()),
        license_url: None,
        share_url: Some(format!("https://www.jamendo.com/track/{}", id)),
    }
}

/// Scripted catalog. Unscripted searches return an empty page, unscripted
/// details fail with `NotFound`. With a gate set, every call waits for one
/// notification before answering.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Mutex<HashMap<(String, u32), Result<TracksPage, ApiError>>>,
    details: Mutex<HashMap<String, Result<TrackDetail, ApiError>>>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_page(&self, query: &str, offset: u32, result: Result<TracksPage, ApiError>) {
        self.pages
            .lock()
            .unwrap()
            .insert((query.to_string(), offset), result);
    }

    pub fn set_detail(&self, id: &str, result: Result<TrackDetail, ApiError>) {
        self.details.lock().unwrap().insert(id.to_string(), result);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

impl CatalogApi for FakeCatalog {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<TracksPage, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let scripted = self
            .pages
            .lock()
            .unwrap()
            .get(&(query.to_string(), offset))
            .cloned();
        scripted.unwrap_or_else(|| Ok(page_from_results(Vec::new(), None, limit, offset)))
    }

    async fn fetch_track_detail(&self, id: &str) -> Result<TrackDetail, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let scripted = self.details.lock().unwrap().get(id).cloned();
        scripted.unwrap_or_else(|| Err(ApiError::track_not_found()))
    }
}
