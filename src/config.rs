//! Configuration management for the Jamendo track search client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Unlike credentials-heavy APIs, Jamendo only needs a
//! public client id, so every value has a usable default and a missing setting
//! degrades into a warning instead of aborting the program.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://api.jamendo.com/v3.0";
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `jamsearch/.env` inside the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/jamsearch/.env`
/// - macOS: `~/Library/Application Support/jamsearch/.env`
/// - Windows: `%LOCALAPPDATA%/jamsearch/.env`
///
/// A missing file is not an error; values then come from the process
/// environment or the defaults below.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jamsearch/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the Jamendo client id, if configured.
///
/// Read from `JAMENDO_CLIENT_ID`. Requests without a client id are rejected
/// by Jamendo, which surfaces as an `Unauthorized` error in the ledger.
pub fn jamendo_client_id() -> Option<String> {
    env::var("JAMENDO_CLIENT_ID")
        .ok()
        .filter(|id| !id.trim().is_empty())
}

/// Returns the Jamendo API base URL (`JAMENDO_API_URL`).
pub fn jamendo_api_url() -> String {
    env::var("JAMENDO_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the page size used for list requests (`JAMENDO_PAGE_LIMIT`).
///
/// Zero or unparsable values fall back to the default of 20.
pub fn page_limit() -> u32 {
    env::var("JAMENDO_PAGE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_PAGE_LIMIT)
}

/// Returns the HTTP request timeout (`JAMENDO_TIMEOUT_MS`).
pub fn request_timeout() -> Duration {
    let ms = env::var("JAMENDO_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(ms)
}

/// Returns the debounce window for interactive search (`SEARCH_DEBOUNCE_MS`).
pub fn search_debounce() -> Duration {
    let ms = env::var("SEARCH_DEBOUNCE_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_DEBOUNCE_MS);
    Duration::from_millis(ms)
}

/// Returns the directory holding persisted snapshots.
///
/// `JAMSEARCH_DATA_DIR` overrides the default of `jamsearch/` inside the
/// local data directory.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("JAMSEARCH_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jamsearch");
    path
}
