use crate::jamendo::{ApiError, ApiErrorCode};

pub const OFFLINE_LIST_MESSAGE: &str = "You appear to be offline. Showing cached results.";
pub const OFFLINE_DETAIL_MESSAGE: &str =
    "You appear to be offline. Showing cached details if available.";
pub const OFFLINE_BANNER_MESSAGE: &str = "You are offline. Showing cached results.";

/// Human-readable ledger message for a catalog failure.
pub fn ledger_message(error: &ApiError) -> String {
    match error.code {
        ApiErrorCode::Offline => OFFLINE_LIST_MESSAGE.to_string(),
        ApiErrorCode::Timeout => "The request timed out. Please try again.".to_string(),
        ApiErrorCode::RateLimited => {
            "We're hitting Jamendo's rate limit. Please retry in a moment.".to_string()
        }
        ApiErrorCode::Unauthorized | ApiErrorCode::Forbidden => {
            "Jamendo credentials are invalid. Check your client ID.".to_string()
        }
        ApiErrorCode::NotFound => "We couldn't find that track.".to_string(),
        ApiErrorCode::ServerError => {
            "Jamendo is unavailable right now. Please try later.".to_string()
        }
        ApiErrorCode::Unknown => {
            if error.message.trim().is_empty() {
                "Something went wrong.".to_string()
            } else {
                error.message.clone()
            }
        }
    }
}
