use std::fmt;

use reqwest::StatusCode;

use crate::types::JamendoErrorBody;

/// Closed set of failure categories the catalog client can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    Offline,
    Timeout,
    RateLimited,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    Unknown,
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorCode::Offline => "OFFLINE",
            ApiErrorCode::Timeout => "TIMEOUT",
            ApiErrorCode::RateLimited => "RATE_LIMITED",
            ApiErrorCode::Unauthorized => "UNAUTHORIZED",
            ApiErrorCode::Forbidden => "FORBIDDEN",
            ApiErrorCode::NotFound => "NOT_FOUND",
            ApiErrorCode::ServerError => "SERVER_ERROR",
            ApiErrorCode::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// Error returned by every catalog call. Raw transport errors never leave
/// the client; they are classified into an [`ApiErrorCode`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub status: Option<u16>,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn track_not_found() -> Self {
        ApiError::new(ApiErrorCode::NotFound, "Track not found.")
    }

    /// Classifies an HTTP error response.
    ///
    /// `upstream` is the message Jamendo put into the body, if any. It is only
    /// surfaced for statuses that have no dedicated category.
    pub fn from_status(status: StatusCode, upstream: Option<String>) -> Self {
        let code = status.as_u16();
        let err = match code {
            429 => ApiError::new(
                ApiErrorCode::RateLimited,
                "Jamendo rate limit reached. Please wait a moment and retry.",
            ),
            401 => ApiError::new(
                ApiErrorCode::Unauthorized,
                "Jamendo credentials are invalid or missing.",
            ),
            403 => ApiError::new(
                ApiErrorCode::Forbidden,
                "You do not have access to this resource.",
            ),
            404 => ApiError::new(
                ApiErrorCode::NotFound,
                "We could not find what you were looking for.",
            ),
            c if c >= 500 => ApiError::new(
                ApiErrorCode::ServerError,
                "Jamendo is currently unavailable. Please try again later.",
            ),
            _ => ApiError::new(
                ApiErrorCode::Unknown,
                upstream.clone().unwrap_or_else(|| {
                    "Something went wrong while communicating with Jamendo.".to_string()
                }),
            ),
        };

        match upstream {
            Some(details) => err.with_status(code).with_details(details),
            None => err.with_status(code),
        }
    }

    /// Classifies an HTTP error response from its raw body.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let upstream = serde_json::from_str::<JamendoErrorBody>(body)
            .ok()
            .and_then(|b| {
                b.message
                    .or(b.error_message)
                    .or(b.headers.and_then(|h| h.error_message))
            })
            .filter(|m| !m.trim().is_empty());
        Self::from_status(status, upstream)
    }

    /// Classifies a transport-level failure.
    ///
    /// A timeout wins over everything else. An error that carries no HTTP
    /// status never received a response and counts as offline, except for
    /// body decoding problems which are reported as unknown.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::new(
                ApiErrorCode::Timeout,
                "The request took too long. Please check your connection and try again.",
            )
            .with_details(err.to_string());
        }

        if let Some(status) = err.status() {
            return Self::from_status(status, None);
        }

        if err.is_decode() || err.is_body() {
            return ApiError::new(ApiErrorCode::Unknown, err.to_string());
        }

        ApiError::new(
            ApiErrorCode::Offline,
            "No internet connection. Showing cached data when available.",
        )
        .with_details(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({}): {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::from_transport(&err)
    }
}
