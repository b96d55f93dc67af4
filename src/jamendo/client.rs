use std::time::Duration;

use reqwest::Client;

use crate::{
    config,
    jamendo::error::{ApiError, ApiErrorCode},
    types::JamendoTracksResponse,
};

/// HTTP client for the Jamendo v3 API.
///
/// Holds one pooled `reqwest::Client` with the configured timeout and adds
/// the `format` and `client_id` parameters to every request.
#[derive(Debug, Clone)]
pub struct JamendoClient {
    http: Client,
    base_url: String,
    client_id: Option<String>,
}

impl JamendoClient {
    pub fn new(
        base_url: impl Into<String>,
        client_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::new(ApiErrorCode::Unknown, e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id,
        })
    }

    /// Builds a client from `JAMENDO_API_URL`, `JAMENDO_CLIENT_ID` and
    /// `JAMENDO_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(
            config::jamendo_api_url(),
            config::jamendo_client_id(),
            config::request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_client_id(&self) -> bool {
        self.client_id.is_some()
    }

    /// Issues `GET /tracks` with the given parameters and classifies every
    /// failure into the error taxonomy.
    ///
    /// `format=json` and the client id, when configured, are added ahead of
    /// `params`.
    ///
    /// # Arguments
    ///
    /// * `params` - Query parameters specific to the call
    ///
    /// # Returns
    ///
    /// The decoded response, including its `headers` block.
    ///
    /// # Errors
    ///
    /// * Transport failures and undecodable bodies map through `From<reqwest::Error>`
    /// * Non-2xx statuses map through `ApiError::from_response_body`
    /// * A 200 response whose headers report `status: failed` becomes
    ///   `ApiErrorCode::Unknown` carrying Jamendo's message and code
    pub(crate) async fn get_tracks(
        &self,
        params: &[(&str, String)],
    ) -> Result<JamendoTracksResponse, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("format", "json".to_string())];
        if let Some(client_id) = &self.client_id {
            query.push(("client_id", client_id.clone()));
        }
        query.extend(params.iter().cloned());

        let api_url = format!("{uri}/tracks", uri = self.base_url);
        let response = self.http.get(&api_url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response_body(status, &body));
        }

        let data = response.json::<JamendoTracksResponse>().await?;

        // Jamendo reports some failures in-band with a 200 status.
        if let Some(headers) = &data.headers {
            if headers.status.as_deref() == Some("failed") {
                let message = headers
                    .error_message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| {
                        "Something went wrong while communicating with Jamendo.".to_string()
                    });
                let err = ApiError::new(ApiErrorCode::Unknown, message);
                return Err(match headers.code {
                    Some(code) => err.with_details(format!("jamendo code {}", code)),
                    None => err,
                });
            }
        }

        Ok(data)
    }
}
