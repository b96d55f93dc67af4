use std::time::Duration;

use jamsearch::{
    jamendo::{
        ApiError, ApiErrorCode, CatalogApi, JamendoClient, LIST_FIELDS, LIST_ORDER,
        page_from_results,
    },
    tracks::messages::ledger_message,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client(server: &MockServer) -> JamendoClient {
    JamendoClient::new(
        format!("{}/", server.uri()),
        Some("test-client".to_string()),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn results(count: u64, tracks: serde_json::Value) -> serde_json::Value {
    json!({
        "headers": {
            "status": "success",
            "code": 0,
            "error_message": "",
            "warnings": "",
            "results_count": count
        },
        "results": tracks
    })
}

async fn respond_with(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/tracks"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_maps_tracks_and_sends_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks"))
        .and(query_param("format", "json"))
        .and(query_param("client_id", "test-client"))
        .and(query_param("namesearch", "piano"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "4"))
        .and(query_param("order", LIST_ORDER))
        .and(query_param("fields", LIST_FIELDS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(
            2,
            json!([
                {
                    "id": "1",
                    "name": "Nocturne",
                    "artist_name": "Ana",
                    "audio": "https://cdn.example.com/1.mp3",
                    "image": "",
                    "album_image": "https://img.example.com/album.jpg"
                },
                {
                    "id": "2",
                    "name": "Etude",
                    "artist_name": "Ben",
                    "audio": "https://cdn.example.com/2.mp3",
                    "image": "https://img.example.com/2.jpg"
                }
            ]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server).search_tracks("piano", 2, 4).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].name, "Nocturne");
    assert_eq!(
        page.items[0].image_url.as_deref(),
        Some("https://img.example.com/album.jpg")
    );
    assert_eq!(
        page.items[1].image_url.as_deref(),
        Some("https://img.example.com/2.jpg")
    );
    assert!(page.has_more);
    assert_eq!(page.next_offset, Some(6));
}

#[tokio::test]
async fn test_short_page_has_no_more() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(results(
            1,
            json!([{ "id": "1", "name": "Solo", "artist_name": "Ana", "audio": "" }]),
        )),
    )
    .await;

    let page = client(&server).search_tracks("piano", 20, 0).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].image_url, None);
    assert!(!page.has_more);
    assert_eq!(page.next_offset, None);
}

#[tokio::test]
async fn test_zero_limit_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).search_tracks("piano", 0, 0).await.unwrap_err();
    assert_eq!(err.code, ApiErrorCode::Unknown);
}

#[tokio::test]
async fn test_detail_maps_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks"))
        .and(query_param("id", "42"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(
            1,
            json!([{
                "id": "42",
                "name": "Answer",
                "artist_name": "Deep",
                "audio": "https://cdn.example.com/42.mp3",
                "image": "https://img.example.com/42.jpg",
                "duration": 215,
                "album_name": "Thought",
                "releasedate": "2010-05-14",
                "license_ccurl": "http://creativecommons.org/licenses/by/3.0/",
                "shareurl": "https://www.jamendo.com/track/42"
            }]),
        )))
        .mount(&server)
        .await;

    let detail = client(&server).fetch_track_detail("42").await.unwrap();
    assert_eq!(detail.id, "42");
    assert_eq!(detail.duration_seconds, 215);
    assert_eq!(detail.album_name.as_deref(), Some("Thought"));
    assert_eq!(detail.release_date_iso.as_deref(), Some("2010-05-14"));
    assert_eq!(
        detail.share_url.as_deref(),
        Some("https://www.jamendo.com/track/42")
    );
}

#[tokio::test]
async fn test_detail_without_results_is_not_found() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(results(0, json!([]))),
    )
    .await;

    let err = client(&server).fetch_track_detail("missing").await.unwrap_err();
    assert_eq!(err, ApiError::track_not_found());
}

async fn search_error(status: u16, body: serde_json::Value) -> ApiError {
    let server = MockServer::start().await;
    respond_with(&server, ResponseTemplate::new(status).set_body_json(body)).await;
    client(&server)
        .search_tracks("piano", 20, 0)
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_http_statuses_are_classified() {
    let cases = [
        (429, ApiErrorCode::RateLimited),
        (401, ApiErrorCode::Unauthorized),
        (403, ApiErrorCode::Forbidden),
        (404, ApiErrorCode::NotFound),
        (500, ApiErrorCode::ServerError),
        (503, ApiErrorCode::ServerError),
    ];

    for (status, code) in cases {
        let err = search_error(status, json!({})).await;
        assert_eq!(err.code, code, "status {}", status);
        assert_eq!(err.status, Some(status));
    }
}

#[tokio::test]
async fn test_unclassified_status_keeps_upstream_message() {
    let err = search_error(418, json!({ "message": "I'm a teapot" })).await;
    assert_eq!(err.code, ApiErrorCode::Unknown);
    assert_eq!(err.message, "I'm a teapot");
    assert_eq!(ledger_message(&err), "I'm a teapot");

    let err = search_error(418, json!({})).await;
    assert_eq!(
        err.message,
        "Something went wrong while communicating with Jamendo."
    );
}

#[tokio::test]
async fn test_in_band_failure_is_unknown() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "headers": {
                "status": "failed",
                "code": 5,
                "error_message": "Invalid client id"
            },
            "results": []
        })),
    )
    .await;

    let err = client(&server).search_tracks("piano", 20, 0).await.unwrap_err();
    assert_eq!(err.code, ApiErrorCode::Unknown);
    assert_eq!(err.message, "Invalid client id");
    assert_eq!(err.details.as_deref(), Some("jamendo code 5"));
}

#[tokio::test]
async fn test_malformed_body_is_unknown() {
    let server = MockServer::start().await;
    respond_with(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

    let err = client(&server).search_tracks("piano", 20, 0).await.unwrap_err();
    assert_eq!(err.code, ApiErrorCode::Unknown);
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(results(0, json!([])))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    let client = JamendoClient::new(server.uri(), None, Duration::from_millis(50)).unwrap();
    let err = client.search_tracks("piano", 20, 0).await.unwrap_err();
    assert_eq!(err.code, ApiErrorCode::Timeout);
    assert_eq!(
        ledger_message(&err),
        "The request timed out. Please try again."
    );
}

#[tokio::test]
async fn test_unreachable_host_is_offline() {
    let client = JamendoClient::new("http://127.0.0.1:1", None, Duration::from_secs(2)).unwrap();

    let err = client.search_tracks("piano", 20, 0).await.unwrap_err();
    assert_eq!(err.code, ApiErrorCode::Offline);
}

#[test]
fn test_ledger_messages() {
    let message = |code| ledger_message(&ApiError::new(code, "raw"));

    assert_eq!(
        message(ApiErrorCode::RateLimited),
        "We're hitting Jamendo's rate limit. Please retry in a moment."
    );
    assert_eq!(
        message(ApiErrorCode::Unauthorized),
        message(ApiErrorCode::Forbidden)
    );
    assert_eq!(
        message(ApiErrorCode::NotFound),
        "We couldn't find that track."
    );
    assert_eq!(
        message(ApiErrorCode::ServerError),
        "Jamendo is unavailable right now. Please try later."
    );
    assert_eq!(message(ApiErrorCode::Unknown), "raw");
    assert_eq!(
        ledger_message(&ApiError::new(ApiErrorCode::Unknown, "  ")),
        "Something went wrong."
    );
}

#[test]
fn test_error_display_names_code() {
    let err = ApiError::new(ApiErrorCode::RateLimited, "slow down").with_status(429);
    assert_eq!(err.to_string(), "RATE_LIMITED (429): slow down");
    assert_eq!(ApiErrorCode::ServerError.to_string(), "SERVER_ERROR");
}

#[test]
fn test_page_hints_follow_result_count() {
    // An exactly full page still advertises a next page
    let full = page_from_results(Vec::new(), Some(20), 20, 20);
    assert!(full.has_more);
    assert_eq!(full.next_offset, Some(40));
    assert_eq!(full.count, 20);

    // Without a reported count the item count is used
    let empty = page_from_results(Vec::new(), None, 20, 0);
    assert_eq!(empty.count, 0);
    assert!(!empty.has_more);
    assert_eq!(empty.next_offset, None);
}
