//! Integration tests for BackendClient and the backend-flavoured clients
//! using wiremock.
//!
//! These tests verify behavior against a mock weather backend mounted at
//! `/api/weather`.

use std::sync::Arc;
use std::time::Duration;

use skycast_core::StorageError;
use skycast_services::{BackendClient, HistoryClient, HistoryEntry, HistoryError, WeatherSource};
use skycast_weather::WeatherError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a weather day as the backend sends it
fn test_day(city: Option<&str>, date: &str, temp: i64) -> serde_json::Value {
    let mut day = serde_json::json!({
        "date": date,
        "icon": "04d",
        "iconDescription": "broken clouds",
        "tempF": temp,
        "windSpeed": 9,
        "humidity": 61
    });
    if let Some(city) = city {
        day["city"] = serde_json::json!(city);
    }
    day
}

fn client(server: &MockServer) -> Arc<BackendClient> {
    Arc::new(
        BackendClient::new(&format!("{}/api/weather", server.uri()), Duration::from_secs(5))
            .unwrap(),
    )
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/weather/"))
        .and(body_json(serde_json::json!({ "cityName": "Denver" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            test_day(Some("Denver"), "3/1/2025", 41),
            test_day(None, "3/2/2025", 44),
            test_day(None, "3/3/2025", 39),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = WeatherSource::Backend(client(&mock_server));
    let days = source.fetch_weather(" Denver ").await.unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].city.as_deref(), Some("Denver"));
    assert_eq!(days[0].temp_f, 41);
    assert!(days[1].city.is_none());
    assert_eq!(days[2].date, "3/3/2025");
}

#[tokio::test]
async fn test_fetch_weather_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/weather/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "City not found"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_weather("Nowhere").await.unwrap_err();

    assert!(matches!(err, WeatherError::Lookup { status: Some(404), .. }));
    let msg = err.to_string();
    assert!(msg.contains("Nowhere"), "Error should name the city: {}", msg);
}

#[tokio::test]
async fn test_fetch_weather_empty_array_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/weather/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_weather("Denver").await.unwrap_err();
    assert!(matches!(err, WeatherError::Lookup { .. }));
}

#[tokio::test]
async fn test_fetch_weather_blank_city_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_weather("   ").await.unwrap_err();
    assert!(matches!(err, WeatherError::EmptyCity));
}

#[tokio::test]
async fn test_list_history_most_recent_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "a1", "name": "Austin" },
            { "id": "b2", "name": "Boston" },
        ])))
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let entries = history.list().await.unwrap();

    assert_eq!(
        entries,
        vec![HistoryEntry::new("b2", "Boston"), HistoryEntry::new("a1", "Austin")]
    );
}

#[tokio::test]
async fn test_list_history_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).list_history().await.unwrap_err();
    assert!(matches!(err, HistoryError::Backend { status: Some(500), .. }));
}

#[tokio::test]
async fn test_add_only_refreshes_backend_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": 7, "name": "Denver" },
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Any write would hit an unmocked route and fail the request
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let entries = history.add("Denver").await.unwrap();
    assert_eq!(entries, vec![HistoryEntry::new("7", "Denver")]);
}

#[tokio::test]
async fn test_remove_deletes_then_refreshes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/weather/history/a1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "b2", "name": "Boston" },
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let entries = history.remove("a1").await.unwrap();
    assert_eq!(entries, vec![HistoryEntry::new("b2", "Boston")]);
}

#[tokio::test]
async fn test_remove_unknown_id_is_noop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/weather/history/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "b2", "name": "Boston" },
        ])))
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let entries = history.remove("missing").await.unwrap();
    assert_eq!(entries, vec![HistoryEntry::new("b2", "Boston")]);
}

#[tokio::test]
async fn test_remove_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/weather/history/a1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let err = history.remove("a1").await.unwrap_err();
    assert!(matches!(err, HistoryError::Storage(StorageError::DeleteFailed(_))));
    assert!(err.to_string().contains("Failed to delete city from history"));
}

#[tokio::test]
async fn test_remove_succeeds_when_reread_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/weather/history/a1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let entries = history.remove("a1").await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_add_reread_failure_yields_empty_history() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/weather/history"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let history = HistoryClient::backend(client(&mock_server));
    let entries = history.add("Denver").await.unwrap();
    assert!(entries.is_empty());
}
