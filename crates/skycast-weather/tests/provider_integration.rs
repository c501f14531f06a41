//! Integration tests for WeatherProvider using wiremock.

use std::time::Duration;

use skycast_weather::{WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider response with `count` samples, 3 hours apart from 2024-06-01T00:00Z
fn forecast_body(city: &str, count: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "dt": 1_717_200_000_i64 + (i as i64) * 10_800,
                "main": { "temp": 60.4 + i as f64, "humidity": 50 + i, "pressure": 1012 },
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
                "wind": { "speed": 5.6, "deg": 180 }
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": count,
        "list": list,
        "city": { "name": city, "country": "FR", "timezone": 7200 }
    })
}

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(&server.uri(), "test-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Paris", 40)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let days = provider(&mock_server).fetch_weather("Paris").await.unwrap();

    assert_eq!(days.len(), 5);
    assert_eq!(days[0].city.as_deref(), Some("Paris"));
    assert_eq!(days[0].temp_f, 60);
    assert_eq!(days[0].wind_speed, 6);
    assert_eq!(days[0].humidity, 50);
    assert_eq!(days[0].icon, "01d");
    assert_eq!(days[0].icon_description, "clear sky");
    // Forecast days come from samples 7, 15, 23, 31
    let humidities: Vec<i64> = days[1..].iter().map(|d| d.humidity).collect();
    assert_eq!(humidities, vec![57, 65, 73, 81]);
}

#[tokio::test]
async fn test_fetch_weather_trims_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("New York", 8)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let days = provider(&mock_server).fetch_weather("  New York ").await.unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].city.as_deref(), Some("New York"));
}

#[tokio::test]
async fn test_city_tag_comes_from_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("London", 40)))
        .mount(&mock_server)
        .await;

    let days = provider(&mock_server).fetch_weather("london").await.unwrap();
    assert_eq!(days[0].city.as_deref(), Some("London"));
}

#[tokio::test]
async fn test_fetch_weather_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch_weather("Atlantis").await.unwrap_err();

    match err {
        WeatherError::Lookup { city, status, .. } => {
            assert_eq!(city, "Atlantis");
            assert_eq!(status, Some(404));
        }
        other => panic!("expected lookup error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_weather_unparseable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Lookup { status: None, .. }));
    assert!(err.to_string().contains("Paris"));
}

#[tokio::test]
async fn test_fetch_weather_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Paris", 0)))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch_weather("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Lookup { .. }));
}

#[tokio::test]
async fn test_blank_city_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Paris", 40)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).fetch_weather("").await.unwrap_err();
    assert!(matches!(err, WeatherError::EmptyCity));
}
