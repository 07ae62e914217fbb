//! OpenWeatherMap HTTP client behind the `WeatherApi` port.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::api_types::{ApiCurrentResponse, ApiForecastResponse};
use super::types::{CurrentConditions, ForecastHour};

/// Hard bound on any provider call. Exceeding it counts as a network failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Provider fetch errors. The policies convert every one of these into a
/// degraded result; none of them reach the UI as a hard failure.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request timed out")]
  Timeout,

  #[error("invalid API key")]
  InvalidApiKey,

  #[error("no API key configured")]
  MissingApiKey,

  #[error("request failed: {0}")]
  Http(String),

  #[error("malformed response: {0}")]
  Parse(String),
}

/// The fixed location the app reports on.
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
  pub latitude: f64,
  pub longitude: f64,
}

/// HTTP port for the weather provider, injected into the fetch policies so
/// tests can substitute a deterministic fake.
#[async_trait]
pub trait WeatherApi: Send + Sync {
  /// Fetch current wind conditions for the configured location.
  async fn current_conditions(&self) -> Result<CurrentConditions, FetchError>;

  /// Fetch the hourly forecast series for the configured location.
  async fn hourly_forecast(&self) -> Result<Vec<ForecastHour>, FetchError>;
}

/// OpenWeatherMap client.
pub struct OwmClient {
  http: reqwest::Client,
  base_url: String,
  api_key: Option<String>,
  location: Coordinates,
  timeout: Duration,
}

impl OwmClient {
  pub fn new(base_url: String, api_key: Option<String>, location: Coordinates) -> Self {
    Self {
      http: reqwest::Client::new(),
      base_url,
      api_key,
      location,
      timeout: REQUEST_TIMEOUT,
    }
  }

  /// Override the request timeout.
  #[allow(dead_code)]
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  fn endpoint_url(&self, endpoint: &str, api_key: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint))
      .map_err(|e| FetchError::Http(format!("invalid provider URL: {e}")))?;
    url
      .query_pairs_mut()
      .append_pair("lat", &self.location.latitude.to_string())
      .append_pair("lon", &self.location.longitude.to_string())
      .append_pair("appid", api_key)
      .append_pair("units", "metric");
    Ok(url)
  }

  async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
    let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
    let url = self.endpoint_url(endpoint, api_key)?;

    debug!(endpoint, "Fetching from weather provider");

    // The timeout races the whole request; a late response is simply dropped.
    let request = async {
      let response = self
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))?;

      let status = response.status();
      if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(FetchError::InvalidApiKey);
      }
      if !status.is_success() {
        return Err(FetchError::Http(format!("HTTP {status}")));
      }

      response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
    };

    tokio::time::timeout(self.timeout, request)
      .await
      .map_err(|_| FetchError::Timeout)?
  }
}

#[async_trait]
impl WeatherApi for OwmClient {
  async fn current_conditions(&self) -> Result<CurrentConditions, FetchError> {
    let response: ApiCurrentResponse = self.get_json("weather").await?;
    Ok(response.into_conditions())
  }

  async fn hourly_forecast(&self) -> Result<Vec<ForecastHour>, FetchError> {
    let response: ApiForecastResponse = self.get_json("forecast").await?;
    Ok(response.list.into_iter().map(|e| e.into_hour()).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  const LOCATION: Coordinates = Coordinates {
    latitude: 52.2627,
    longitude: -1.5217,
  };

  fn client(server: &MockServer) -> OwmClient {
    OwmClient::new(server.uri(), Some("test-key".to_string()), LOCATION)
  }

  #[tokio::test]
  async fn current_conditions_parses_and_converts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/weather"))
      .and(query_param("appid", "test-key"))
      .and(query_param("units", "metric"))
      .respond_with(ResponseTemplate::new(200).set_body_raw(
        r#"{"dt": 1700000000, "wind": {"speed": 5.0, "deg": 200.0}}"#,
        "application/json",
      ))
      .mount(&server)
      .await;

    let conditions = client(&server)
      .current_conditions()
      .await
      .expect("fetch succeeds");
    assert!((conditions.wind_speed_mph - 11.1847).abs() < 1e-9);
    assert_eq!(conditions.wind_direction_deg, 200.0);
  }

  #[tokio::test]
  async fn unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/weather"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&server)
      .await;

    let err = client(&server)
      .current_conditions()
      .await
      .expect_err("fetch fails");
    assert!(matches!(err, FetchError::InvalidApiKey));
  }

  #[tokio::test]
  async fn server_error_maps_to_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/forecast"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let err = client(&server)
      .hourly_forecast()
      .await
      .expect_err("fetch fails");
    assert!(matches!(err, FetchError::Http(_)));
  }

  #[tokio::test]
  async fn malformed_body_maps_to_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/weather"))
      .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
      .mount(&server)
      .await;

    let err = client(&server)
      .current_conditions()
      .await
      .expect_err("fetch fails");
    assert!(matches!(err, FetchError::Parse(_)));
  }

  #[tokio::test]
  async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/weather"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_delay(Duration::from_millis(500))
          .set_body_raw(r#"{"dt": 0, "wind": {"speed": 0.0}}"#, "application/json"),
      )
      .mount(&server)
      .await;

    let err = client(&server)
      .with_timeout(Duration::from_millis(50))
      .current_conditions()
      .await
      .expect_err("fetch fails");
    assert!(matches!(err, FetchError::Timeout));
  }

  #[tokio::test]
  async fn missing_api_key_fails_without_a_request() {
    let server = MockServer::start().await;
    let client = OwmClient::new(server.uri(), None, LOCATION);

    let err = client
      .current_conditions()
      .await
      .expect_err("fetch fails");
    assert!(matches!(err, FetchError::MissingApiKey));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
  }
}
