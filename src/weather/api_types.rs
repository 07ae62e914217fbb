//! Wire types for the OpenWeatherMap API and normalization into domain types.
//!
//! Requests use `units=metric`, so wind arrives in m/s and temperature in
//! degrees Celsius. Wind speeds are converted to mph at this boundary.

use serde::Deserialize;

use super::types::{CurrentConditions, ForecastHour};

/// mph per m/s
const MPS_TO_MPH: f64 = 2.23694;

#[derive(Debug, Deserialize)]
pub struct ApiWind {
  /// Wind speed in m/s
  pub speed: f64,
  /// Bearing the wind blows from, degrees
  #[serde(default)]
  pub deg: f64,
}

/// Response body of the `/weather` endpoint, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub struct ApiCurrentResponse {
  pub dt: i64,
  pub wind: ApiWind,
}

#[derive(Debug, Deserialize)]
pub struct ApiMain {
  /// Temperature in degrees Celsius
  pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApiForecastEntry {
  pub dt: i64,
  pub wind: ApiWind,
  pub main: ApiMain,
}

/// Response body of the `/forecast` endpoint (3-hourly steps).
#[derive(Debug, Deserialize)]
pub struct ApiForecastResponse {
  pub list: Vec<ApiForecastEntry>,
}

impl ApiCurrentResponse {
  pub fn into_conditions(self) -> CurrentConditions {
    CurrentConditions {
      observed_at: self.dt,
      wind_speed_mph: self.wind.speed * MPS_TO_MPH,
      wind_direction_deg: self.wind.deg,
    }
  }
}

impl ApiForecastEntry {
  pub fn into_hour(self) -> ForecastHour {
    ForecastHour {
      forecast_at: self.dt,
      wind_speed_mph: self.wind.speed * MPS_TO_MPH,
      wind_direction_deg: self.wind.deg,
      temperature_c: self.main.temp,
    }
  }
}
