//! Domain types for wind conditions and forecast entries.

use serde::{Deserialize, Serialize};

/// A single observation of current wind conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
  /// When the provider observed these conditions, epoch seconds
  pub observed_at: i64,
  pub wind_speed_mph: f64,
  /// Bearing the wind blows from, degrees clockwise from north
  pub wind_direction_deg: f64,
}

/// One step of the hourly forecast (the provider serves 3-hourly steps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastHour {
  /// Forecast validity time, epoch seconds
  pub forecast_at: i64,
  pub wind_speed_mph: f64,
  pub wind_direction_deg: f64,
  pub temperature_c: f64,
}

/// The conditions result handed to the UI: always some data, plus provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsReport {
  pub conditions: CurrentConditions,
  /// When the data was obtained, epoch milliseconds
  pub as_of: i64,
  /// Human-readable reason whenever the data is not freshly fetched
  pub notice: Option<String>,
  /// True whenever the data is not the product of a fetch made in this call
  pub degraded: bool,
}

/// Placeholder conditions shown when neither live nor cached data exists.
pub fn default_conditions(now_secs: i64) -> CurrentConditions {
  CurrentConditions {
    observed_at: now_secs,
    wind_speed_mph: 9.8,
    wind_direction_deg: 205.0, // SSW, the prevailing wind
  }
}

/// Placeholder forecast trio anchored to the current hour boundary.
pub fn default_forecast(now_secs: i64) -> Vec<ForecastHour> {
  let start_of_hour = now_secs - now_secs.rem_euclid(3600);
  let entry = |offset_hours: i64, speed: f64, deg: f64, temp: f64| ForecastHour {
    forecast_at: start_of_hour + offset_hours * 3600,
    wind_speed_mph: speed,
    wind_direction_deg: deg,
    temperature_c: temp,
  };
  vec![
    entry(1, 10.0, 205.0, 7.0),
    entry(2, 9.0, 205.0, 7.0),
    entry(3, 9.0, 210.0, 6.0),
  ]
}

const CARDINALS: [&str; 16] = [
  "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
  "NNW",
];

/// 16-point compass label for a bearing.
///
/// Callers normalize arbitrary input to [0, 360) first.
pub fn cardinal_label(deg: f64) -> &'static str {
  let index = (deg / 22.5).round() as usize % 16;
  CARDINALS[index]
}
