//! Polling tasks that drive the two fetch policies on independent timers.
//!
//! Each poller owns its own task and lifecycle; the policies themselves hold
//! no timer state. The two tasks touch disjoint cache keys, so they need no
//! coordination with each other.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::event::{Event, WeatherEvent};
use crate::weather::CourseWeatherService;

const CONDITIONS_PERIOD: Duration = Duration::from_secs(30 * 60);
const FORECAST_PERIOD: Duration = Duration::from_secs(60 * 60);

/// A polling task. Stops when told to or when dropped.
pub struct Poller {
  handle: JoinHandle<()>,
}

impl Poller {
  /// Poll current conditions immediately, then every 30 minutes.
  pub fn conditions(
    service: Arc<CourseWeatherService>,
    tx: mpsc::UnboundedSender<Event>,
  ) -> Self {
    let handle = tokio::spawn(async move {
      loop {
        let report = service.current_conditions().await;
        if tx.send(Event::Weather(WeatherEvent::Conditions(report))).is_err() {
          break;
        }
        tokio::time::sleep(CONDITIONS_PERIOD).await;
      }
    });

    Self { handle }
  }

  /// Poll the forecast immediately, then align to the next top-of-hour and
  /// repeat hourly from there.
  pub fn forecast(service: Arc<CourseWeatherService>, tx: mpsc::UnboundedSender<Event>) -> Self {
    let handle = tokio::spawn(async move {
      let forecast = service.hourly_forecast().await;
      if tx.send(Event::Weather(WeatherEvent::Forecast(forecast))).is_err() {
        return;
      }

      let wait = seconds_until_next_hour(Utc::now().timestamp());
      tokio::time::sleep(Duration::from_secs(wait)).await;

      loop {
        let forecast = service.hourly_forecast().await;
        if tx.send(Event::Weather(WeatherEvent::Forecast(forecast))).is_err() {
          break;
        }
        tokio::time::sleep(FORECAST_PERIOD).await;
      }
    });

    Self { handle }
  }

  /// Stop the polling task.
  #[allow(dead_code)]
  pub fn stop(&self) {
    self.handle.abort();
  }
}

impl Drop for Poller {
  fn drop(&mut self) {
    self.handle.abort();
  }
}

/// Seconds from the given instant to the next top-of-hour boundary.
fn seconds_until_next_hour(now_secs: i64) -> u64 {
  (3600 - now_secs.rem_euclid(3600)) as u64
}
