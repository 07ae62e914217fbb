//! The fetch policies: decide per call whether to serve cache, fetch live,
//! or degrade to stale/default data.
//!
//! Both policies are pure over their injected ports (cache storage, provider
//! client, clock) and never fail: the caller always receives some data, with
//! degradation signalled on the conditions report.

use chrono::{DateTime, FixedOffset, Local};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{CacheKind, CacheStorage, CachedRecord, SqliteStorage};
use crate::course;

use super::client::{OwmClient, WeatherApi};
use super::types::{
  default_conditions, default_forecast, ConditionsReport, CurrentConditions, ForecastHour,
};

const COURSE_CLOSED_NOTICE: &str = "The course is now closed. Updates will resume at 7am.";
const NO_LIVE_DATA_NOTICE: &str = "Could not fetch live data. Showing placeholder information.";

/// Clock port, injected so the policies are testable without real time.
pub trait Clock: Send + Sync {
  /// Current time with the local offset, so the wall-clock hour is readable.
  fn now(&self) -> DateTime<FixedOffset>;
}

/// Clock backed by the system's local time.
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
  }
}

/// The service the app runs against.
pub type CourseWeatherService = WindService<SqliteStorage, OwmClient, SystemClock>;

/// Fetch policies over injected storage, provider and clock ports.
pub struct WindService<S, A, C> {
  storage: Arc<S>,
  api: A,
  clock: C,
}

impl<S: CacheStorage, A: WeatherApi, C: Clock> WindService<S, A, C> {
  pub fn new(storage: S, api: A, clock: C) -> Self {
    Self {
      storage: Arc::new(storage),
      api,
      clock,
    }
  }

  /// Current conditions: fresh cache, else live fetch, else stale/default
  /// data. Outside opening hours no fetch is attempted at all.
  pub async fn current_conditions(&self) -> ConditionsReport {
    let now = self.clock.now();
    let now_millis = now.timestamp_millis();
    let cached = self.load::<CurrentConditions>(CacheKind::CurrentConditions);

    // Policy gate, independent of cache freshness
    if !course::within_opening_hours(&now) {
      info!("Outside opening hours, serving without a live fetch");
      return match cached {
        Some(record) => degraded_report(record, COURSE_CLOSED_NOTICE.to_string()),
        None => ConditionsReport {
          conditions: default_conditions(now.timestamp()),
          as_of: now_millis,
          notice: Some(COURSE_CLOSED_NOTICE.to_string()),
          degraded: true,
        },
      };
    }

    if let Some(record) = &cached {
      if record.is_fresh(CacheKind::CurrentConditions.freshness_budget(), now_millis) {
        debug!("Serving fresh cached current conditions");
        return ConditionsReport {
          conditions: record.data.clone(),
          as_of: record.fetched_at,
          notice: None,
          degraded: false,
        };
      }
    }

    match self.api.current_conditions().await {
      Ok(conditions) => {
        self.save(
          CacheKind::CurrentConditions,
          &CachedRecord::new(conditions.clone(), now_millis),
        );
        info!("Fetched and cached new current conditions");
        ConditionsReport {
          conditions,
          as_of: now_millis,
          notice: None,
          degraded: false,
        }
      }
      Err(err) => {
        warn!(error = %err, "Current conditions fetch failed, degrading");
        match cached {
          Some(record) => degraded_report(
            record,
            format!("Failed to update: {err}. Showing last available data."),
          ),
          None => ConditionsReport {
            conditions: default_conditions(now.timestamp()),
            as_of: now_millis,
            notice: Some(NO_LIVE_DATA_NOTICE.to_string()),
            degraded: true,
          },
        }
      }
    }
  }

  /// Hourly forecast: fresh cache, else live fetch, else stale cache of any
  /// age, else the built-in placeholder trio. No opening-hours gate and no
  /// degradation metadata on the result.
  pub async fn hourly_forecast(&self) -> Vec<ForecastHour> {
    let now = self.clock.now();
    let now_millis = now.timestamp_millis();
    let cached = self.load::<Vec<ForecastHour>>(CacheKind::HourlyForecast);

    if let Some(record) = &cached {
      if record.is_fresh(CacheKind::HourlyForecast.freshness_budget(), now_millis) {
        debug!("Serving fresh cached hourly forecast");
        return record.data.clone();
      }
    }

    match self.api.hourly_forecast().await {
      Ok(mut hours) => {
        hours.sort_by_key(|h| h.forecast_at);
        self.save(
          CacheKind::HourlyForecast,
          &CachedRecord::new(hours.clone(), now_millis),
        );
        info!(entries = hours.len(), "Fetched and cached new hourly forecast");
        hours
      }
      Err(err) => {
        warn!(error = %err, "Hourly forecast fetch failed, degrading");
        match cached {
          Some(record) => record.data,
          None => default_forecast(now.timestamp()),
        }
      }
    }
  }

  /// Storage read; errors and corruption count as a miss, never a failure.
  fn load<T: DeserializeOwned>(&self, kind: CacheKind) -> Option<CachedRecord<T>> {
    match self.storage.load(kind) {
      Ok(record) => record,
      Err(err) => {
        warn!(kind = kind.key(), error = %err, "Cache read failed, treating as miss");
        None
      }
    }
  }

  /// Storage write; a failed write loses nothing but the next cache hit.
  fn save<T: Serialize>(&self, kind: CacheKind, record: &CachedRecord<T>) {
    if let Err(err) = self.storage.save(kind, record) {
      warn!(kind = kind.key(), error = %err, "Cache write failed");
    }
  }
}

fn degraded_report(record: CachedRecord<CurrentConditions>, notice: String) -> ConditionsReport {
  ConditionsReport {
    conditions: record.data,
    as_of: record.fetched_at,
    notice: Some(notice),
    degraded: true,
  }
}
