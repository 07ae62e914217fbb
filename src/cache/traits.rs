//! Core types for the weather cache.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The two record kinds the cache holds, each under its own key with its own
/// freshness budget. Records are overwritten in place, never appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
  /// Latest observed wind conditions
  CurrentConditions,
  /// Hourly forecast series
  HourlyForecast,
}

impl CacheKind {
  /// Storage key for this kind.
  pub fn key(self) -> &'static str {
    match self {
      Self::CurrentConditions => "current_conditions",
      Self::HourlyForecast => "hourly_forecast",
    }
  }

  /// How old a record of this kind may get before it is eligible for refresh.
  pub fn freshness_budget(self) -> Duration {
    match self {
      Self::CurrentConditions => Duration::minutes(30),
      Self::HourlyForecast => Duration::minutes(60),
    }
  }
}

/// A timestamped cache record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRecord<T> {
  /// The cached payload
  pub data: T,
  /// When the payload was fetched, epoch milliseconds
  pub fetched_at: i64,
}

impl<T> CachedRecord<T> {
  pub fn new(data: T, fetched_at: i64) -> Self {
    Self { data, fetched_at }
  }

  /// Whether the record is still within its freshness budget at `now_millis`.
  pub fn is_fresh(&self, budget: Duration, now_millis: i64) -> bool {
    now_millis - self.fetched_at < budget.num_milliseconds()
  }
}
