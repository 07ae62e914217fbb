//! Weather data: provider client, wire types, domain types and the fetch
//! policies that mediate between the rate-limited provider and the UI.

mod api_types;
pub mod client;
pub mod service;
pub mod types;

pub use client::{Coordinates, OwmClient};
pub use service::{CourseWeatherService, SystemClock, WindService};
pub use types::{cardinal_label, ConditionsReport, CurrentConditions, ForecastHour};
