//! The forecast panel: the next three future entries in a table.

use chrono::{DateTime, Local, Utc};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use super::direction_arrow;
use crate::weather::{cardinal_label, ForecastHour};

pub fn draw_forecast(frame: &mut Frame, area: Rect, forecast: Option<&[ForecastHour]>) {
  let block = Block::default().title(" Forecast ").borders(Borders::ALL);

  let now_secs = Utc::now().timestamp();
  let upcoming: Vec<&ForecastHour> = forecast
    .unwrap_or_default()
    .iter()
    .filter(|hour| hour.forecast_at > now_secs)
    .take(3)
    .collect();

  let rows: Vec<Row> = if upcoming.is_empty() {
    (0..3)
      .map(|_| {
        Row::new(vec![
          Cell::from("--:--"),
          Cell::from("- mph"),
          Cell::from("--"),
          Cell::from("-°C"),
        ])
      })
      .collect()
  } else {
    upcoming
      .iter()
      .map(|hour| {
        let deg = hour.wind_direction_deg;
        Row::new(vec![
          Cell::from(format_hour(hour.forecast_at)),
          Cell::from(format!("{:.0} mph", hour.wind_speed_mph)),
          Cell::from(format!("{} {}", cardinal_label(deg), direction_arrow(deg))),
          Cell::from(format!("{:.0}°C", hour.temperature_c)),
        ])
      })
      .collect()
  };

  let header = Row::new(vec!["Time", "Wind", "Direction", "Temp"])
    .style(Style::default().fg(Color::DarkGray));

  let table = Table::new(
    rows,
    [
      Constraint::Length(7),
      Constraint::Length(8),
      Constraint::Length(10),
      Constraint::Length(6),
    ],
  )
  .header(header)
  .block(block);

  frame.render_widget(table, area);
}

/// Local wall-clock hour of an epoch-seconds instant, e.g. "3pm".
fn format_hour(secs: i64) -> String {
  DateTime::from_timestamp(secs, 0)
    .map(|dt| {
      dt.with_timezone(&Local)
        .format("%-I%P")
        .to_string()
    })
    .unwrap_or_else(|| "--:--".to_string())
}
