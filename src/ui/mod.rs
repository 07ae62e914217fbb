mod views;

use crate::app::App;
use chrono::{DateTime, Local};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let banner_height = if app.notice().is_some() { 3 } else { 0 };
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2),             // Header
      Constraint::Length(banner_height), // Notice banner
      Constraint::Length(8),             // Current conditions
      Constraint::Min(7),                // Forecast
      Constraint::Length(1),             // Status bar
    ])
    .split(frame.area());

  draw_header(frame, chunks[0], app);

  if let Some(notice) = app.notice() {
    views::banner::draw_notice(frame, chunks[1], notice);
  }

  views::conditions::draw_conditions(frame, chunks[2], app.conditions());
  views::forecast::draw_forecast(frame, chunks[3], app.forecast());

  draw_status_bar(frame, chunks[4], app);

  if app.rules_open() {
    views::rules::draw_rules(frame);
  }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
  let last_updated = app
    .conditions()
    .map(|report| format_millis(report.as_of))
    .unwrap_or_else(|| "...".to_string());

  let lines = vec![
    Line::from(Span::styled(
      app.title(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      format!("Last updated: {last_updated}"),
      Style::default().fg(Color::DarkGray),
    )),
  ];

  frame.render_widget(Paragraph::new(lines).centered(), area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let hint = if app.is_refreshing() {
    " refreshing...".to_string()
  } else {
    " r:refresh  x:dismiss  i:usage/rules  q:quit".to_string()
  };

  let paragraph = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
  frame.render_widget(paragraph, area);
}

/// Local wall-clock time of an epoch-milliseconds instant.
fn format_millis(millis: i64) -> String {
  DateTime::from_timestamp_millis(millis)
    .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
    .unwrap_or_else(|| "...".to_string())
}
