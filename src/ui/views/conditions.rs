//! The current conditions panel: big speed readout, cardinal, arrow.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::direction_arrow;
use crate::weather::{cardinal_label, ConditionsReport};

pub fn draw_conditions(frame: &mut Frame, area: Rect, report: Option<&ConditionsReport>) {
  let block = Block::default()
    .title(" Current Conditions ")
    .borders(Borders::ALL);

  let lines = match report {
    Some(report) => {
      let deg = report.conditions.wind_direction_deg;
      vec![
        Line::from(""),
        Line::from(Span::styled(
          format!("{} {}", direction_arrow(deg), cardinal_label(deg)),
          Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
          format!("{:.1}", report.conditions.wind_speed_mph),
          Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::White),
        )),
        Line::from("mph"),
      ]
    }
    None => vec![
      Line::from(""),
      Line::from(Span::styled(
        "Loading weather data...",
        Style::default().fg(Color::DarkGray),
      )),
    ],
  };

  frame.render_widget(Paragraph::new(lines).centered().block(block), area);
}
