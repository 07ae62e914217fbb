//! Dismissable notice banner for degraded conditions results.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn draw_notice(frame: &mut Frame, area: Rect, notice: &str) {
  let paragraph = Paragraph::new(notice)
    .style(Style::default().fg(Color::Yellow))
    .wrap(Wrap { trim: true })
    .centered()
    .block(Block::default().borders(Borders::ALL));

  frame.render_widget(paragraph, area);
}
