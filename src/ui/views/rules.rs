//! Static usage and rules overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const RULES_TEXT: &str = "\
The wind dial data is live and updates automatically every 30 minutes. \
Press r to refresh it by hand.

Permitted within the Rules of Golf (Rule 4.3a(1)): players may access \
weather reports from any source, and everything shown here is publicly \
available forecast information. This app measures no elevation changes \
and recommends no clubs, so using it during a round is permitted.

Press Esc to close.";

pub fn draw_rules(frame: &mut Frame) {
  let area = centered_rect(frame.area(), 60, 14);

  let paragraph = Paragraph::new(RULES_TEXT)
    .wrap(Wrap { trim: true })
    .block(
      Block::default()
        .title(" Usage & Rules ")
        .borders(Borders::ALL),
    );

  frame.render_widget(Clear, area);
  frame.render_widget(paragraph, area);
}

/// A centered rect of at most the given size, clamped to the frame.
fn centered_rect(frame_area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(frame_area.width);
  let height = height.min(frame_area.height);
  Rect {
    x: frame_area.x + (frame_area.width - width) / 2,
    y: frame_area.y + (frame_area.height - height) / 2,
    width,
    height,
  }
}
