pub mod banner;
pub mod conditions;
pub mod forecast;
pub mod rules;

/// Arrow glyph for a wind bearing, north up, 45 degree steps.
pub fn direction_arrow(deg: f64) -> char {
  const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
  let index = (deg / 45.0).round() as usize % 8;
  ARROWS[index]
}
