use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::weather::Coordinates;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub weather: WeatherConfig,
  /// Custom title for the header (defaults to "Wind Guide" if not set)
  pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
  pub latitude: f64,
  pub longitude: f64,
  /// Provider base URL, overridable for testing
  #[serde(default = "default_base_url")]
  pub base_url: String,
}

fn default_base_url() -> String {
  "https://api.openweathermap.org/data/2.5".to_string()
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./windsock.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/windsock/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/windsock/config.yaml\n\
                 See config.example.yaml for the format."
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("windsock.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("windsock").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }

  pub fn location(&self) -> Coordinates {
    Coordinates {
      latitude: self.weather.latitude,
      longitude: self.weather.longitude,
    }
  }

  /// Get the OpenWeatherMap API key from environment variables.
  ///
  /// Checks WINDSOCK_OWM_KEY first, then OWM_API_KEY as fallback. A missing
  /// key is not fatal here: fetches degrade to cached or placeholder data.
  pub fn api_key() -> Option<String> {
    std::env::var("WINDSOCK_OWM_KEY")
      .or_else(|_| std::env::var("OWM_API_KEY"))
      .ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_minimal_config_with_default_base_url() {
    let config = Config::parse(
      "weather:\n  latitude: 52.2627\n  longitude: -1.5217\n",
    )
    .expect("parse");

    assert_eq!(config.weather.latitude, 52.2627);
    assert_eq!(config.weather.longitude, -1.5217);
    assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
    assert!(config.title.is_none());
  }

  #[test]
  fn parses_overrides() {
    let config = Config::parse(
      "title: \"L&CGC Wind Guide\"\nweather:\n  latitude: 1.0\n  longitude: 2.0\n  base_url: http://localhost:9090\n",
    )
    .expect("parse");

    assert_eq!(config.title.as_deref(), Some("L&CGC Wind Guide"));
    assert_eq!(config.weather.base_url, "http://localhost:9090");
  }
}
