use crate::config::Config;
use crate::event::{Event, EventHandler, WeatherEvent};
use crate::schedule::Poller;
use crate::ui;
use crate::weather::{
  ConditionsReport, CourseWeatherService, ForecastHour, OwmClient, SystemClock, WindService,
};
use crate::cache::SqliteStorage;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Main application state
pub struct App {
  /// Latest conditions report, None until the first poll lands
  conditions: Option<ConditionsReport>,

  /// Latest forecast series
  forecast: Option<Vec<ForecastHour>>,

  /// Dismissable banner carrying a degradation notice
  notice: Option<String>,

  /// Manual refresh guard: suppresses duplicate triggers while one is in flight
  refreshing: bool,

  /// Whether the usage/rules overlay is shown
  rules_open: bool,

  /// Application configuration
  config: Config,

  /// Fetch policies over storage, provider and clock
  service: Arc<CourseWeatherService>,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let storage = SqliteStorage::open()?;
    let client = OwmClient::new(
      config.weather.base_url.clone(),
      Config::api_key(),
      config.location(),
    );
    let service = Arc::new(WindService::new(storage, client, SystemClock));
    let (tx, _rx) = mpsc::unbounded_channel();

    Ok(Self {
      conditions: None,
      forecast: None,
      notice: None,
      refreshing: false,
      rules_open: false,
      config,
      service,
      event_tx: tx,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));
    self.event_tx = events.sender();

    // Start the two pollers; each fetches immediately on start
    let _conditions_poller = Poller::conditions(Arc::clone(&self.service), events.sender());
    let _forecast_poller = Poller::forecast(Arc::clone(&self.service), events.sender());

    // Main loop
    while !self.should_quit {
      // Draw UI
      terminal.draw(|frame| ui::draw(frame, self))?;

      // Handle events
      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {} // UI refresh happens automatically
      Event::Weather(weather) => self.handle_weather_event(weather),
    }
  }

  fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
    if self.rules_open {
      if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('i')) {
        self.rules_open = false;
      }
      return;
    }

    match key.code {
      KeyCode::Char('q') => {
        self.should_quit = true;
      }
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }

      // Manual refresh of current conditions, debounced
      KeyCode::Char('r') => self.refresh_conditions(),

      // Dismiss the notice banner
      KeyCode::Char('x') | KeyCode::Esc => {
        self.notice = None;
      }

      // Usage/rules overlay
      KeyCode::Char('i') => {
        self.rules_open = true;
      }

      _ => {}
    }
  }

  fn refresh_conditions(&mut self) {
    if self.refreshing {
      return;
    }
    self.refreshing = true;

    let service = Arc::clone(&self.service);
    let tx = self.event_tx.clone();
    tokio::spawn(async move {
      let report = service.current_conditions().await;
      let _ = tx.send(Event::Weather(WeatherEvent::Conditions(report)));
    });
  }

  fn handle_weather_event(&mut self, event: WeatherEvent) {
    match event {
      WeatherEvent::Conditions(report) => {
        self.refreshing = false;
        self.notice = if report.degraded {
          report.notice.clone()
        } else {
          None
        };
        self.conditions = Some(report);
      }
      WeatherEvent::Forecast(forecast) => {
        self.forecast = Some(forecast);
      }
    }
  }

  // Accessors for UI rendering
  pub fn conditions(&self) -> Option<&ConditionsReport> {
    self.conditions.as_ref()
  }

  pub fn forecast(&self) -> Option<&[ForecastHour]> {
    self.forecast.as_deref()
  }

  pub fn notice(&self) -> Option<&str> {
    self.notice.as_deref()
  }

  pub fn is_refreshing(&self) -> bool {
    self.refreshing
  }

  pub fn rules_open(&self) -> bool {
    self.rules_open
  }

  pub fn title(&self) -> &str {
    self.config.title.as_deref().unwrap_or("Wind Guide")
  }
}
