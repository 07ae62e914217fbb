mod app;
mod cache;
mod config;
mod course;
mod event;
mod schedule;
mod ui;
mod weather;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "windsock")]
#[command(about = "A terminal wind guide for the course")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/windsock/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  // The TUI owns the terminal, so logs go to a file
  let _log_guard = init_logging()?;

  let args = Args::parse();
  let config = config::Config::load(args.config.as_deref())?;

  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
  let log_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?
    .join("windsock");

  let appender = tracing_appender::rolling::daily(log_dir, "windsock.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("windsock=info")),
    )
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(guard)
}
