mod cli;
mod core;
mod infra;
#[cfg(test)]
mod testing;
mod views;

use crate::core::config::UserConfig;
use crate::core::session::Session;
use crate::infra::network::Network;
use crate::infra::rofi::Rofi;
use crate::infra::theme::resolve_theme;
use crate::views::Screens;
use anyhow::Result;
use backtrace::Backtrace;
use log::{error, info};
use std::{fs, io::Write, panic, path::PathBuf};

fn setup_logging() -> Result<()> {
  let pid = std::process::id();
  let log_dir = std::env::temp_dir().join("spofi_logs");
  let log_path = log_dir.join(format!("spofi{}.log", pid));

  if !log_dir.exists() {
    fs::create_dir_all(&log_dir).map_err(|e| {
      anyhow::anyhow!(
        "Failed to create log directory {}: {}",
        log_dir.display(),
        e
      )
    })?;
  }

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{}[{}][{}] {}",
        chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(log::LevelFilter::Info)
    .chain(fern::log_file(&log_path)?)
    .apply()
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

  Ok(())
}

fn install_panic_hook(config_dir: Option<PathBuf>) {
  let default_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    if let Some(dir) = config_dir.as_ref() {
      let path = dir.join("spofi_panic.log");
      let _ = fs::create_dir_all(dir);
      if let Ok(mut f) = fs::OpenOptions::new().create(true).append(true).open(&path) {
        let _ = writeln!(f, "\n==== spofi panic ====");
        let _ = writeln!(f, "{}", info);
        let _ = writeln!(f, "{:?}", Backtrace::new());
      }
      eprintln!("A crash log was written to: {}", path.display());
    }
    default_hook(info);
  }));
}

async fn start() -> Result<()> {
  let matches = cli::app().get_matches();

  let mut config = UserConfig::new();
  if let Some(path) = matches.get_one::<PathBuf>("config") {
    config.set_config_path(path.clone());
  }
  config.load_config()?;
  info!("user config loaded");
  install_panic_hook(config.config_dir().map(PathBuf::from));

  if let Some(setup) = matches.subcommand_matches("setup") {
    let host = setup
      .get_one::<String>("host")
      .map(String::as_str)
      .unwrap_or(cli::DEFAULT_HOST);
    let port = setup
      .get_one::<u16>("port")
      .copied()
      .unwrap_or(cli::DEFAULT_PORT);
    return cli::setup::run(&mut config, host, port).await;
  }

  if config.is_incomplete() {
    info!("credentials missing, starting setup");
    cli::setup::run(&mut config, cli::DEFAULT_HOST, cli::DEFAULT_PORT).await?;
    return Ok(());
  }

  let theme = resolve_theme(
    matches.get_one::<PathBuf>("theme").cloned(),
    config.theme.as_deref(),
  )?;

  let network = Network::new(
    &config.spotify.client_id,
    &config.spotify.client_secret,
    &config.spotify.refresh_token,
  );
  let mut screens = Screens::new(&config);
  let mut session = Session::new(config, network, Rofi, Some(theme));

  screens.run(&mut session).await
}

#[tokio::main]
async fn main() {
  if let Err(e) = setup_logging() {
    eprintln!("{:#}", e);
  }
  info!("spofi {} starting up", env!("CARGO_PKG_VERSION"));

  if let Err(e) = start().await {
    error!("{:#}", e);
    eprintln!("{:#}", e);
    std::process::exit(1);
  }
}
