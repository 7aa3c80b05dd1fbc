use super::config::{DeviceConfig, UserConfig};
use super::format::format_keybindings;
use super::menu::{error_args, Keybinding, Launcher, Menu, Outcome};
use super::model::Device;
use super::player::Player;
use anyhow::Result;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Everything a screen needs while it runs: the loaded configuration, the
/// player bound to the selected device, the launcher and the theme file.
pub struct Session<C, L> {
  pub config: UserConfig,
  pub player: Player<C>,
  pub launcher: L,
  theme: Option<PathBuf>,
}

impl<C, L: Launcher> Session<C, L> {
  pub fn new(config: UserConfig, client: C, launcher: L, theme: Option<PathBuf>) -> Self {
    let device = Some(config.device.id.clone());
    Session {
      player: Player::new(client, device),
      config,
      launcher,
      theme,
    }
  }

  pub fn client(&self) -> &C {
    self.player.client()
  }

  pub fn theme(&self) -> Option<&Path> {
    self.theme.as_deref()
  }

  /// Help line for a screen's custom keys, or nothing when help is off.
  pub fn help_message<K>(&self, keys: &[Keybinding<K>]) -> String {
    if self.config.show_keybindings {
      format_keybindings(keys)
    } else {
      String::new()
    }
  }

  pub async fn run_menu<K: Copy>(&self, menu: &mut Menu<K>) -> Result<Outcome<K>> {
    menu.run(&self.launcher, self.theme()).await
  }

  /// Shows `message` in rofi's error dialog.
  pub async fn notify(&self, message: &str) {
    if let Err(e) = self
      .launcher
      .show_error(error_args(message, self.theme()))
      .await
    {
      warn!("could not show notification {:?}: {:#}", message, e);
    }
  }

  /// Logs the cause and tells the user what failed.
  pub async fn report(&self, message: &str, err: anyhow::Error) {
    error!("{}: {:#}", message, err);
    self.notify(message).await;
  }

  /// Persists `device` as the playback target and points the player at it.
  /// The in-memory selection is left untouched when saving fails.
  pub fn select_device(&mut self, device: &Device) -> Result<()> {
    let id = device.id.clone().unwrap_or_default();
    let previous = std::mem::replace(
      &mut self.config.device,
      DeviceConfig {
        id: id.clone(),
        name: device.name.clone(),
      },
    );

    if let Err(e) = self.config.save_config() {
      self.config.device = previous;
      return Err(e);
    }

    info!("selected device {} ({})", device.name, id);
    self.player.set_device(id);
    Ok(())
  }
}
