use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::format_icon;
use crate::core::menu::{Launcher, Menu, Outcome, Row};
use crate::core::model::Device;
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;
use std::convert::Infallible;

pub struct Devices {
  menu: Menu<Infallible>,
  devices: Vec<Device>,
  parent: Option<ScreenId>,
}

impl Devices {
  pub fn new(config: &UserConfig) -> Self {
    Devices {
      menu: Menu::list(format_icon(&config.icons.device, "Devices"), Vec::new()),
      devices: Vec::new(),
      parent: None,
    }
  }
}

fn current_device_message(config: &UserConfig) -> String {
  if config.device.name.is_empty() {
    "No device selected".to_string()
  } else {
    format!("Current device: {}", config.device.name)
  }
}

impl Screen for Devices {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    self.devices = match session.client().devices().await {
      // Restricted devices come without an id and cannot be targeted.
      Ok(devices) => devices.into_iter().filter(|d| d.id.is_some()).collect(),
      Err(e) => {
        session.report(errors::GET_DEVICES, e).await;
        return Ok(back(self.parent));
      }
    };

    if self.devices.is_empty() {
      session.notify(errors::NO_DEVICES).await;
      return Ok(back(self.parent));
    }

    self.menu.rows = self
      .devices
      .iter()
      .map(|device| Row::new(device.name.clone(), device.id.clone().unwrap_or_default()))
      .collect();
    self.menu.message = current_device_message(&session.config);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => {
        let device = self
          .devices
          .iter()
          .find(|device| device.id.as_deref() == Some(row.value.as_str()));
        if let Some(device) = device {
          if let Err(e) = session.select_device(device) {
            session.report(errors::SELECT_DEVICE, e).await;
          }
        }
        Ok(Transition::to(ScreenId::Devices))
      }
      Outcome::CustomKey { key, .. } => match key {},
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{arg_value, session, FakeLauncher, FakeSpotify, Step};

  fn device(id: Option<&str>, name: &str) -> Device {
    Device {
      id: id.map(str::to_string),
      name: name.to_string(),
    }
  }

  fn screen(config: &UserConfig) -> Devices {
    let mut devices = Devices::new(config);
    devices.set_parent(ScreenId::Main);
    devices
  }

  #[tokio::test]
  async fn selecting_a_device_saves_it_and_rerenders() {
    let dir = tempfile::tempdir().unwrap();
    let spotify = FakeSpotify::default();
    *spotify.devices.borrow_mut() = vec![
      device(Some("d1"), "Desk"),
      device(None, "Restricted"),
      device(Some("d2"), "Kitchen"),
    ];
    let mut session = session(spotify, FakeLauncher::new([Step::Pick(2), Step::Cancel]));
    session.config.set_config_path(dir.path().join("spofi.yml"));
    let mut devices = screen(&session.config);

    assert_eq!(
      devices.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Devices)
    );
    assert_eq!(session.player.device(), Some("d2"));
    assert_eq!(session.config.device.name, "Kitchen");

    assert_eq!(
      devices.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Main)
    );
    let args = session.launcher.menu_args();
    assert_eq!(arg_value(&args[0], "-mesg").unwrap(), "No device selected");
    assert_eq!(
      arg_value(&args[1], "-mesg").unwrap(),
      "Current device: Kitchen"
    );
    assert_eq!(session.launcher.menu_lines()[0], vec!["..", "Desk", "Kitchen"]);
  }

  #[tokio::test]
  async fn save_failure_is_reported_and_rerenders() {
    let spotify = FakeSpotify::default();
    *spotify.devices.borrow_mut() = vec![device(Some("d1"), "Desk")];
    let mut session = session(spotify, FakeLauncher::new([Step::Pick(1)]));
    let mut devices = screen(&session.config);

    assert_eq!(
      devices.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Devices)
    );
    assert_eq!(session.launcher.errors(), vec![errors::SELECT_DEVICE]);
    assert_eq!(session.player.device(), None);
  }

  #[tokio::test]
  async fn no_devices_returns_to_parent() {
    let mut session = session(FakeSpotify::default(), FakeLauncher::default());
    let mut devices = screen(&session.config);

    assert_eq!(
      devices.show(&mut session, Activation::None).await.unwrap(),
      Transition::to(ScreenId::Main)
    );
    assert_eq!(session.launcher.errors(), vec![errors::NO_DEVICES]);
    assert!(session.launcher.menu_args().is_empty());
  }
}
