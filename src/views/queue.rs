use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_icon, format_track_rows};
use crate::core::menu::{Launcher, Menu, Outcome};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;
use std::convert::Infallible;

/// Read-only view of the upcoming tracks.
pub struct QueueScreen {
  menu: Menu<Infallible>,
  parent: Option<ScreenId>,
}

impl QueueScreen {
  pub fn new(config: &UserConfig) -> Self {
    QueueScreen {
      menu: Menu::list(format_icon(&config.icons.queue, "Queue"), Vec::new()),
      parent: None,
    }
  }
}

impl Screen for QueueScreen {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let queue = match session.client().queue().await {
      Ok(queue) => queue,
      Err(e) => {
        session.report(errors::GET_QUEUE, e).await;
        return Ok(back(self.parent));
      }
    };

    if queue.queue.is_empty() {
      session.notify(errors::QUEUE_EMPTY).await;
      return Ok(back(self.parent));
    }

    self.menu.rows = format_track_rows(&queue.queue, &session.config.icons.track);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(_) => Ok(Transition::to(ScreenId::Queue)),
      Outcome::CustomKey { key, .. } => match key {},
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
