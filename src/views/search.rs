use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::format_icon;
use crate::core::menu::{Launcher, Menu, Outcome};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;
use std::convert::Infallible;

/// Free-text prompt. The last query is kept as the filter so returning from
/// the results shows it again.
pub struct SearchScreen {
  menu: Menu<Infallible>,
  query: String,
  parent: Option<ScreenId>,
}

impl SearchScreen {
  pub fn new(config: &UserConfig) -> Self {
    SearchScreen {
      menu: Menu {
        prompt: format_icon(&config.icons.search, "Search"),
        show_back: true,
        ..Default::default()
      },
      query: String::new(),
      parent: None,
    }
  }
}

impl Screen for SearchScreen {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    self.menu.filter = self.query.clone();

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => {
        self.query = row.title;
        if self.query.is_empty() {
          session.notify(errors::EMPTY_SEARCH).await;
          return Ok(Transition::to(ScreenId::Search));
        }
        Ok(Transition::child(
          ScreenId::SearchTracks,
          ScreenId::Search,
          Activation::Query(self.query.clone()),
        ))
      }
      Outcome::CustomKey { key, .. } => match key {},
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
