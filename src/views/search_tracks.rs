use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_icon, format_track_rows};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome};
use crate::core::model::SearchKind;
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchTracksAction {
  AddToQueue,
  ToggleSearchType,
}

pub struct SearchTracks {
  menu: Menu<SearchTracksAction>,
  query: String,
  parent: Option<ScreenId>,
}

impl SearchTracks {
  pub fn new(config: &UserConfig) -> Self {
    let keys = &config.keys;
    SearchTracks {
      menu: Menu::list(
        format_icon(&config.icons.track, "Tracks"),
        vec![
          Keybinding::new(
            SearchTracksAction::AddToQueue,
            &keys.add_to_queue,
            "Add to queue",
          ),
          Keybinding::new(
            SearchTracksAction::ToggleSearchType,
            &keys.toggle_search_type,
            "Search albums",
          ),
        ],
      ),
      query: String::new(),
      parent: None,
    }
  }
}

impl Screen for SearchTracks {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    activation: Activation,
  ) -> Result<Transition> {
    if let Activation::Query(query) = activation {
      self.query = query;
    }
    if self.query.is_empty() {
      return Ok(back(self.parent));
    }

    let tracks = match session.client().search(&self.query, SearchKind::Track).await {
      Ok(results) => results.tracks.unwrap_or_default().items,
      Err(e) => {
        session.report(errors::SEARCH, e).await;
        return Ok(back(self.parent));
      }
    };

    self.menu.message = session.help_message(&self.menu.keys);
    self.menu.rows = format_track_rows(&tracks, &session.config.icons.track);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => {
        if let Err(e) = session.player.play_track(&row.value).await {
          session.report(errors::PLAY_TRACK, e).await;
        }
        Ok(Transition::Exit)
      }
      Outcome::CustomKey { key, row } => match key {
        SearchTracksAction::AddToQueue => {
          if !row.value.is_empty() {
            if let Err(e) = session.player.add_queue(&row.value).await {
              session.report(errors::ADD_QUEUE, e).await;
            }
          }
          Ok(Transition::to(ScreenId::SearchTracks))
        }
        // The album results answer to whoever opened these results.
        SearchTracksAction::ToggleSearchType => Ok(Transition::Show {
          screen: ScreenId::SearchAlbums,
          parent: self.parent,
          activation: Activation::Query(self.query.clone()),
        }),
      },
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
