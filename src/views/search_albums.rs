use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_album_rows, format_icon};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome};
use crate::core::model::{uri_to_id, SearchKind};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchAlbumsAction {
  ToggleSearchType,
}

pub struct SearchAlbums {
  menu: Menu<SearchAlbumsAction>,
  query: String,
  parent: Option<ScreenId>,
}

impl SearchAlbums {
  pub fn new(config: &UserConfig) -> Self {
    SearchAlbums {
      menu: Menu::list(
        format_icon(&config.icons.album, "Albums"),
        vec![Keybinding::new(
          SearchAlbumsAction::ToggleSearchType,
          &config.keys.toggle_search_type,
          "Search tracks",
        )],
      ),
      query: String::new(),
      parent: None,
    }
  }
}

impl Screen for SearchAlbums {
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

    let albums = match session.client().search(&self.query, SearchKind::Album).await {
      Ok(results) => results.albums.unwrap_or_default().items,
      Err(e) => {
        session.report(errors::SEARCH, e).await;
        return Ok(back(self.parent));
      }
    };

    self.menu.message = session.help_message(&self.menu.keys);
    self.menu.rows = format_album_rows(&albums, &session.config.icons.album);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => match uri_to_id(&row.value) {
        Some(id) => Ok(Transition::child(
          ScreenId::AlbumDetail,
          ScreenId::SearchAlbums,
          Activation::AlbumLookup(id.to_string()),
        )),
        None => Ok(Transition::to(ScreenId::SearchAlbums)),
      },
      Outcome::CustomKey { key, .. } => match key {
        SearchAlbumsAction::ToggleSearchType => Ok(Transition::Show {
          screen: ScreenId::SearchTracks,
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
