use super::pagination::Pagination;
use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_icon, format_playlist_rows};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

const PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaylistsAction {
  NextPage,
  PreviousPage,
  PlayPlaylist,
}

pub struct Playlists {
  menu: Menu<PlaylistsAction>,
  title: String,
  pages: Pagination,
  parent: Option<ScreenId>,
}

impl Playlists {
  pub fn new(config: &UserConfig) -> Self {
    let keys = &config.keys;
    let title = format_icon(&config.icons.playlist, "Playlists");
    Playlists {
      menu: Menu::list(
        title.clone(),
        vec![
          Keybinding::new(PlaylistsAction::NextPage, &keys.next_page, "Next page"),
          Keybinding::new(
            PlaylistsAction::PreviousPage,
            &keys.previous_page,
            "Previous page",
          ),
          Keybinding::new(
            PlaylistsAction::PlayPlaylist,
            &keys.play_playlist,
            "Play playlist",
          ),
        ],
      ),
      title,
      pages: Pagination::new(PAGE_SIZE),
      parent: None,
    }
  }
}

async fn play<C: SpotifyApi, L: Launcher>(session: &Session<C, L>, uri: &str) -> Transition {
  if let Err(e) = session.player.play_context(uri, None).await {
    session.report(errors::PLAY_PLAYLIST, e).await;
  }
  Transition::Exit
}

impl Screen for Playlists {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let page = match session
      .client()
      .playlists(self.pages.limit(), self.pages.offset())
      .await
    {
      Ok(page) => page,
      Err(e) => {
        session.report(errors::GET_PLAYLISTS, e).await;
        self.pages.reset();
        return Ok(back(self.parent));
      }
    };
    self.pages.update_total(page.total);

    self.menu.prompt = self.pages.prompt(&self.title);
    self.menu.message = session.help_message(&self.menu.keys);
    self.menu.rows = format_playlist_rows(&page.items, &session.config.icons.playlist);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => {
        self.pages.reset();
        Ok(back(self.parent))
      }
      Outcome::Selected(row) => Ok(play(session, &row.value).await),
      Outcome::CustomKey { key, row } => match key {
        PlaylistsAction::NextPage => {
          self.pages.next();
          Ok(Transition::to(ScreenId::Playlists))
        }
        PlaylistsAction::PreviousPage => {
          self.pages.previous();
          Ok(Transition::to(ScreenId::Playlists))
        }
        PlaylistsAction::PlayPlaylist if row.value.is_empty() => {
          Ok(Transition::to(ScreenId::Playlists))
        }
        PlaylistsAction::PlayPlaylist => Ok(play(session, &row.value).await),
      },
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
