use super::pagination::Pagination;
use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_icon, format_track_rows};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome};
use crate::core::model::Track;
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

const PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikedTracksAction {
  NextPage,
  PreviousPage,
  AddToQueue,
}

pub struct LikedTracks {
  menu: Menu<LikedTracksAction>,
  title: String,
  pages: Pagination,
  parent: Option<ScreenId>,
}

impl LikedTracks {
  pub fn new(config: &UserConfig) -> Self {
    let keys = &config.keys;
    let title = format_icon(&config.icons.liked_tracks, "Liked Tracks");
    LikedTracks {
      menu: Menu::list(
        title.clone(),
        vec![
          Keybinding::new(LikedTracksAction::NextPage, &keys.next_page, "Next page"),
          Keybinding::new(
            LikedTracksAction::PreviousPage,
            &keys.previous_page,
            "Previous page",
          ),
          Keybinding::new(
            LikedTracksAction::AddToQueue,
            &keys.add_to_queue,
            "Add to queue",
          ),
        ],
      ),
      title,
      pages: Pagination::new(PAGE_SIZE),
      parent: None,
    }
  }

  async fn fetch<C: SpotifyApi, L: Launcher>(&mut self, session: &Session<C, L>) -> Result<Vec<Track>> {
    let page = session
      .client()
      .liked_tracks(self.pages.limit(), self.pages.offset())
      .await?;
    self.pages.update_total(page.total);
    Ok(page.items.into_iter().map(|saved| saved.track).collect())
  }
}

impl Screen for LikedTracks {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let tracks = match self.fetch(session).await {
      Ok(tracks) => tracks,
      Err(e) => {
        session.report(errors::GET_TRACKS, e).await;
        self.pages.reset();
        return Ok(back(self.parent));
      }
    };

    self.menu.prompt = self.pages.prompt(&self.title);
    self.menu.message = session.help_message(&self.menu.keys);
    self.menu.rows = format_track_rows(&tracks, &session.config.icons.track);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => {
        self.pages.reset();
        Ok(back(self.parent))
      }
      Outcome::Selected(row) => {
        if let Err(e) = session.player.play_track(&row.value).await {
          session.report(errors::PLAY_TRACK, e).await;
        }
        Ok(Transition::Exit)
      }
      Outcome::CustomKey { key, row } => {
        match key {
          LikedTracksAction::NextPage => self.pages.next(),
          LikedTracksAction::PreviousPage => self.pages.previous(),
          LikedTracksAction::AddToQueue if !row.value.is_empty() => {
            if let Err(e) = session.player.add_queue(&row.value).await {
              session.report(errors::ADD_QUEUE, e).await;
            }
          }
          LikedTracksAction::AddToQueue => {}
        }
        Ok(Transition::to(ScreenId::LikedTracks))
      }
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
