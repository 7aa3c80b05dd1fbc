use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::UserConfig;
use crate::core::format::{format_title, format_track_rows};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome};
use crate::core::model::{primary_artist, FullAlbum};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlbumAction {
  PlayAlbum,
  AddToQueue,
  PlayTrack,
}

/// Track listing of one album, reached from the saved albums or from album
/// search results.
pub struct AlbumDetail {
  menu: Menu<AlbumAction>,
  album: Option<FullAlbum>,
  parent: Option<ScreenId>,
}

impl AlbumDetail {
  pub fn new(config: &UserConfig) -> Self {
    let keys = &config.keys;
    AlbumDetail {
      menu: Menu::list(
        String::new(),
        vec![
          Keybinding::new(AlbumAction::PlayAlbum, &keys.play_album, "Play album"),
          Keybinding::new(AlbumAction::AddToQueue, &keys.add_to_queue, "Add to queue"),
          Keybinding::new(AlbumAction::PlayTrack, &keys.play_track, "Play track"),
        ],
      ),
      album: None,
      parent: None,
    }
  }

  /// Resolves the album to show, fetching it when only an id was given.
  /// A failed fetch clears the cache.
  async fn load<C: SpotifyApi, L: Launcher>(&mut self, session: &Session<C, L>, activation: Activation) {
    match activation {
      Activation::Album(album) => self.album = Some(*album),
      Activation::AlbumLookup(id) => match session.client().album(&id).await {
        Ok(album) => self.album = Some(album),
        Err(e) => {
          session.report(errors::GET_ALBUM, e).await;
          self.album = None;
        }
      },
      Activation::None | Activation::Query(_) => {}
    }
  }
}

impl Screen for AlbumDetail {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    activation: Activation,
  ) -> Result<Transition> {
    self.load(session, activation).await;
    let album = match &self.album {
      Some(album) => album,
      None => return Ok(back(self.parent)),
    };
    let album_uri = album.album.uri.clone();

    self.menu.prompt = format_title(
      &album.album.name,
      primary_artist(&album.album.artists).unwrap_or_default(),
    );
    self.menu.message = session.help_message(&self.menu.keys);
    self.menu.rows = format_track_rows(&album.tracks.items, &session.config.icons.track);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => {
        if let Err(e) = session
          .player
          .play_context(&album_uri, Some(&row.value))
          .await
        {
          session.report(errors::PLAY_TRACK, e).await;
        }
        Ok(Transition::Exit)
      }
      Outcome::CustomKey { key, row } => match key {
        AlbumAction::PlayAlbum => {
          if let Err(e) = session.player.play_context(&album_uri, None).await {
            session.report(errors::PLAY_ALBUM, e).await;
          }
          Ok(Transition::Exit)
        }
        _ if row.value.is_empty() => Ok(Transition::to(ScreenId::AlbumDetail)),
        AlbumAction::AddToQueue => {
          if let Err(e) = session.player.add_queue(&row.value).await {
            session.report(errors::ADD_QUEUE, e).await;
          }
          Ok(Transition::to(ScreenId::AlbumDetail))
        }
        AlbumAction::PlayTrack => {
          if let Err(e) = session.player.play_track(&row.value).await {
            session.report(errors::PLAY_TRACK, e).await;
          }
          Ok(Transition::Exit)
        }
      },
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
