//! The menu screens and the loop that moves between them.
//!
//! Every screen renders one rofi menu per call to [`Screen::show`] and
//! answers with a [`Transition`] naming what to show next. Screens never
//! call each other; parents are plain [`ScreenId`]s into the [`Screens`]
//! registry, so the graph has no ownership cycles.

pub mod album;
pub mod devices;
pub mod errors;
pub mod liked_tracks;
pub mod main_menu;
pub mod pagination;
pub mod player;
pub mod playlists;
pub mod queue;
pub mod recently_played;
pub mod saved_albums;
pub mod search;
pub mod search_albums;
pub mod search_tracks;

use crate::core::config::UserConfig;
use crate::core::menu::Launcher;
use crate::core::model::FullAlbum;
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;
use log::debug;

use self::album::AlbumDetail;
use self::devices::Devices;
use self::liked_tracks::LikedTracks;
use self::main_menu::MainMenu;
use self::player::PlayerScreen;
use self::playlists::Playlists;
use self::queue::QueueScreen;
use self::recently_played::RecentlyPlayedScreen;
use self::saved_albums::SavedAlbums;
use self::search::SearchScreen;
use self::search_albums::SearchAlbums;
use self::search_tracks::SearchTracks;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenId {
  Main,
  Devices,
  Player,
  LikedTracks,
  SavedAlbums,
  AlbumDetail,
  Playlists,
  Queue,
  RecentlyPlayed,
  Search,
  SearchTracks,
  SearchAlbums,
}

/// Data handed to a screen when it is entered.
#[derive(Clone, Debug, PartialEq)]
pub enum Activation {
  /// Re-render with whatever the screen already holds.
  None,
  /// An album that was already fetched.
  Album(Box<FullAlbum>),
  /// An album id still to be fetched.
  AlbumLookup(String),
  /// A search query.
  Query(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
  Show {
    screen: ScreenId,
    /// Re-parents `screen` before it is shown.
    parent: Option<ScreenId>,
    activation: Activation,
  },
  Exit,
}

impl Transition {
  pub fn to(screen: ScreenId) -> Self {
    Transition::Show {
      screen,
      parent: None,
      activation: Activation::None,
    }
  }

  pub fn child(screen: ScreenId, parent: ScreenId, activation: Activation) -> Self {
    Transition::Show {
      screen,
      parent: Some(parent),
      activation,
    }
  }
}

/// Where Back and Cancel lead: the parent, or out of the program at the
/// top of the graph.
pub fn back(parent: Option<ScreenId>) -> Transition {
  parent.map(Transition::to).unwrap_or(Transition::Exit)
}

pub trait Screen {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    activation: Activation,
  ) -> Result<Transition>;

  fn set_parent(&mut self, parent: ScreenId);
}

/// All screens, built once and wired to their default parents.
pub struct Screens {
  main: MainMenu,
  devices: Devices,
  player: PlayerScreen,
  liked_tracks: LikedTracks,
  saved_albums: SavedAlbums,
  album: AlbumDetail,
  playlists: Playlists,
  queue: QueueScreen,
  recently_played: RecentlyPlayedScreen,
  search: SearchScreen,
  search_tracks: SearchTracks,
  search_albums: SearchAlbums,
}

impl Screens {
  pub fn new(config: &UserConfig) -> Self {
    let mut screens = Screens {
      main: MainMenu::new(config),
      devices: Devices::new(config),
      player: PlayerScreen::new(config),
      liked_tracks: LikedTracks::new(config),
      saved_albums: SavedAlbums::new(config),
      album: AlbumDetail::new(config),
      playlists: Playlists::new(config),
      queue: QueueScreen::new(config),
      recently_played: RecentlyPlayedScreen::new(config),
      search: SearchScreen::new(config),
      search_tracks: SearchTracks::new(config),
      search_albums: SearchAlbums::new(config),
    };
    screens.wire();
    screens
  }

  fn wire(&mut self) {
    for screen in [
      ScreenId::Devices,
      ScreenId::Player,
      ScreenId::LikedTracks,
      ScreenId::SavedAlbums,
      ScreenId::Playlists,
      ScreenId::Queue,
      ScreenId::RecentlyPlayed,
      ScreenId::Search,
    ] {
      self.set_parent(screen, ScreenId::Main);
    }
    self.set_parent(ScreenId::AlbumDetail, ScreenId::SavedAlbums);
    self.set_parent(ScreenId::SearchTracks, ScreenId::Search);
    self.set_parent(ScreenId::SearchAlbums, ScreenId::Search);
  }

  pub fn set_parent(&mut self, screen: ScreenId, parent: ScreenId) {
    match screen {
      ScreenId::Main => self.main.set_parent(parent),
      ScreenId::Devices => self.devices.set_parent(parent),
      ScreenId::Player => self.player.set_parent(parent),
      ScreenId::LikedTracks => self.liked_tracks.set_parent(parent),
      ScreenId::SavedAlbums => self.saved_albums.set_parent(parent),
      ScreenId::AlbumDetail => self.album.set_parent(parent),
      ScreenId::Playlists => self.playlists.set_parent(parent),
      ScreenId::Queue => self.queue.set_parent(parent),
      ScreenId::RecentlyPlayed => self.recently_played.set_parent(parent),
      ScreenId::Search => self.search.set_parent(parent),
      ScreenId::SearchTracks => self.search_tracks.set_parent(parent),
      ScreenId::SearchAlbums => self.search_albums.set_parent(parent),
    }
  }

  pub async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    screen: ScreenId,
    session: &mut Session<C, L>,
    activation: Activation,
  ) -> Result<Transition> {
    match screen {
      ScreenId::Main => self.main.show(session, activation).await,
      ScreenId::Devices => self.devices.show(session, activation).await,
      ScreenId::Player => self.player.show(session, activation).await,
      ScreenId::LikedTracks => self.liked_tracks.show(session, activation).await,
      ScreenId::SavedAlbums => self.saved_albums.show(session, activation).await,
      ScreenId::AlbumDetail => self.album.show(session, activation).await,
      ScreenId::Playlists => self.playlists.show(session, activation).await,
      ScreenId::Queue => self.queue.show(session, activation).await,
      ScreenId::RecentlyPlayed => self.recently_played.show(session, activation).await,
      ScreenId::Search => self.search.show(session, activation).await,
      ScreenId::SearchTracks => self.search_tracks.show(session, activation).await,
      ScreenId::SearchAlbums => self.search_albums.show(session, activation).await,
    }
  }

  /// Runs screens from the home menu until one of them exits. Any error is
  /// handed back to the caller and ends the session.
  pub async fn run<C: SpotifyApi, L: Launcher>(&mut self, session: &mut Session<C, L>) -> Result<()> {
    let mut next = Transition::to(ScreenId::Main);
    loop {
      match next {
        Transition::Exit => return Ok(()),
        Transition::Show {
          screen,
          parent,
          activation,
        } => {
          if let Some(parent) = parent {
            self.set_parent(screen, parent);
          }
          debug!("showing {:?}", screen);
          next = self.show(screen, session, activation).await?;
        }
      }
    }
  }
}
