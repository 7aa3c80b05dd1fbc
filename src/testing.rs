//! Scripted stand-ins for rofi and the Web API used across the unit tests.

use crate::core::config::UserConfig;
use crate::core::menu::{Launcher, LauncherReply};
use crate::core::model::{
  Album, Artist, Device, FullAlbum, Page, PlayHistory, PlayerState, Playlist, Queue,
  RecentlyPlayed, RepeatState, SavedAlbum, SavedTrack, SearchKind, SearchResults, Track,
  uri_to_id,
};
use crate::core::session::Session;
use crate::infra::network::{LibraryApi, PlaybackApi, SearchApi, UserApi};
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

/// One scripted rofi interaction.
#[derive(Clone, Debug)]
pub enum Step {
  /// Choose the n-th line fed to rofi (the back entry is line 0 when shown).
  Pick(usize),
  /// Press custom key `slot` (1-based) with line n highlighted.
  Key(i32, usize),
  /// Submit free text.
  Type(String),
  Cancel,
  /// Exit with an arbitrary status and no output.
  Status(i32),
}

/// Plays back a list of [`Step`]s. Once the script runs out every menu is
/// cancelled, which unwinds any navigation back to the home screen.
#[derive(Default)]
pub struct FakeLauncher {
  script: RefCell<VecDeque<Step>>,
  menus: RefCell<Vec<(Vec<String>, String)>>,
  errors: RefCell<Vec<Vec<String>>>,
}

impl FakeLauncher {
  pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
    FakeLauncher {
      script: RefCell::new(steps.into_iter().collect()),
      ..Default::default()
    }
  }

  /// Arguments of every menu shown so far.
  pub fn menu_args(&self) -> Vec<Vec<String>> {
    self.menus.borrow().iter().map(|(args, _)| args.clone()).collect()
  }

  /// Input lines of every menu shown so far.
  pub fn menu_lines(&self) -> Vec<Vec<String>> {
    self
      .menus
      .borrow()
      .iter()
      .map(|(_, input)| input.lines().map(str::to_string).collect())
      .collect()
  }

  /// Value following `-p` for every menu shown so far.
  pub fn prompts(&self) -> Vec<String> {
    self
      .menu_args()
      .into_iter()
      .map(|args| arg_value(&args, "-p").unwrap_or_default())
      .collect()
  }

  pub fn error_args(&self) -> Vec<Vec<String>> {
    self.errors.borrow().clone()
  }

  /// Messages of every error dialog shown so far.
  pub fn errors(&self) -> Vec<String> {
    self
      .errors
      .borrow()
      .iter()
      .filter_map(|args| args.get(1).cloned())
      .collect()
  }
}

pub fn arg_value(args: &[String], flag: &str) -> Option<String> {
  args
    .iter()
    .position(|arg| arg == flag)
    .and_then(|i| args.get(i + 1).cloned())
}

fn line(input: &str, n: usize) -> String {
  input.lines().nth(n).unwrap_or_default().to_string()
}

impl Launcher for FakeLauncher {
  async fn select(&self, args: Vec<String>, input: String) -> Result<LauncherReply> {
    self.menus.borrow_mut().push((args, input.clone()));
    let step = self.script.borrow_mut().pop_front().unwrap_or(Step::Cancel);

    let (status, output) = match step {
      Step::Pick(n) => (0, line(&input, n)),
      Step::Key(slot, n) => (9 + slot, line(&input, n)),
      Step::Type(text) => (0, text),
      Step::Cancel => (1, String::new()),
      Step::Status(status) => (status, String::new()),
    };
    Ok(LauncherReply { status, output })
  }

  async fn show_error(&self, args: Vec<String>) -> Result<()> {
    self.errors.borrow_mut().push(args);
    Ok(())
  }
}

/// In-memory Web API. Every call is logged as `name args... device`, with
/// `-` standing in for a missing device; calls named in `fail` return an
/// error after being logged.
#[derive(Default)]
pub struct FakeSpotify {
  player: RefCell<Option<PlayerState>>,
  pub devices: RefCell<Vec<Device>>,
  pub liked: RefCell<Vec<Track>>,
  pub albums: RefCell<Vec<FullAlbum>>,
  pub playlists: RefCell<Vec<Playlist>>,
  pub queue: RefCell<Vec<Track>>,
  pub recent: RefCell<Vec<Track>>,
  calls: RefCell<Vec<String>>,
  failing: RefCell<HashSet<String>>,
}

impl FakeSpotify {
  pub fn set_player(&self, state: Option<PlayerState>) {
    *self.player.borrow_mut() = state;
  }

  pub fn player(&self) -> Option<PlayerState> {
    self.player.borrow().clone()
  }

  pub fn fail(&self, call: &str) {
    self.failing.borrow_mut().insert(call.to_string());
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  /// Logged calls other than the player-state reads every home render does.
  pub fn actions(&self) -> Vec<String> {
    self
      .calls()
      .into_iter()
      .filter(|call| call != "current_playback")
      .collect()
  }

  fn record(&self, name: &str, args: &[&str]) -> Result<()> {
    let mut call = name.to_string();
    for arg in args {
      call.push(' ');
      call.push_str(arg);
    }
    self.calls.borrow_mut().push(call);

    if self.failing.borrow().contains(name) {
      return Err(anyhow!("{} failed", name));
    }
    Ok(())
  }

  fn update_player(&self, update: impl FnOnce(&mut PlayerState)) {
    if let Some(state) = self.player.borrow_mut().as_mut() {
      update(state);
    }
  }
}

fn page<T: Clone>(items: &[T], limit: u32, offset: u32) -> Page<T> {
  Page {
    items: items
      .iter()
      .skip(offset as usize)
      .take(limit as usize)
      .cloned()
      .collect(),
    total: items.len() as u32,
    limit,
    offset,
  }
}

impl PlaybackApi for FakeSpotify {
  async fn current_playback(&self) -> Result<Option<PlayerState>> {
    self.record("current_playback", &[])?;
    Ok(self.player())
  }

  async fn resume(&self, device: Option<&str>) -> Result<()> {
    self.record("resume", &[device.unwrap_or("-")])?;
    self.update_player(|state| state.is_playing = true);
    Ok(())
  }

  async fn pause(&self, device: Option<&str>) -> Result<()> {
    self.record("pause", &[device.unwrap_or("-")])?;
    self.update_player(|state| state.is_playing = false);
    Ok(())
  }

  async fn next_track(&self, device: Option<&str>) -> Result<()> {
    self.record("next_track", &[device.unwrap_or("-")])
  }

  async fn previous_track(&self, device: Option<&str>) -> Result<()> {
    self.record("previous_track", &[device.unwrap_or("-")])
  }

  async fn play_track(&self, uri: &str, device: Option<&str>) -> Result<()> {
    self.record("play_track", &[uri, device.unwrap_or("-")])
  }

  async fn play_context(
    &self,
    context_uri: &str,
    offset_uri: Option<&str>,
    device: Option<&str>,
  ) -> Result<()> {
    self.record(
      "play_context",
      &[
        context_uri,
        offset_uri.unwrap_or("-"),
        device.unwrap_or("-"),
      ],
    )
  }

  async fn add_to_queue(&self, uri: &str, device: Option<&str>) -> Result<()> {
    self.record("add_to_queue", &[uri, device.unwrap_or("-")])
  }

  async fn set_shuffle(&self, state: bool, device: Option<&str>) -> Result<()> {
    self.record("set_shuffle", &[&state.to_string(), device.unwrap_or("-")])?;
    self.update_player(|player| player.shuffle_state = state);
    Ok(())
  }

  async fn set_repeat(&self, state: RepeatState, device: Option<&str>) -> Result<()> {
    self.record(
      "set_repeat",
      &[&format!("{:?}", state), device.unwrap_or("-")],
    )?;
    self.update_player(|player| player.repeat_state = state);
    Ok(())
  }

  async fn queue(&self) -> Result<Queue> {
    self.record("queue", &[])?;
    Ok(Queue {
      currently_playing: None,
      queue: self.queue.borrow().clone(),
    })
  }
}

impl LibraryApi for FakeSpotify {
  async fn liked_tracks(&self, limit: u32, offset: u32) -> Result<Page<SavedTrack>> {
    self.record("liked_tracks", &[&limit.to_string(), &offset.to_string()])?;
    let saved: Vec<SavedTrack> = self
      .liked
      .borrow()
      .iter()
      .map(|track| SavedTrack {
        track: track.clone(),
      })
      .collect();
    Ok(page(&saved, limit, offset))
  }

  async fn saved_albums(&self, limit: u32, offset: u32) -> Result<Page<SavedAlbum>> {
    self.record("saved_albums", &[&limit.to_string(), &offset.to_string()])?;
    let saved: Vec<SavedAlbum> = self
      .albums
      .borrow()
      .iter()
      .map(|album| SavedAlbum {
        album: album.clone(),
      })
      .collect();
    Ok(page(&saved, limit, offset))
  }

  async fn playlists(&self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
    self.record("playlists", &[&limit.to_string(), &offset.to_string()])?;
    Ok(page(&self.playlists.borrow(), limit, offset))
  }

  async fn album(&self, id: &str) -> Result<FullAlbum> {
    self.record("album", &[id])?;
    self
      .albums
      .borrow()
      .iter()
      .find(|album| uri_to_id(&album.album.uri) == Some(id))
      .cloned()
      .ok_or_else(|| anyhow!("no album {}", id))
  }
}

impl SearchApi for FakeSpotify {
  async fn search(&self, query: &str, kind: SearchKind) -> Result<SearchResults> {
    self.record("search", &[query, kind.as_str()])?;
    let matches = |name: &str| name.to_lowercase().contains(&query.to_lowercase());
    Ok(match kind {
      SearchKind::Track => SearchResults {
        tracks: Some(Page {
          items: self
            .liked
            .borrow()
            .iter()
            .filter(|track| matches(&track.name))
            .cloned()
            .collect(),
          ..Default::default()
        }),
        albums: None,
      },
      SearchKind::Album => SearchResults {
        tracks: None,
        albums: Some(Page {
          items: self
            .albums
            .borrow()
            .iter()
            .map(|album| album.album.clone())
            .filter(|album| matches(&album.name))
            .collect(),
          ..Default::default()
        }),
      },
    })
  }
}

impl UserApi for FakeSpotify {
  async fn devices(&self) -> Result<Vec<Device>> {
    self.record("devices", &[])?;
    Ok(self.devices.borrow().clone())
  }

  async fn recently_played(&self) -> Result<RecentlyPlayed> {
    self.record("recently_played", &[])?;
    Ok(RecentlyPlayed {
      items: self
        .recent
        .borrow()
        .iter()
        .map(|track| PlayHistory {
          track: track.clone(),
        })
        .collect(),
    })
  }
}

pub fn track(name: &str) -> Track {
  Track {
    name: name.to_string(),
    artists: vec![Artist {
      name: format!("{} Band", name),
    }],
    uri: format!("spotify:track:{}", name.to_lowercase()),
    duration_ms: 180_000,
    ..Default::default()
  }
}

pub fn tracks(count: usize) -> Vec<Track> {
  (1..=count).map(|i| track(&format!("Track{:02}", i))).collect()
}

pub fn album(name: &str, track_names: &[&str]) -> FullAlbum {
  let id = name.to_lowercase();
  FullAlbum {
    album: Album {
      name: name.to_string(),
      artists: vec![Artist {
        name: format!("{} Artist", name),
      }],
      uri: format!("spotify:album:{}", id),
    },
    tracks: Page {
      items: track_names.iter().map(|name| track(name)).collect(),
      total: track_names.len() as u32,
      ..Default::default()
    },
  }
}

pub fn playlist(name: &str) -> Playlist {
  Playlist {
    uri: format!("spotify:playlist:{}", name.to_lowercase()),
    name: name.to_string(),
  }
}

/// A session over the fakes, with no config file and no device selected.
pub fn session(spotify: FakeSpotify, launcher: FakeLauncher) -> Session<FakeSpotify, FakeLauncher> {
  Session::new(UserConfig::new(), spotify, launcher, None)
}
