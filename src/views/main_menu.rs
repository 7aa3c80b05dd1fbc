use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::{Icons, UserConfig};
use crate::core::format::{format_icon, format_title};
use crate::core::menu::{Keybinding, Launcher, Menu, Outcome, Row};
use crate::core::model::{primary_artist, PlayerState, RepeatState};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;

const NOTHING_PLAYING: &str = "Nothing is currently playing.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainAction {
  PlayPause,
  NextTrack,
  PreviousTrack,
  ToggleRepeat,
  ToggleShuffle,
}

/// Home screen: one entry per section, the now-playing line as prompt and
/// free text as a shortcut into track search.
pub struct MainMenu {
  menu: Menu<MainAction>,
  entries: Vec<(String, ScreenId)>,
  parent: Option<ScreenId>,
}

impl MainMenu {
  pub fn new(config: &UserConfig) -> Self {
    let icons = &config.icons;
    let entries = vec![
      (format_icon(&icons.player, "Player"), ScreenId::Player),
      (format_icon(&icons.search, "Search"), ScreenId::Search),
      (
        format_icon(&icons.liked_tracks, "Liked Tracks"),
        ScreenId::LikedTracks,
      ),
      (format_icon(&icons.album, "Albums"), ScreenId::SavedAlbums),
      (format_icon(&icons.playlist, "Playlists"), ScreenId::Playlists),
      (format_icon(&icons.queue, "Queue"), ScreenId::Queue),
      (
        format_icon(&icons.recently_played, "Recently Played"),
        ScreenId::RecentlyPlayed,
      ),
      (format_icon(&icons.device, "Devices"), ScreenId::Devices),
    ];

    let keys = &config.keys;
    let menu = Menu {
      ignore_case: true,
      rows: entries
        .iter()
        .enumerate()
        .map(|(i, (title, _))| Row::new(title.clone(), i.to_string()))
        .collect(),
      keys: vec![
        Keybinding::new(
          MainAction::PlayPause,
          &keys.toggle_pause_resume,
          "Play/Pause",
        ),
        Keybinding::new(MainAction::NextTrack, &keys.next_track, "Next track"),
        Keybinding::new(
          MainAction::PreviousTrack,
          &keys.previous_track,
          "Previous track",
        ),
        Keybinding::new(MainAction::ToggleRepeat, &keys.toggle_repeat, "Repeat"),
        Keybinding::new(MainAction::ToggleShuffle, &keys.toggle_shuffle, "Shuffle"),
      ],
      ..Default::default()
    };

    MainMenu {
      menu,
      entries,
      parent: None,
    }
  }

  fn target(&self, row: &Row) -> Option<ScreenId> {
    row
      .value
      .parse::<usize>()
      .ok()
      .and_then(|i| self.entries.get(i))
      .map(|(_, screen)| *screen)
  }
}

/// The now-playing line: state icon, title and the shuffle and repeat icons.
pub fn status_line(icons: &Icons, state: Option<&PlayerState>) -> String {
  let state = match state {
    Some(state) => state,
    None => return NOTHING_PLAYING.to_string(),
  };

  let status = if state.is_playing {
    &icons.play
  } else {
    &icons.pause
  };
  let shuffle = if state.shuffle_state {
    &icons.shuffle_on
  } else {
    &icons.shuffle_off
  };
  let repeat = match state.repeat_state {
    RepeatState::Off => &icons.repeat_off,
    RepeatState::Context => &icons.repeat_context,
    RepeatState::Track => &icons.repeat_track,
  };
  let title = state
    .item
    .as_ref()
    .map(|item| format_title(&item.name, primary_artist(&item.artists).unwrap_or_default()))
    .unwrap_or_default();

  format!("{} | {} | {} {}", status, title, shuffle, repeat)
}

impl Screen for MainMenu {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let state = match session.client().current_playback().await {
      Ok(state) => state,
      Err(e) => {
        session.report(errors::GET_PLAYER_STATE, e.context("home status")).await;
        return Err(anyhow::anyhow!("the player state is unavailable"));
      }
    };

    self.menu.prompt = status_line(&session.config.icons, state.as_ref());
    self.menu.message = session.help_message(&self.menu.keys);

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => match self.target(&row) {
        Some(screen) => Ok(Transition::to(screen)),
        None if row.title.is_empty() => Ok(Transition::to(ScreenId::Main)),
        None => Ok(Transition::child(
          ScreenId::SearchTracks,
          ScreenId::Main,
          Activation::Query(row.title),
        )),
      },
      Outcome::CustomKey { key, .. } => {
        let player = &session.player;
        let (result, message) = match key {
          MainAction::PlayPause => (player.play_pause().await, errors::PLAY_PAUSE),
          MainAction::NextTrack => (player.next().await, errors::SKIP_TRACK),
          MainAction::PreviousTrack => (player.previous().await, errors::PREVIOUS_TRACK),
          MainAction::ToggleRepeat => (player.toggle_repeat().await, errors::UPDATE_PLAYER),
          MainAction::ToggleShuffle => (player.toggle_shuffle().await, errors::UPDATE_PLAYER),
        };
        if let Err(e) = result {
          session.report(message, e).await;
        }
        Ok(Transition::to(ScreenId::Main))
      }
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
