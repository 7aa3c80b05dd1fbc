use super::{back, errors, Activation, Screen, ScreenId, Transition};
use crate::core::config::{Icons, UserConfig};
use crate::core::format::{escape_markup, format_icon, format_time};
use crate::core::menu::{Launcher, Menu, Outcome, Row};
use crate::core::model::{primary_artist, PlayerState, RepeatState};
use crate::core::session::Session;
use crate::infra::network::SpotifyApi;
use anyhow::Result;
use std::convert::Infallible;

const TOGGLE_PAUSE: &str = "player_toggle_pause";
const NEXT: &str = "player_next";
const PREVIOUS: &str = "player_previous";
const TOGGLE_SHUFFLE: &str = "player_toggle_shuffle";
const TOGGLE_REPEAT: &str = "player_toggle_repeat";

/// Transport controls with the current track, progress and modes.
pub struct PlayerScreen {
  menu: Menu<Infallible>,
  parent: Option<ScreenId>,
}

impl PlayerScreen {
  pub fn new(config: &UserConfig) -> Self {
    let mut menu = Menu::list(format_icon(&config.icons.player, "Player"), Vec::new());
    menu.markup_rows = true;
    PlayerScreen { menu, parent: None }
  }
}

/// Rows for the given player state; markup underlines the active modes.
pub fn player_rows(icons: &Icons, state: Option<&PlayerState>) -> Vec<Row> {
  let mut play_pause = format_icon(&icons.player, "Nothing is currently playing.");
  let mut shuffle = format_icon(&icons.shuffle_on, "Shuffle");
  let mut repeat = format_icon(&icons.repeat_context, "Repeat");

  if let Some(state) = state {
    if let Some(item) = &state.item {
      let icon = if state.is_playing {
        &icons.pause
      } else {
        &icons.play
      };
      play_pause = format!(
        "{} | {} | {} | {}/{}",
        icon,
        format_icon(&icons.track, &escape_markup(&item.name)),
        escape_markup(primary_artist(&item.artists).unwrap_or_default()),
        format_time(state.progress_ms.unwrap_or_default()),
        format_time(item.duration_ms),
      );
    }

    repeat = match state.repeat_state {
      RepeatState::Off => format_icon(&icons.repeat_off, "Repeat <u>off</u> context track"),
      RepeatState::Context => {
        format_icon(&icons.repeat_context, "Repeat off <u>context</u> track")
      }
      RepeatState::Track => format_icon(&icons.repeat_track, "Repeat off context <u>track</u>"),
    };

    shuffle = if state.shuffle_state {
      format_icon(&icons.shuffle_on, "Shuffle <u>true</u> false")
    } else {
      format_icon(&icons.shuffle_off, "Shuffle true <u>false</u>")
    };
  }

  vec![
    Row::new(play_pause, TOGGLE_PAUSE),
    Row::new(format_icon(&icons.next, "Next"), NEXT),
    Row::new(format_icon(&icons.previous, "Previous"), PREVIOUS),
    Row::new(shuffle, TOGGLE_SHUFFLE),
    Row::new(repeat, TOGGLE_REPEAT),
  ]
}

impl Screen for PlayerScreen {
  async fn show<C: SpotifyApi, L: Launcher>(
    &mut self,
    session: &mut Session<C, L>,
    _activation: Activation,
  ) -> Result<Transition> {
    let state = match session.client().current_playback().await {
      Ok(state) => state,
      Err(e) => {
        session.report(errors::GET_PLAYER_STATE, e).await;
        return Ok(back(self.parent));
      }
    };

    self.menu.rows = player_rows(&session.config.icons, state.as_ref());

    match session.run_menu(&mut self.menu).await? {
      Outcome::Back | Outcome::Cancelled => Ok(back(self.parent)),
      Outcome::Selected(row) => {
        let player = &session.player;
        let result = match row.value.as_str() {
          TOGGLE_PAUSE => player.play_pause().await,
          NEXT => player.next().await,
          PREVIOUS => player.previous().await,
          TOGGLE_SHUFFLE => player.toggle_shuffle().await,
          TOGGLE_REPEAT => player.toggle_repeat().await,
          _ => Ok(()),
        };
        if let Err(e) = result {
          session.report(errors::UPDATE_PLAYER, e).await;
        }
        Ok(Transition::to(ScreenId::Player))
      }
      Outcome::CustomKey { key, .. } => match key {},
    }
  }

  fn set_parent(&mut self, parent: ScreenId) {
    self.parent = Some(parent);
  }
}
