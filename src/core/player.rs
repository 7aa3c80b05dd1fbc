use crate::core::model::RepeatState;
use crate::infra::network::PlaybackApi;
use anyhow::Result;
use log::info;

/// Repeat modes cycle off → context → track → off.
pub fn next_repeat_state(state: RepeatState) -> RepeatState {
  match state {
    RepeatState::Off => RepeatState::Context,
    RepeatState::Context => RepeatState::Track,
    RepeatState::Track => RepeatState::Off,
  }
}

/// Playback controls aimed at the selected device.
///
/// Every call is a single Web API request (two for the toggles, which read
/// the current state first); errors are handed back untouched.
pub struct Player<C> {
  client: C,
  device: Option<String>,
}

impl<C> Player<C> {
  pub fn new(client: C, device: Option<String>) -> Self {
    Player {
      client,
      device: device.filter(|id| !id.is_empty()),
    }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  pub fn device(&self) -> Option<&str> {
    self.device.as_deref()
  }

  pub fn set_device(&mut self, device: impl Into<String>) {
    let device = device.into();
    info!("player now targets device {}", device);
    self.device = Some(device);
  }
}

impl<C: PlaybackApi> Player<C> {
  /// Pauses when something is playing, resumes otherwise.
  pub async fn play_pause(&self) -> Result<()> {
    let playing = self
      .client
      .current_playback()
      .await?
      .is_some_and(|state| state.is_playing);

    if playing {
      self.client.pause(self.device()).await
    } else {
      self.client.resume(self.device()).await
    }
  }

  pub async fn toggle_repeat(&self) -> Result<()> {
    match self.client.current_playback().await? {
      Some(state) => {
        self
          .client
          .set_repeat(next_repeat_state(state.repeat_state), self.device())
          .await
      }
      None => Ok(()),
    }
  }

  pub async fn toggle_shuffle(&self) -> Result<()> {
    match self.client.current_playback().await? {
      Some(state) => {
        self
          .client
          .set_shuffle(!state.shuffle_state, self.device())
          .await
      }
      None => Ok(()),
    }
  }

  pub async fn play_track(&self, uri: &str) -> Result<()> {
    self.client.play_track(uri, self.device()).await
  }

  /// Plays an album or playlist, optionally starting at `offset_uri`.
  pub async fn play_context(&self, context_uri: &str, offset_uri: Option<&str>) -> Result<()> {
    self
      .client
      .play_context(context_uri, offset_uri, self.device())
      .await
  }

  pub async fn add_queue(&self, uri: &str) -> Result<()> {
    self.client.add_to_queue(uri, self.device()).await
  }

  pub async fn next(&self) -> Result<()> {
    self.client.next_track(self.device()).await
  }

  pub async fn previous(&self) -> Result<()> {
    self.client.previous_track(self.device()).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::model::PlayerState;
  use crate::testing::FakeSpotify;

  #[test]
  fn next_repeat_state_test() {
    assert_eq!(next_repeat_state(RepeatState::Off), RepeatState::Context);
    assert_eq!(next_repeat_state(RepeatState::Context), RepeatState::Track);
    assert_eq!(next_repeat_state(RepeatState::Track), RepeatState::Off);
  }

  #[tokio::test]
  async fn toggle_repeat_cycles_through_modes() {
    let spotify = FakeSpotify::default();
    spotify.set_player(Some(PlayerState::default()));
    let player = Player::new(spotify, Some("dev".to_string()));

    let mut seen = Vec::new();
    for _ in 0..3 {
      player.toggle_repeat().await.unwrap();
      seen.push(player.client().player().unwrap().repeat_state);
    }

    assert_eq!(
      seen,
      vec![RepeatState::Context, RepeatState::Track, RepeatState::Off]
    );
  }

  #[tokio::test]
  async fn play_pause_reads_state_first() {
    let spotify = FakeSpotify::default();
    spotify.set_player(Some(PlayerState {
      is_playing: true,
      ..Default::default()
    }));
    let player = Player::new(spotify, Some("dev".to_string()));

    player.play_pause().await.unwrap();
    player.play_pause().await.unwrap();

    assert_eq!(
      player.client().calls(),
      vec!["current_playback", "pause dev", "current_playback", "resume dev"]
    );
  }

  #[tokio::test]
  async fn play_pause_with_nothing_playing_resumes() {
    let player = Player::new(FakeSpotify::default(), None);
    player.play_pause().await.unwrap();
    assert_eq!(player.client().calls(), vec!["current_playback", "resume -"]);
  }

  #[tokio::test]
  async fn toggle_shuffle_negates_current_flag() {
    let spotify = FakeSpotify::default();
    spotify.set_player(Some(PlayerState::default()));
    let player = Player::new(spotify, None);

    player.toggle_shuffle().await.unwrap();
    assert!(player.client().player().unwrap().shuffle_state);
    player.toggle_shuffle().await.unwrap();
    assert!(!player.client().player().unwrap().shuffle_state);
  }

  #[tokio::test]
  async fn toggles_without_playback_do_nothing() {
    let player = Player::new(FakeSpotify::default(), None);
    player.toggle_repeat().await.unwrap();
    player.toggle_shuffle().await.unwrap();
    assert_eq!(
      player.client().calls(),
      vec!["current_playback", "current_playback"]
    );
  }

  #[tokio::test]
  async fn failures_propagate_without_retry() {
    let spotify = FakeSpotify::default();
    spotify.fail("next_track");
    let player = Player::new(spotify, Some("dev".to_string()));

    assert!(player.next().await.is_err());
    assert_eq!(player.client().calls(), vec!["next_track dev"]);
  }

  #[tokio::test]
  async fn set_device_targets_later_calls() {
    let mut player = Player::new(FakeSpotify::default(), Some(String::new()));
    assert_eq!(player.device(), None);

    player.set_device("kitchen");
    player.play_track("spotify:track:1").await.unwrap();
    player
      .play_context("spotify:album:a", Some("spotify:track:2"))
      .await
      .unwrap();
    player.add_queue("spotify:track:3").await.unwrap();

    assert_eq!(
      player.client().calls(),
      vec![
        "play_track spotify:track:1 kitchen",
        "play_context spotify:album:a spotify:track:2 kitchen",
        "add_to_queue spotify:track:3 kitchen",
      ]
    );
  }
}
