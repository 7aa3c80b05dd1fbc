use super::requests::{spotify_get_optional_for, spotify_get_typed_for, spotify_send_for};
use super::{device_query, Network};
use crate::core::model::{PlayerState, Queue, RepeatState};
use anyhow::Result;
use reqwest::Method;
use serde_json::json;

pub trait PlaybackApi {
  /// `None` when no device is playing anything.
  async fn current_playback(&self) -> Result<Option<PlayerState>>;
  async fn resume(&self, device: Option<&str>) -> Result<()>;
  async fn pause(&self, device: Option<&str>) -> Result<()>;
  async fn next_track(&self, device: Option<&str>) -> Result<()>;
  async fn previous_track(&self, device: Option<&str>) -> Result<()>;
  async fn play_track(&self, uri: &str, device: Option<&str>) -> Result<()>;
  async fn play_context(
    &self,
    context_uri: &str,
    offset_uri: Option<&str>,
    device: Option<&str>,
  ) -> Result<()>;
  async fn add_to_queue(&self, uri: &str, device: Option<&str>) -> Result<()>;
  async fn set_shuffle(&self, state: bool, device: Option<&str>) -> Result<()>;
  async fn set_repeat(&self, state: RepeatState, device: Option<&str>) -> Result<()>;
  async fn queue(&self) -> Result<Queue>;
}

fn repeat_param(state: RepeatState) -> &'static str {
  match state {
    RepeatState::Off => "off",
    RepeatState::Track => "track",
    RepeatState::Context => "context",
  }
}

fn play_context_body(context_uri: &str, offset_uri: Option<&str>) -> serde_json::Value {
  match offset_uri {
    Some(uri) => json!({ "context_uri": context_uri, "offset": { "uri": uri } }),
    None => json!({ "context_uri": context_uri }),
  }
}

impl PlaybackApi for Network {
  async fn current_playback(&self) -> Result<Option<PlayerState>> {
    spotify_get_optional_for(self, "me/player", &[]).await
  }

  async fn resume(&self, device: Option<&str>) -> Result<()> {
    spotify_send_for(self, Method::PUT, "me/player/play", &device_query(device), None).await
  }

  async fn pause(&self, device: Option<&str>) -> Result<()> {
    spotify_send_for(self, Method::PUT, "me/player/pause", &device_query(device), None).await
  }

  async fn next_track(&self, device: Option<&str>) -> Result<()> {
    spotify_send_for(self, Method::POST, "me/player/next", &device_query(device), None).await
  }

  async fn previous_track(&self, device: Option<&str>) -> Result<()> {
    spotify_send_for(
      self,
      Method::POST,
      "me/player/previous",
      &device_query(device),
      None,
    )
    .await
  }

  async fn play_track(&self, uri: &str, device: Option<&str>) -> Result<()> {
    spotify_send_for(
      self,
      Method::PUT,
      "me/player/play",
      &device_query(device),
      Some(json!({ "uris": [uri] })),
    )
    .await
  }

  async fn play_context(
    &self,
    context_uri: &str,
    offset_uri: Option<&str>,
    device: Option<&str>,
  ) -> Result<()> {
    spotify_send_for(
      self,
      Method::PUT,
      "me/player/play",
      &device_query(device),
      Some(play_context_body(context_uri, offset_uri)),
    )
    .await
  }

  async fn add_to_queue(&self, uri: &str, device: Option<&str>) -> Result<()> {
    let mut query = vec![("uri", uri.to_string())];
    query.extend(device_query(device));
    spotify_send_for(self, Method::POST, "me/player/queue", &query, None).await
  }

  async fn set_shuffle(&self, state: bool, device: Option<&str>) -> Result<()> {
    let mut query = vec![("state", state.to_string())];
    query.extend(device_query(device));
    spotify_send_for(self, Method::PUT, "me/player/shuffle", &query, None).await
  }

  async fn set_repeat(&self, state: RepeatState, device: Option<&str>) -> Result<()> {
    let mut query = vec![("state", repeat_param(state).to_string())];
    query.extend(device_query(device));
    spotify_send_for(self, Method::PUT, "me/player/repeat", &query, None).await
  }

  async fn queue(&self) -> Result<Queue> {
    spotify_get_typed_for(self, "me/player/queue", &[]).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn repeat_param_test() {
    assert_eq!(repeat_param(RepeatState::Off), "off");
    assert_eq!(repeat_param(RepeatState::Track), "track");
    assert_eq!(repeat_param(RepeatState::Context), "context");
  }

  #[test]
  fn play_context_body_test() {
    assert_eq!(
      play_context_body("spotify:album:a", None),
      json!({ "context_uri": "spotify:album:a" })
    );
    assert_eq!(
      play_context_body("spotify:album:a", Some("spotify:track:t")),
      json!({ "context_uri": "spotify:album:a", "offset": { "uri": "spotify:track:t" } })
    );
  }
}
