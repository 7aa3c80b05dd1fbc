//! Wire models for the subset of the Spotify Web API the menus need.
//!
//! Only the fields the screens actually read are modelled; everything else in
//! the payloads is ignored by serde.

pub use rspotify::model::enums::RepeatState;
use serde::{Deserialize, Deserializer};

/// Local files come back with `null` ids and uris; they read as empty.
fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Artist {
  pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Album {
  pub name: String,
  #[serde(default)]
  pub artists: Vec<Artist>,
  #[serde(default, deserialize_with = "nullable_string")]
  pub uri: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Track {
  pub name: String,
  #[serde(default)]
  pub artists: Vec<Artist>,
  // Simplified tracks (album track listings) carry no album.
  #[serde(default)]
  pub album: Option<Album>,
  #[serde(default, deserialize_with = "nullable_string")]
  pub uri: String,
  #[serde(default)]
  pub duration_ms: u64,
}

/// An album together with its first page of tracks, as returned by
/// `GET /albums/{id}` and inside saved-album items.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FullAlbum {
  #[serde(flatten)]
  pub album: Album,
  #[serde(default)]
  pub tracks: Page<Track>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Playlist {
  pub name: String,
  #[serde(default)]
  pub uri: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Device {
  // Restricted devices are reported without an id.
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PlayerState {
  #[serde(default)]
  pub shuffle_state: bool,
  #[serde(default = "default_repeat_state")]
  pub repeat_state: RepeatState,
  #[serde(default)]
  pub progress_ms: Option<u64>,
  #[serde(default)]
  pub item: Option<Track>,
  #[serde(default)]
  pub is_playing: bool,
}

fn default_repeat_state() -> RepeatState {
  RepeatState::Off
}

impl Default for PlayerState {
  fn default() -> Self {
    PlayerState {
      shuffle_state: false,
      repeat_state: RepeatState::Off,
      progress_ms: None,
      item: None,
      is_playing: false,
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Page<T> {
  #[serde(default = "Vec::new")]
  pub items: Vec<T>,
  #[serde(default)]
  pub total: u32,
  #[serde(default)]
  pub limit: u32,
  #[serde(default)]
  pub offset: u32,
}

impl<T> Default for Page<T> {
  fn default() -> Self {
    Page {
      items: Vec::new(),
      total: 0,
      limit: 0,
      offset: 0,
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SavedTrack {
  pub track: Track,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SavedAlbum {
  pub album: FullAlbum,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PlayHistory {
  pub track: Track,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RecentlyPlayed {
  #[serde(default)]
  pub items: Vec<PlayHistory>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Queue {
  #[serde(default)]
  pub currently_playing: Option<Track>,
  #[serde(default)]
  pub queue: Vec<Track>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DevicePayload {
  #[serde(default)]
  pub devices: Vec<Device>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SearchResults {
  #[serde(default)]
  pub tracks: Option<Page<Track>>,
  #[serde(default)]
  pub albums: Option<Page<Album>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
  Track,
  Album,
}

impl SearchKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      SearchKind::Track => "track",
      SearchKind::Album => "album",
    }
  }
}

/// Returns the first artist's name, which is what every row and title shows.
pub fn primary_artist(artists: &[Artist]) -> Option<&str> {
  artists.first().map(|artist| artist.name.as_str())
}

/// Extracts the id from a `spotify:<type>:<id>` uri.
pub fn uri_to_id(uri: &str) -> Option<&str> {
  let mut parts = uri.split(':');
  match (parts.next(), parts.next(), parts.next(), parts.next()) {
    (Some("spotify"), Some(_), Some(id), None) if !id.is_empty() => Some(id),
    _ => None,
  }
}
