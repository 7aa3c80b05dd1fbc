use super::requests::spotify_get_typed_for;
use super::Network;
use crate::core::model::{FullAlbum, Page, Playlist, SavedAlbum, SavedTrack};
use anyhow::Result;

pub trait LibraryApi {
  async fn liked_tracks(&self, limit: u32, offset: u32) -> Result<Page<SavedTrack>>;
  async fn saved_albums(&self, limit: u32, offset: u32) -> Result<Page<SavedAlbum>>;
  async fn playlists(&self, limit: u32, offset: u32) -> Result<Page<Playlist>>;
  async fn album(&self, id: &str) -> Result<FullAlbum>;
}

fn page_query(limit: u32, offset: u32) -> [(&'static str, String); 2] {
  [("limit", limit.to_string()), ("offset", offset.to_string())]
}

impl LibraryApi for Network {
  async fn liked_tracks(&self, limit: u32, offset: u32) -> Result<Page<SavedTrack>> {
    spotify_get_typed_for(self, "me/tracks", &page_query(limit, offset)).await
  }

  async fn saved_albums(&self, limit: u32, offset: u32) -> Result<Page<SavedAlbum>> {
    spotify_get_typed_for(self, "me/albums", &page_query(limit, offset)).await
  }

  async fn playlists(&self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
    spotify_get_typed_for(self, "me/playlists", &page_query(limit, offset)).await
  }

  async fn album(&self, id: &str) -> Result<FullAlbum> {
    spotify_get_typed_for(self, &format!("albums/{}", id), &[]).await
  }
}
