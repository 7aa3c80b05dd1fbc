use super::requests::spotify_get_typed_for;
use super::Network;
use crate::core::model::{Device, DevicePayload, RecentlyPlayed};
use anyhow::Result;

pub trait UserApi {
  async fn devices(&self) -> Result<Vec<Device>>;
  async fn recently_played(&self) -> Result<RecentlyPlayed>;
}

impl UserApi for Network {
  async fn devices(&self) -> Result<Vec<Device>> {
    let payload: DevicePayload = spotify_get_typed_for(self, "me/player/devices", &[]).await?;
    Ok(payload.devices)
  }

  async fn recently_played(&self) -> Result<RecentlyPlayed> {
    spotify_get_typed_for(self, "me/player/recently-played", &[]).await
  }
}
