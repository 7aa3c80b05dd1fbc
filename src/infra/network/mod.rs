pub mod library;
pub mod playback;
pub mod requests;
pub mod search;
pub mod user;

use rspotify::{AuthCodeSpotify, Config, Credentials, OAuth, Token};

pub use self::library::LibraryApi;
pub use self::playback::PlaybackApi;
pub use self::search::SearchApi;
pub use self::user::UserApi;

/// Everything the screens may ask of the Web API.
pub trait SpotifyApi: PlaybackApi + LibraryApi + SearchApi + UserApi {}

impl<T: PlaybackApi + LibraryApi + SearchApi + UserApi> SpotifyApi for T {}

/// Web API client authenticated from a stored refresh token.
pub struct Network {
  pub spotify: AuthCodeSpotify,
  pub http: reqwest::Client,
}

impl Network {
  pub fn new(client_id: &str, client_secret: &str, refresh_token: &str) -> Self {
    // No access token yet; the first request exchanges the refresh token.
    let token = Token {
      refresh_token: Some(refresh_token.to_string()),
      ..Default::default()
    };
    let spotify = AuthCodeSpotify::from_token_with_config(
      token,
      Credentials::new(client_id, client_secret),
      OAuth::default(),
      Config::default(),
    );

    Network {
      spotify,
      http: reqwest::Client::new(),
    }
  }
}

/// `device_id` query parameter for the player endpoints, when one is set.
pub(crate) fn device_query(device: Option<&str>) -> Vec<(&'static str, String)> {
  device
    .map(|id| vec![("device_id", id.to_string())])
    .unwrap_or_default()
}
