use super::Network;
use anyhow::anyhow;
use log::{error, info};
use reqwest::{Method, StatusCode, Url};
use rspotify::clients::BaseClient;
use serde::de::DeserializeOwned;
use serde_json::Value;

const SPOTIFY_API_BASE_URL: &str = "https://api.spotify.com/v1/";

pub fn spotify_api_url(path: &str, query: &[(&str, String)]) -> anyhow::Result<Url> {
  let mut url = Url::parse(SPOTIFY_API_BASE_URL)?.join(path)?;
  if !query.is_empty() {
    let mut qp = url.query_pairs_mut();
    for (k, v) in query {
      qp.append_pair(k, v);
    }
  }
  Ok(url)
}

async fn current_access_token(network: &Network) -> anyhow::Result<Option<String>> {
  let token_lock = network
    .spotify
    .token
    .lock()
    .await
    .map_err(|_| anyhow!("Failed to lock token"))?;
  Ok(
    token_lock
      .as_ref()
      .map(|t| t.access_token.clone())
      .filter(|t| !t.is_empty()),
  )
}

async fn refresh_access_token(network: &Network) -> anyhow::Result<String> {
  network
    .spotify
    .refresh_token()
    .await
    .map_err(|e| anyhow!("token refresh failed: {}", e))?;
  info!("refreshed Spotify access token");
  current_access_token(network)
    .await?
    .ok_or_else(|| anyhow!("No access token available after refresh"))
}

/// Sends one request to the Web API and returns the decoded body, or
/// `Value::Null` for empty (e.g. 204) responses.
///
/// An access token is fetched from the refresh token before the first call.
/// A 401 refreshes it once and repeats the request once; anything else that
/// is not a success is returned as an error.
pub async fn spotify_api_request_json_for(
  network: &Network,
  method: Method,
  path: &str,
  query: &[(&str, String)],
  body: Option<Value>,
) -> anyhow::Result<Value> {
  let url = spotify_api_url(path, query)?;

  let mut access_token = match current_access_token(network).await? {
    Some(token) => token,
    None => refresh_access_token(network).await?,
  };
  let mut refreshed_after_unauthorized = false;

  loop {
    let mut request = network
      .http
      .request(method.clone(), url.clone())
      .header("Authorization", format!("Bearer {}", access_token));

    request = match &body {
      Some(payload) => request.json(payload),
      // Spotify rejects bodiless PUT/POST without a length.
      None if method != Method::GET => request.header("Content-Length", "0"),
      None => request,
    };

    let response = request
      .send()
      .await
      .map_err(|e| anyhow!("Spotify API request failed: {}", e))?;

    if response.status().is_success() {
      if response.status() == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
      }
      let response_body = response.text().await?;
      if response_body.trim().is_empty() {
        return Ok(Value::Null);
      }
      return Ok(serde_json::from_str(&response_body)?);
    }

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED && !refreshed_after_unauthorized {
      refreshed_after_unauthorized = true;
      access_token = refresh_access_token(network).await?;
      continue;
    }

    let body = response.text().await.unwrap_or_default();
    error!("{} {} returned {}", method, path, status);
    return Err(anyhow!("Spotify API {} failed: {}", status, body));
  }
}

/// Drops `null` entries from every array in the payload. Spotify pads some
/// listings (unavailable tracks, deleted playlists) with them.
pub fn normalize_spotify_payload(value: &mut Value) {
  match value {
    Value::Object(map) => {
      for child in map.values_mut() {
        normalize_spotify_payload(child);
      }
    }
    Value::Array(values) => {
      values.retain(|item| !item.is_null());
      for child in values.iter_mut() {
        normalize_spotify_payload(child);
      }
    }
    _ => {}
  }
}

pub async fn spotify_get_typed_for<T: DeserializeOwned>(
  network: &Network,
  path: &str,
  query: &[(&str, String)],
) -> anyhow::Result<T> {
  let mut value = spotify_api_request_json_for(network, Method::GET, path, query, None).await?;
  normalize_spotify_payload(&mut value);
  Ok(serde_json::from_value(value)?)
}

/// Like [`spotify_get_typed_for`], but an empty response means `None`.
pub async fn spotify_get_optional_for<T: DeserializeOwned>(
  network: &Network,
  path: &str,
  query: &[(&str, String)],
) -> anyhow::Result<Option<T>> {
  let mut value = spotify_api_request_json_for(network, Method::GET, path, query, None).await?;
  if value.is_null() {
    return Ok(None);
  }
  normalize_spotify_payload(&mut value);
  Ok(Some(serde_json::from_value(value)?))
}

/// Fires a command endpoint whose response body is irrelevant.
pub async fn spotify_send_for(
  network: &Network,
  method: Method,
  path: &str,
  query: &[(&str, String)],
  body: Option<Value>,
) -> anyhow::Result<()> {
  spotify_api_request_json_for(network, method, path, query, body).await?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn spotify_api_url_test() {
    let url = spotify_api_url(
      "me/player/queue",
      &[
        ("uri", "spotify:track:1".to_string()),
        ("device_id", "abc".to_string()),
      ],
    )
    .unwrap();
    assert_eq!(
      url.as_str(),
      "https://api.spotify.com/v1/me/player/queue?uri=spotify%3Atrack%3A1&device_id=abc"
    );

    let url = spotify_api_url("search", &[("q", "daft punk".to_string())]).unwrap();
    assert_eq!(url.as_str(), "https://api.spotify.com/v1/search?q=daft+punk");
  }

  #[test]
  fn spotify_api_url_without_query() {
    let url = spotify_api_url("albums/xyz", &[]).unwrap();
    assert_eq!(url.as_str(), "https://api.spotify.com/v1/albums/xyz");
  }

  #[test]
  fn normalize_drops_null_items() {
    let mut value = json!({
      "items": [null, { "track": { "name": "a" } }, null],
      "nested": { "queue": [null, { "name": "b" }] },
      "total": 3
    });
    normalize_spotify_payload(&mut value);
    assert_eq!(
      value,
      json!({
        "items": [{ "track": { "name": "a" } }],
        "nested": { "queue": [{ "name": "b" }] },
        "total": 3
      })
    );
  }
}
