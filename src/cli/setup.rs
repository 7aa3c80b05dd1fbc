//! Interactive first-run setup: asks for the app credentials, runs the
//! authorization code flow through the browser and stores the refresh token.

use crate::core::config::UserConfig;
use crate::infra::redirect_uri::CallbackServer;
use anyhow::{anyhow, Result};
use log::info;
use rspotify::{prelude::*, AuthCodeSpotify, Credentials, OAuth};
use std::io::{self, BufRead, Write};

const SCOPES: [&str; 9] = [
  "user-library-read",
  "user-read-currently-playing",
  "user-read-playback-state",
  "user-read-recently-played",
  "user-library-modify",
  "user-modify-playback-state",
  "playlist-modify-private",
  "playlist-read-private",
  "playlist-modify-public",
];

// Read from plain stdin, so the secret is echoed.
const SECRET_PROMPT: &str =
  "Click on 'Show Client Secret' and enter the Client Secret (it will be visible as you type):";

pub fn redirect_uri(host: &str, port: u16) -> String {
  format!("http://{}:{}", host, port)
}

fn instructions(redirect_uri: &str) -> String {
  format!(
    "Welcome to spofi setup!

WARNING: If you already have configured spofi, this will overwrite your current credentials.

1) Visit https://developer.spotify.com/dashboard/applications and click on \"Create an app\".
2) Enter a name and description.
3) Add '{}' to the \"Redirect URIs\" and save the settings.
4) Enter the app details in the following steps.
",
    redirect_uri
  )
}

/// Asks until a non-empty answer is given. End of input cancels the setup.
pub fn prompt_required<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
  loop {
    write!(output, "{} ", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      return Err(anyhow!("Setup cancelled."));
    }

    let answer = line.trim();
    if !answer.is_empty() {
      return Ok(answer.to_string());
    }
    writeln!(output, "A value is required.")?;
  }
}

fn build_auth_client(client_id: &str, client_secret: &str, redirect_uri: String) -> AuthCodeSpotify {
  let oauth = OAuth {
    redirect_uri,
    scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
    ..Default::default()
  };
  AuthCodeSpotify::new(Credentials::new(client_id, client_secret), oauth)
}

/// Waits for the browser to come back with a code and trades it for tokens.
/// Returns the refresh token.
async fn authorize(spotify: &AuthCodeSpotify, host: &str, port: u16) -> Result<String> {
  let (server, code) = CallbackServer::start(host, port)?;
  let auth_url = spotify.get_authorize_url(false)?;

  println!(
    "\nPlease follow the steps in your web browser and log in using your Spotify account. \
If the URL did not open automatically, please manually open the following URL:"
  );
  println!("{}", auth_url);
  if let Err(e) = open::that(&auth_url) {
    println!("Failed to open browser automatically: {}", e);
  }

  let code = code
    .await
    .map_err(|_| anyhow!("the callback listener stopped before receiving a code"));
  server.shutdown();
  let code = code?.map_err(|e| anyhow!("authorization was denied: {}", e))?;

  info!("authorization code received, requesting tokens");
  spotify.request_token(&code).await?;

  let token = spotify
    .token
    .lock()
    .await
    .map_err(|_| anyhow!("Failed to lock token"))?;
  token
    .as_ref()
    .and_then(|token| token.refresh_token.clone())
    .ok_or_else(|| anyhow!("Spotify did not return a refresh token"))
}

/// Runs the whole wizard and saves the credentials into `config`.
pub async fn run(config: &mut UserConfig, host: &str, port: u16) -> Result<()> {
  let redirect_uri = redirect_uri(host, port);
  println!("{}", instructions(&redirect_uri));

  let (client_id, client_secret) = {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    (
      prompt_required(&mut input, &mut output, "Enter the Client ID:")?,
      prompt_required(&mut input, &mut output, SECRET_PROMPT)?,
    )
  };

  let spotify = build_auth_client(&client_id, &client_secret, redirect_uri);
  let refresh_token = authorize(&spotify, host, port).await?;

  config.spotify.client_id = client_id;
  config.spotify.client_secret = client_secret;
  config.spotify.refresh_token = refresh_token;
  config.save_config()?;

  info!("setup finished");
  println!("\nSetup finished. You can now use spofi to control spotify.");
  Ok(())
}
