//! One-shot HTTP listener for the OAuth redirect of the setup wizard.

use anyhow::{anyhow, Result};
use log::{info, warn};
use reqwest::Url;
use std::{
  io::{prelude::*, ErrorKind},
  net::{SocketAddr, TcpListener, TcpStream},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  thread::{self, JoinHandle},
  time::Duration,
};
use tokio::sync::oneshot;

/// Idle connections (browser preconnects) are dropped after this long so
/// the real redirect is not kept waiting.
const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// What the redirect carried: an authorization code, or the error Spotify
/// reported instead.
pub type CallbackResult = std::result::Result<String, String>;

/// Handle to the background listener thread.
pub struct CallbackServer {
  address: SocketAddr,
  stopped: Arc<AtomicBool>,
  thread: Option<JoinHandle<()>>,
}

impl CallbackServer {
  /// Binds `host:port` and serves requests on a background thread until the
  /// first one carrying `code` or `error` arrives, which is sent on the
  /// returned receiver.
  pub fn start(host: &str, port: u16) -> Result<(Self, oneshot::Receiver<CallbackResult>)> {
    let listener = TcpListener::bind((host, port))
      .map_err(|e| anyhow!("could not listen on {}:{}: {}", host, port, e))?;
    let address = listener.local_addr()?;
    info!("waiting for the authorization callback on {}", address);

    let (tx, rx) = oneshot::channel();
    let stopped = Arc::new(AtomicBool::new(false));
    let thread = {
      let stopped = stopped.clone();
      thread::spawn(move || serve(listener, stopped, tx))
    };

    Ok((
      CallbackServer {
        address,
        stopped,
        thread: Some(thread),
      },
      rx,
    ))
  }

  pub fn address(&self) -> SocketAddr {
    self.address
  }

  /// Stops the listener and waits for its thread.
  pub fn shutdown(mut self) {
    self.stop();
  }

  fn stop(&mut self) {
    self.stopped.store(true, Ordering::SeqCst);
    if let Some(thread) = self.thread.take() {
      // Wake a blocking accept; fails harmlessly once the thread is gone.
      let _ = TcpStream::connect(self.address);
      if thread.join().is_err() {
        warn!("callback listener thread panicked");
      }
    }
  }
}

impl Drop for CallbackServer {
  fn drop(&mut self) {
    self.stop();
  }
}

fn serve(listener: TcpListener, stopped: Arc<AtomicBool>, tx: oneshot::Sender<CallbackResult>) {
  for stream in listener.incoming() {
    if stopped.load(Ordering::SeqCst) {
      return;
    }
    let stream = match stream {
      Ok(stream) => stream,
      Err(e) => {
        warn!("callback connection failed: {}", e);
        continue;
      }
    };

    if let Some(result) = handle_connection(stream) {
      let _ = tx.send(result);
      return;
    }
  }
}

fn handle_connection(mut stream: TcpStream) -> Option<CallbackResult> {
  if let Err(e) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
    warn!("could not set a read timeout on the callback connection: {}", e);
    return None;
  }

  // The request line is all that is needed; browsers send far less than this.
  let mut buffer = [0; 4096];
  let read = match stream.read(&mut buffer) {
    Ok(0) => return None,
    Ok(read) => read,
    Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
      info!("dropping idle callback connection");
      return None;
    }
    Err(e) => {
      warn!("could not read callback request: {}", e);
      return None;
    }
  };

  let request = String::from_utf8_lossy(&buffer[..read]);
  let path = match request.split_whitespace().nth(1) {
    Some(path) => path,
    None => {
      respond_with_error("Malformed request", stream);
      return None;
    }
  };

  match parse_callback(path) {
    Some(Ok(code)) => {
      respond_with_success(stream);
      Some(Ok(code))
    }
    Some(Err(error)) => {
      respond_with_error(&format!("Authorization failed: {}", error), stream);
      Some(Err(error))
    }
    // Favicons and other stray requests.
    None => {
      respond_with_error("Missing authorization code", stream);
      None
    }
  }
}

/// Pulls `code` (or `error`) out of the request target of the redirect.
pub fn parse_callback(path: &str) -> Option<CallbackResult> {
  let url = Url::parse("http://localhost").ok()?.join(path).ok()?;
  let mut error = None;
  for (key, value) in url.query_pairs() {
    match key.as_ref() {
      "code" if !value.is_empty() => return Some(Ok(value.into_owned())),
      "error" => error = Some(value.into_owned()),
      _ => {}
    }
  }
  error.map(Err)
}

fn respond(mut stream: TcpStream, status: &str, content_type: &str, body: &str) {
  let response = format!(
    "HTTP/1.1 {}\r\nContent-Type: {}; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
    status,
    content_type,
    body.len(),
    body
  );
  if let Err(e) = stream
    .write_all(response.as_bytes())
    .and_then(|_| stream.flush())
  {
    warn!("could not answer callback request: {}", e);
  }
}

fn respond_with_success(stream: TcpStream) {
  respond(stream, "200 OK", "text/html", include_str!("redirect_uri.html"));
}

fn respond_with_error(message: &str, stream: TcpStream) {
  respond(
    stream,
    "400 Bad Request",
    "text/plain",
    &format!("400 - Bad Request - {}", message),
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_callback_test() {
    assert_eq!(
      parse_callback("/?code=abc123&state=x"),
      Some(Ok("abc123".to_string()))
    );
    assert_eq!(
      parse_callback("/?error=access_denied"),
      Some(Err("access_denied".to_string()))
    );
    assert_eq!(parse_callback("/favicon.ico"), None);
    assert_eq!(parse_callback("/?code="), None);
  }

  #[tokio::test]
  async fn delivers_the_code() {
    let (server, rx) = CallbackServer::start("127.0.0.1", 0).unwrap();

    let mut browser = TcpStream::connect(server.address()).unwrap();
    browser
      .write_all(b"GET /?code=abc123 HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n")
      .unwrap();
    let mut response = String::new();
    browser.read_to_string(&mut response).unwrap();

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert_eq!(rx.await.unwrap(), Ok("abc123".to_string()));
    server.shutdown();
  }

  #[tokio::test]
  async fn idle_connection_does_not_block_the_code() {
    let (server, rx) = CallbackServer::start("127.0.0.1", 0).unwrap();

    let _preconnect = TcpStream::connect(server.address()).unwrap();
    let mut browser = TcpStream::connect(server.address()).unwrap();
    browser
      .write_all(b"GET /?code=abc123 HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n")
      .unwrap();

    let code = tokio::time::timeout(Duration::from_secs(10), rx)
      .await
      .expect("the code should arrive once the idle connection times out")
      .unwrap();
    assert_eq!(code, Ok("abc123".to_string()));
    server.shutdown();
  }

  #[tokio::test]
  async fn shutdown_without_callback_closes_the_channel() {
    let (server, rx) = CallbackServer::start("127.0.0.1", 0).unwrap();
    server.shutdown();
    assert!(rx.await.is_err());
  }
}
