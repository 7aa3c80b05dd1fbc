use crate::core::menu::{Launcher, LauncherReply};
use anyhow::{anyhow, Context, Result};
use log::debug;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const ROFI: &str = "rofi";

/// Runs the `rofi` binary found on `PATH`.
#[derive(Clone, Debug, Default)]
pub struct Rofi;

fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
  let mut output = String::from_utf8_lossy(stdout).into_owned();
  output.push_str(&String::from_utf8_lossy(stderr));
  output.trim().to_string()
}

impl Launcher for Rofi {
  async fn select(&self, args: Vec<String>, input: String) -> Result<LauncherReply> {
    debug!("rofi {:?}", args);
    let mut child = Command::new(ROFI)
      .args(&args)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .context("could not start rofi")?;

    if let Some(mut stdin) = child.stdin.take() {
      stdin.write_all(input.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    let status = output
      .status
      .code()
      .ok_or_else(|| anyhow!("rofi was terminated by a signal"))?;

    Ok(LauncherReply {
      status,
      output: combined_output(&output.stdout, &output.stderr),
    })
  }

  async fn show_error(&self, args: Vec<String>) -> Result<()> {
    Command::new(ROFI)
      .args(&args)
      .stdin(Stdio::null())
      .output()
      .await
      .context("could not start rofi")?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn combined_output_is_trimmed() {
    assert_eq!(combined_output(b"Track\n", b""), "Track");
    assert_eq!(combined_output(b"", b"  warning\n"), "warning");
  }
}
