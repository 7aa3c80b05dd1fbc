//! One rofi round-trip: the rows shown, the flags passed and the translation
//! of rofi's exit status back into a structured [`Outcome`].

use anyhow::{anyhow, Result};
use std::path::Path;

/// Line fed to rofi ahead of the rows when a back entry is shown.
pub const BACK_ROW: &str = "..";

/// rofi exits with this status when an entry was chosen.
const STATUS_SELECTED: i32 = 0;
/// rofi exits with this status when the menu was dismissed.
const STATUS_CANCELLED: i32 = 1;
/// rofi exits with `10 + n` when custom keybinding `n + 1` was pressed.
const STATUS_KB_CUSTOM: i32 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
  pub title: String,
  pub value: String,
}

impl Row {
  pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
    Row {
      title: title.into(),
      value: value.into(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<K> {
  Selected(Row),
  Cancelled,
  Back,
  CustomKey { key: K, row: Row },
}

/// A custom rofi key wired to a screen action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keybinding<K> {
  pub action: K,
  pub key: String,
  pub description: &'static str,
}

impl<K> Keybinding<K> {
  pub fn new(action: K, key: impl Into<String>, description: &'static str) -> Self {
    Keybinding {
      action,
      key: key.into(),
      description,
    }
  }
}

/// What rofi handed back: its exit status and trimmed combined output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherReply {
  pub status: i32,
  pub output: String,
}

/// The process boundary: runs the launcher once with the given arguments,
/// feeding `input` on stdin, and blocks until it exits.
pub trait Launcher {
  async fn select(&self, args: Vec<String>, input: String) -> Result<LauncherReply>;
  async fn show_error(&self, args: Vec<String>) -> Result<()>;
}

/// Arguments for rofi's error dialog.
pub fn error_args(message: &str, theme: Option<&Path>) -> Vec<String> {
  let mut args = vec!["-e".to_string(), message.to_string()];
  if let Some(theme) = theme {
    args.push("-theme".to_string());
    args.push(theme.display().to_string());
  }
  args
}

/// Configuration of a single rofi menu. Screens own one each and reuse it
/// across renders so the cursor position survives.
#[derive(Clone, Debug)]
pub struct Menu<K> {
  pub prompt: String,
  pub message: String,
  pub filter: String,
  pub rows: Vec<Row>,
  pub show_back: bool,
  pub keys: Vec<Keybinding<K>>,
  pub ignore_case: bool,
  pub no_custom: bool,
  pub markup_rows: bool,
  pub(crate) previous_selection: usize,
}

impl<K> Default for Menu<K> {
  fn default() -> Self {
    Menu {
      prompt: String::new(),
      message: String::new(),
      filter: String::new(),
      rows: Vec::new(),
      show_back: false,
      keys: Vec::new(),
      ignore_case: false,
      no_custom: false,
      markup_rows: false,
      previous_selection: 0,
    }
  }
}

impl<K: Copy> Menu<K> {
  /// The usual list screen: back entry, case-insensitive filtering and no
  /// free text.
  pub fn list(prompt: impl Into<String>, keys: Vec<Keybinding<K>>) -> Self {
    Menu {
      prompt: prompt.into(),
      keys,
      show_back: true,
      ignore_case: true,
      no_custom: true,
      ..Default::default()
    }
  }

  pub fn previous_selection(&self) -> usize {
    self.previous_selection
  }

  pub fn args(&self, theme: Option<&Path>) -> Vec<String> {
    let mut args = vec!["-dmenu".to_string()];

    if let Some(theme) = theme {
      args.push("-theme".to_string());
      args.push(theme.display().to_string());
    }

    if !self.prompt.is_empty() {
      args.push("-p".to_string());
      args.push(self.prompt.clone());
    }

    if !self.message.is_empty() {
      args.push("-mesg".to_string());
      args.push(self.message.clone());
    }

    if !self.filter.is_empty() {
      args.push("-filter".to_string());
      args.push(self.filter.clone());
    }

    if self.ignore_case {
      args.push("-i".to_string());
    }

    if self.no_custom {
      args.push("-no-custom".to_string());
    }

    if self.markup_rows {
      args.push("-markup-rows".to_string());
    }

    for (i, binding) in self.keys.iter().enumerate() {
      args.push(format!("-kb-custom-{}", i + 1));
      args.push(binding.key.clone());
    }

    // The back entry occupies the first line, so step over it.
    let mut selected = self.previous_selection;
    if self.show_back && !self.rows.is_empty() {
      selected += 1;
    }
    args.push("-selected-row".to_string());
    args.push(selected.to_string());

    args
  }

  /// Lines written to rofi's stdin.
  pub fn input(&self) -> String {
    let mut input = String::new();
    if self.show_back {
      input.push_str(BACK_ROW);
      input.push('\n');
    }
    for row in &self.rows {
      input.push_str(&row.title);
      input.push('\n');
    }
    input
  }

  /// Looks a returned title up in the current rows. Unknown text (free
  /// input or the back entry) comes back as a row without a value.
  pub fn find_selection(&self, title: &str) -> (Row, usize) {
    self
      .rows
      .iter()
      .enumerate()
      .find(|(_, row)| row.title == title)
      .map(|(index, row)| (row.clone(), index))
      .unwrap_or_else(|| (Row::new(title, ""), 0))
  }

  /// Translates rofi's reply into an outcome and remembers the cursor.
  pub fn interpret(&mut self, reply: LauncherReply) -> Result<Outcome<K>> {
    let (selection, index) = self.find_selection(reply.output.trim());
    self.previous_selection = index;

    match reply.status {
      STATUS_SELECTED => {
        if self.show_back && selection.title == BACK_ROW && index == 0 {
          Ok(Outcome::Back)
        } else {
          Ok(Outcome::Selected(selection))
        }
      }
      STATUS_CANCELLED => Ok(Outcome::Cancelled),
      status if status >= STATUS_KB_CUSTOM => {
        let slot = (status - STATUS_KB_CUSTOM) as usize;
        let binding = self.keys.get(slot).ok_or_else(|| {
          anyhow!(
            "rofi reported custom key {} but only {} are configured",
            slot + 1,
            self.keys.len()
          )
        })?;
        Ok(Outcome::CustomKey {
          key: binding.action,
          row: selection,
        })
      }
      status => Err(anyhow!("received invalid rofi status: {}", status)),
    }
  }

  pub async fn run<L: Launcher>(&mut self, launcher: &L, theme: Option<&Path>) -> Result<Outcome<K>> {
    let reply = launcher.select(self.args(theme), self.input()).await?;
    self.interpret(reply)
  }
}
