use super::menu::{Keybinding, Row};
use super::model::{primary_artist, Album, Playlist, Track};
use chrono::{DateTime, Timelike};

/// Widest a single column may get before values are cut.
pub const MAX_COLUMN_WIDTH: usize = 30;
/// Extra spaces between two columns.
const COLUMN_GAP: usize = 10;
const ELLIPSIS: &str = "...";
const TITLE_BUDGET: usize = 30;
const TITLE_PART_WIDTH: usize = 15;

fn char_len(s: &str) -> usize {
  s.chars().count()
}

fn take_chars(s: &str, n: usize) -> &str {
  match s.char_indices().nth(n) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

fn column_widths(data: &[Vec<&str>], maximum: usize) -> Vec<usize> {
  let columns = data.iter().map(Vec::len).max().unwrap_or(0);
  let mut widths = vec![0; columns];
  for row in data {
    for (i, cell) in row.iter().enumerate() {
      widths[i] = widths[i].max(char_len(cell)).min(maximum);
    }
  }
  widths
}

fn build_row(row: &[&str], widths: &[usize], limit: usize) -> String {
  let mut out = String::new();
  for (i, cell) in row.iter().enumerate() {
    let mut len = char_len(cell);
    if len > limit - ELLIPSIS.len() {
      out.push_str(take_chars(cell, limit - ELLIPSIS.len()));
      out.push_str(ELLIPSIS);
      len = limit;
    } else {
      out.push_str(cell);
    }

    if i != row.len() - 1 {
      let pad = (widths[i] + COLUMN_GAP).saturating_sub(len);
      out.push_str(&" ".repeat(pad));
    }
  }
  out
}

/// Lays out a table of cells as aligned text lines, one per input row.
pub fn build_rows(data: &[Vec<&str>], max_column_width: usize) -> Vec<String> {
  let widths = column_widths(data, max_column_width);
  data
    .iter()
    .map(|row| build_row(row, &widths, max_column_width))
    .collect()
}

/// Prefixes `text` with `icon` and a space, or returns `text` unchanged when
/// no icon is configured.
pub fn format_icon(icon: &str, text: &str) -> String {
  if icon.is_empty() {
    text.to_string()
  } else {
    format!("{} {}", icon, text)
  }
}

fn rows_with_values(data: Vec<Vec<&str>>, values: Vec<&str>, icon: &str) -> Vec<Row> {
  build_rows(&data, MAX_COLUMN_WIDTH)
    .into_iter()
    .zip(values)
    .map(|(line, value)| Row::new(format_icon(icon, &line), value))
    .collect()
}

pub fn format_track_rows(tracks: &[Track], icon: &str) -> Vec<Row> {
  let data = tracks
    .iter()
    .map(|track| {
      let mut cells = vec![track.name.as_str()];
      cells.extend(primary_artist(&track.artists));
      cells
    })
    .collect();
  let values = tracks.iter().map(|track| track.uri.as_str()).collect();
  rows_with_values(data, values, icon)
}

pub fn format_album_rows(albums: &[Album], icon: &str) -> Vec<Row> {
  let data = albums
    .iter()
    .map(|album| {
      let mut cells = vec![album.name.as_str()];
      cells.extend(primary_artist(&album.artists));
      cells
    })
    .collect();
  let values = albums.iter().map(|album| album.uri.as_str()).collect();
  rows_with_values(data, values, icon)
}

pub fn format_playlist_rows(playlists: &[Playlist], icon: &str) -> Vec<Row> {
  let data = playlists
    .iter()
    .map(|playlist| vec![playlist.name.as_str()])
    .collect();
  let values = playlists
    .iter()
    .map(|playlist| playlist.uri.as_str())
    .collect();
  rows_with_values(data, values, icon)
}

fn shorten_title_part(s: &str) -> String {
  if char_len(s) > TITLE_PART_WIDTH {
    format!("{}{}", take_chars(s, TITLE_PART_WIDTH).trim_end(), ELLIPSIS)
  } else {
    s.to_string()
  }
}

/// Joins two strings with ` | `. When together they exceed the title budget
/// each side is shortened on its own.
pub fn format_title(a: &str, b: &str) -> String {
  if char_len(a) + char_len(b) > TITLE_BUDGET {
    format!("{} | {}", shorten_title_part(a), shorten_title_part(b))
  } else {
    format!("{} | {}", a, b)
  }
}

/// Formats a millisecond value as `m:ss`.
///
/// The value is read as a point in time and only its minute and second are
/// shown, so anything past an hour wraps around: `3_600_000` is `0:00`.
pub fn format_time(ms: u64) -> String {
  let (minute, second) = i64::try_from(ms)
    .ok()
    .and_then(DateTime::from_timestamp_millis)
    .map(|t| (t.minute(), t.second()))
    .unwrap_or((0, 0));
  format!("{}:{:02}", minute, second)
}

/// Escapes text placed in rows rendered with Pango markup.
pub fn escape_markup(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}

/// Renders the help line listing the custom keys of a screen.
pub fn format_keybindings<K>(keys: &[Keybinding<K>]) -> String {
  keys
    .iter()
    .map(|binding| format!("{}: {}", binding.key, binding.description))
    .collect::<Vec<String>>()
    .join(" | ")
}
