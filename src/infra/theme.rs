use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_THEME: &str = include_str!("theme.rasi");
const THEME_DIR: &str = "spofi";
const THEME_FILE: &str = "theme.rasi";

/// Writes the built-in theme below `dir` and returns its path.
pub fn install_default_theme(dir: &Path) -> Result<PathBuf> {
  let dir = dir.join(THEME_DIR);
  fs::create_dir_all(&dir)?;
  let path = dir.join(THEME_FILE);
  fs::write(&path, DEFAULT_THEME)?;
  Ok(path)
}

/// The theme passed to rofi: the command line flag, then the configured
/// theme, then the built-in one in the temp directory.
pub fn resolve_theme(flag: Option<PathBuf>, configured: Option<&Path>) -> Result<PathBuf> {
  if let Some(theme) = flag {
    return Ok(theme);
  }
  if let Some(theme) = configured {
    return Ok(theme.to_path_buf());
  }
  let path = install_default_theme(&std::env::temp_dir())?;
  info!("using built-in theme at {}", path.display());
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flag_wins_over_config() {
    let theme = resolve_theme(
      Some(PathBuf::from("flag.rasi")),
      Some(Path::new("config.rasi")),
    )
    .unwrap();
    assert_eq!(theme, PathBuf::from("flag.rasi"));

    let theme = resolve_theme(None, Some(Path::new("config.rasi"))).unwrap();
    assert_eq!(theme, PathBuf::from("config.rasi"));
  }

  #[test]
  fn default_theme_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = install_default_theme(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("spofi").join("theme.rasi"));
    assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_THEME);
  }
}
