use anyhow::{anyhow, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
  fs,
  path::{Path, PathBuf},
};

const FILE_NAME: &str = "spofi.yml";
const CONFIG_DIR: &str = ".config";
const APP_CONFIG_DIR: &str = "spofi";

/// Modifier names rofi accepts in `-kb-custom-N` bindings.
const MODIFIERS: [&str; 12] = [
  "control", "ctrl", "shift", "alt", "super", "meta", "hyper", "mod1", "mod2", "mod3", "mod4",
  "mod5",
];

/// Checks one key combination such as `Alt+Right` or `Control+Shift+p`.
fn check_combination(combination: &str, key: &str) -> Result<()> {
  let sections: Vec<&str> = combination.split('+').collect();
  let (last, modifiers) = match sections.split_last() {
    Some(split) => split,
    None => return Err(anyhow!("The key binding \"{}\" is empty", key)),
  };

  if last.trim().is_empty() {
    return Err(anyhow!("The key binding \"{}\" has no key", key));
  }

  for modifier in modifiers {
    if !MODIFIERS.contains(&modifier.trim().to_lowercase().as_str()) {
      return Err(anyhow!(
        "The modifier \"{}\" in \"{}\" is unknown",
        modifier,
        key
      ));
    }
  }

  Ok(())
}

/// Checks a rofi key string. Like rofi, a comma separates alternative
/// combinations bound to the same action (`Alt+d,Control+q`).
fn parse_key(key: String) -> Result<String> {
  for combination in key.split(',') {
    check_combination(combination, &key)?;
  }
  Ok(key)
}

#[derive(Clone)]
pub struct UserConfigPaths {
  pub config_file_path: PathBuf,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotifyConfigString {
  pub client_id: Option<String>,
  pub client_secret: Option<String>,
  pub refresh_token: Option<String>,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfigString {
  pub id: Option<String>,
  pub name: Option<String>,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyBindingsString {
  next_page: Option<String>,
  previous_page: Option<String>,
  add_to_queue: Option<String>,
  toggle_pause_resume: Option<String>,
  next_track: Option<String>,
  previous_track: Option<String>,
  toggle_repeat: Option<String>,
  toggle_shuffle: Option<String>,
  play_album: Option<String>,
  play_track: Option<String>,
  play_playlist: Option<String>,
  toggle_search_type: Option<String>,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IconsString {
  album: Option<String>,
  device: Option<String>,
  liked_tracks: Option<String>,
  next: Option<String>,
  pause: Option<String>,
  play: Option<String>,
  player: Option<String>,
  playlist: Option<String>,
  previous: Option<String>,
  queue: Option<String>,
  recently_played: Option<String>,
  repeat_context: Option<String>,
  repeat_off: Option<String>,
  repeat_track: Option<String>,
  search: Option<String>,
  shuffle_off: Option<String>,
  shuffle_on: Option<String>,
  track: Option<String>,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserConfigString {
  spotify: Option<SpotifyConfigString>,
  device: Option<DeviceConfigString>,
  theme: Option<PathBuf>,
  show_keybindings: Option<bool>,
  keybindings: Option<KeyBindingsString>,
  icons: Option<IconsString>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpotifyConfig {
  pub client_id: String,
  pub client_secret: String,
  pub refresh_token: String,
}

/// The playback device chosen on the devices screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceConfig {
  pub id: String,
  pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
  pub next_page: String,
  pub previous_page: String,
  pub add_to_queue: String,
  pub toggle_pause_resume: String,
  pub next_track: String,
  pub previous_track: String,
  pub toggle_repeat: String,
  pub toggle_shuffle: String,
  pub play_album: String,
  pub play_track: String,
  pub play_playlist: String,
  pub toggle_search_type: String,
}

/// Glyphs put in front of rows. An empty string disables the icon.
#[derive(Clone, Debug, PartialEq)]
pub struct Icons {
  pub album: String,
  pub device: String,
  pub liked_tracks: String,
  pub next: String,
  pub pause: String,
  pub play: String,
  pub player: String,
  pub playlist: String,
  pub previous: String,
  pub queue: String,
  pub recently_played: String,
  pub repeat_context: String,
  pub repeat_off: String,
  pub repeat_track: String,
  pub search: String,
  pub shuffle_off: String,
  pub shuffle_on: String,
  pub track: String,
}

#[derive(Clone)]
pub struct UserConfig {
  pub spotify: SpotifyConfig,
  pub device: DeviceConfig,
  pub theme: Option<PathBuf>,
  pub show_keybindings: bool,
  pub keys: KeyBindings,
  pub icons: Icons,
  pub path_to_config: Option<UserConfigPaths>,
}

impl UserConfig {
  pub fn new() -> UserConfig {
    UserConfig {
      spotify: SpotifyConfig::default(),
      device: DeviceConfig::default(),
      theme: None,
      show_keybindings: false,
      keys: KeyBindings {
        next_page: "Alt+Right".to_string(),
        previous_page: "Alt+Left".to_string(),
        add_to_queue: "Alt+d".to_string(),
        toggle_pause_resume: "Alt+space".to_string(),
        next_track: "Alt+n".to_string(),
        previous_track: "Alt+p".to_string(),
        toggle_repeat: "Alt+r".to_string(),
        toggle_shuffle: "Alt+z".to_string(),
        play_album: "Alt+p".to_string(),
        play_track: "Alt+t".to_string(),
        play_playlist: "Alt+p".to_string(),
        toggle_search_type: "Alt+s".to_string(),
      },
      icons: Icons {
        album: "\u{f025f}".to_string(),
        device: "\u{f04c3}".to_string(),
        liked_tracks: "\u{f02d1}".to_string(),
        next: "\u{f04ad}".to_string(),
        pause: "\u{f03e4}".to_string(),
        play: "\u{f040a}".to_string(),
        player: "\u{f075a}".to_string(),
        playlist: "\u{f0cb8}".to_string(),
        previous: "\u{f04ae}".to_string(),
        queue: "\u{f0cb9}".to_string(),
        recently_played: "\u{f02da}".to_string(),
        repeat_context: "\u{f0456}".to_string(),
        repeat_off: "\u{f0457}".to_string(),
        repeat_track: "\u{f0458}".to_string(),
        search: "\u{f0349}".to_string(),
        shuffle_off: "\u{f049e}".to_string(),
        shuffle_on: "\u{f049d}".to_string(),
        track: "\u{f0387}".to_string(),
      },
      path_to_config: None,
    }
  }

  pub fn get_or_build_paths(&mut self) -> Result<()> {
    match dirs::home_dir() {
      Some(home) => {
        let path = Path::new(&home);
        let app_config_dir = path.join(CONFIG_DIR).join(APP_CONFIG_DIR);

        if !app_config_dir.exists() {
          fs::create_dir_all(&app_config_dir)?;
        }

        let paths = UserConfigPaths {
          config_file_path: app_config_dir.join(FILE_NAME),
        };
        self.path_to_config = Some(paths);
        Ok(())
      }
      None => Err(anyhow!("No $HOME directory found for client config")),
    }
  }

  /// Uses `path` instead of the default location in the home directory.
  pub fn set_config_path(&mut self, path: PathBuf) {
    self.path_to_config = Some(UserConfigPaths {
      config_file_path: path,
    });
  }

  /// Directory the config file lives in, also home of the crash log.
  pub fn config_dir(&self) -> Option<&Path> {
    self
      .path_to_config
      .as_ref()
      .and_then(|paths| paths.config_file_path.parent())
  }

  /// Missing credentials mean setup has to run before anything else.
  pub fn is_incomplete(&self) -> bool {
    self.spotify.client_id.is_empty()
      || self.spotify.client_secret.is_empty()
      || self.spotify.refresh_token.is_empty()
  }

  pub fn load_keybindings(&mut self, keybindings: KeyBindingsString) -> Result<()> {
    macro_rules! to_keys {
      ($name: ident) => {
        if let Some(key_string) = keybindings.$name {
          self.keys.$name = parse_key(key_string)?;
        }
      };
    }

    to_keys!(next_page);
    to_keys!(previous_page);
    to_keys!(add_to_queue);
    to_keys!(toggle_pause_resume);
    to_keys!(next_track);
    to_keys!(previous_track);
    to_keys!(toggle_repeat);
    to_keys!(toggle_shuffle);
    to_keys!(play_album);
    to_keys!(play_track);
    to_keys!(play_playlist);
    to_keys!(toggle_search_type);

    Ok(())
  }

  pub fn load_icons(&mut self, icons: IconsString) {
    macro_rules! to_icon {
      ($name: ident) => {
        if let Some(icon) = icons.$name {
          self.icons.$name = icon;
        }
      };
    }

    to_icon!(album);
    to_icon!(device);
    to_icon!(liked_tracks);
    to_icon!(next);
    to_icon!(pause);
    to_icon!(play);
    to_icon!(player);
    to_icon!(playlist);
    to_icon!(previous);
    to_icon!(queue);
    to_icon!(recently_played);
    to_icon!(repeat_context);
    to_icon!(repeat_off);
    to_icon!(repeat_track);
    to_icon!(search);
    to_icon!(shuffle_off);
    to_icon!(shuffle_on);
    to_icon!(track);
  }

  pub fn load_config(&mut self) -> Result<()> {
    if self.path_to_config.is_none() {
      self.get_or_build_paths()?;
    }
    let paths = self
      .path_to_config
      .as_ref()
      .ok_or_else(|| anyhow!("Config path not initialized"))?;

    if !paths.config_file_path.exists() {
      info!(
        "no config at {}, using defaults",
        paths.config_file_path.display()
      );
      return Ok(());
    }

    let config_string = fs::read_to_string(&paths.config_file_path)?;
    // serde fails if file is empty
    if config_string.trim().is_empty() {
      return Ok(());
    }

    let config_yml: UserConfigString = serde_yaml::from_str(&config_string)?;

    if let Some(spotify) = config_yml.spotify {
      self.spotify = SpotifyConfig {
        client_id: spotify.client_id.unwrap_or_default(),
        client_secret: spotify.client_secret.unwrap_or_default(),
        refresh_token: spotify.refresh_token.unwrap_or_default(),
      };
    }

    if let Some(device) = config_yml.device {
      self.device = DeviceConfig {
        id: device.id.unwrap_or_default(),
        name: device.name.unwrap_or_default(),
      };
    }

    self.theme = config_yml.theme.filter(|path| !path.as_os_str().is_empty());

    if let Some(show_keybindings) = config_yml.show_keybindings {
      self.show_keybindings = show_keybindings;
    }

    if let Some(keybindings) = config_yml.keybindings {
      self.load_keybindings(keybindings)?;
    }

    if let Some(icons) = config_yml.icons {
      self.load_icons(icons);
    }

    Ok(())
  }

  fn to_config_string(&self) -> UserConfigString {
    let keys = &self.keys;
    let icons = &self.icons;

    UserConfigString {
      spotify: Some(SpotifyConfigString {
        client_id: Some(self.spotify.client_id.clone()),
        client_secret: Some(self.spotify.client_secret.clone()),
        refresh_token: Some(self.spotify.refresh_token.clone()),
      }),
      device: Some(DeviceConfigString {
        id: Some(self.device.id.clone()),
        name: Some(self.device.name.clone()),
      }),
      theme: self.theme.clone(),
      show_keybindings: Some(self.show_keybindings),
      keybindings: Some(KeyBindingsString {
        next_page: Some(keys.next_page.clone()),
        previous_page: Some(keys.previous_page.clone()),
        add_to_queue: Some(keys.add_to_queue.clone()),
        toggle_pause_resume: Some(keys.toggle_pause_resume.clone()),
        next_track: Some(keys.next_track.clone()),
        previous_track: Some(keys.previous_track.clone()),
        toggle_repeat: Some(keys.toggle_repeat.clone()),
        toggle_shuffle: Some(keys.toggle_shuffle.clone()),
        play_album: Some(keys.play_album.clone()),
        play_track: Some(keys.play_track.clone()),
        play_playlist: Some(keys.play_playlist.clone()),
        toggle_search_type: Some(keys.toggle_search_type.clone()),
      }),
      icons: Some(IconsString {
        album: Some(icons.album.clone()),
        device: Some(icons.device.clone()),
        liked_tracks: Some(icons.liked_tracks.clone()),
        next: Some(icons.next.clone()),
        pause: Some(icons.pause.clone()),
        play: Some(icons.play.clone()),
        player: Some(icons.player.clone()),
        playlist: Some(icons.playlist.clone()),
        previous: Some(icons.previous.clone()),
        queue: Some(icons.queue.clone()),
        recently_played: Some(icons.recently_played.clone()),
        repeat_context: Some(icons.repeat_context.clone()),
        repeat_off: Some(icons.repeat_off.clone()),
        repeat_track: Some(icons.repeat_track.clone()),
        search: Some(icons.search.clone()),
        shuffle_off: Some(icons.shuffle_off.clone()),
        shuffle_on: Some(icons.shuffle_on.clone()),
        track: Some(icons.track.clone()),
      }),
    }
  }

  /// Writes the whole configuration, defaults included, back to disk.
  pub fn save_config(&self) -> Result<()> {
    let paths = match &self.path_to_config {
      Some(path) => path,
      None => return Err(anyhow!("Config path not initialized")),
    };

    if let Some(dir) = paths.config_file_path.parent() {
      fs::create_dir_all(dir)?;
    }

    let content_yml = serde_yaml::to_string(&self.to_config_string())?;
    let mut config_file = fs::File::create(&paths.config_file_path)?;
    std::io::Write::write_all(&mut config_file, content_yml.as_bytes())?;

    info!("saved config to {}", paths.config_file_path.display());
    Ok(())
  }
}
