use clap::{value_parser, Arg, Command};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

fn theme_arg() -> Arg {
  Arg::new("theme")
    .long("theme")
    .value_name("FILE")
    .value_parser(value_parser!(std::path::PathBuf))
    .help("Sets a custom rofi theme")
    .long_help(
      "Path to a rofi theme (.rasi) used for every menu. Takes precedence over the `theme` \
entry of the config file; without either, spofi writes its built-in theme to the temp \
directory and uses that.",
    )
}

fn config_arg() -> Arg {
  Arg::new("config")
    .short('c')
    .long("config")
    .value_name("FILE")
    .value_parser(value_parser!(std::path::PathBuf))
    .help("Specifies the configuration file path")
}

pub fn setup_subcommand() -> Command {
  Command::new("setup")
    .about("Starts the setup process")
    .long_about(
      "Asks for the client id and secret of your Spotify app, runs the authorization in \
your browser and stores the resulting credentials in the config file. An existing \
configuration is overwritten.",
    )
    .arg(
      Arg::new("host")
        .long("host")
        .value_name("HOST")
        .default_value(DEFAULT_HOST)
        .help("The host of the http callback server"),
    )
    .arg(
      Arg::new("port")
        .long("port")
        .value_name("PORT")
        .value_parser(value_parser!(u16))
        .default_value("8080")
        .help("The port of the http callback server"),
    )
}

pub fn app() -> Command {
  Command::new(env!("CARGO_PKG_NAME"))
    .version(env!("CARGO_PKG_VERSION"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .after_help("Configuration is read from $HOME/.config/spofi/spofi.yml unless --config is given.")
    .arg(theme_arg())
    .arg(config_arg())
    .subcommand(setup_subcommand())
}
