mod clap;
pub mod setup;

pub use self::clap::{app, DEFAULT_HOST, DEFAULT_PORT};
