pub mod config;
pub mod format;
pub mod menu;
pub mod model;
pub mod player;
pub mod session;
