pub mod network;
pub mod redirect_uri;
pub mod rofi;
pub mod theme;
