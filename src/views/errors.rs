//! Notification texts shown through rofi's error dialog.

pub const ADD_QUEUE: &str = "Failed to add the track to the queue. Try again.";
pub const PLAY_TRACK: &str = "Failed to play the track. Try again.";
pub const PLAY_ALBUM: &str = "Failed to play the album. Try again.";
pub const PLAY_PLAYLIST: &str = "Failed to play the playlist. Try again.";
pub const GET_ALBUM: &str = "Failed to get the album. Try again.";
pub const GET_ALBUMS: &str = "Failed to get albums. Try again.";
pub const GET_PLAYLISTS: &str = "Failed to get playlists. Try again.";
pub const GET_TRACKS: &str = "Failed to get tracks. Try again.";
pub const SELECT_DEVICE: &str = "Failed to select the device. Try again.";
pub const GET_DEVICES: &str = "Failed to get available devices. Try again.";
pub const NO_DEVICES: &str = "No devices found.";
pub const GET_PLAYER_STATE: &str = "Failed to get player status. Try again.";
pub const PLAY_PAUSE: &str = "Failed to pause/resume. Try again.";
pub const SKIP_TRACK: &str = "Failed to skip track. Try again.";
pub const PREVIOUS_TRACK: &str = "Failed to go to previous track. Try again.";
pub const UPDATE_PLAYER: &str = "Failed to update player. Try again.";
pub const GET_QUEUE: &str = "Failed to get queue. Try again.";
pub const QUEUE_EMPTY: &str = "Queue is empty.";
pub const GET_RECENTLY_PLAYED: &str = "Failed to get recently played tracks. Try again.";
pub const NO_RECENTLY_PLAYED: &str = "No recently played tracks.";
pub const SEARCH: &str = "Failed to search. Try again.";
pub const EMPTY_SEARCH: &str = "Search cannot be empty.";
