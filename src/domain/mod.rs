mod media;
mod playlist;

pub use media::{MediaRef, TrackInfo};
pub use playlist::Playlist;
