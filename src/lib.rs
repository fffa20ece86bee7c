use std::time::Duration;

pub mod config;
pub mod domain;
pub mod output;
pub mod player;

pub use config::PlayerConfig;
pub use domain::{MediaRef, Playlist, TrackInfo};
pub use output::{AudioOutput, ChannelNotifier, MetadataLookup, NotificationSink};
pub use player::{Command, LoopMode, PlaybackStatus, PlayerController, PlayerState};

pub const CONFIG_DIRECTORY: &str = "ostinato";

/// Compact m:ss rendering for track durations.
pub fn get_readable_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    let mins = secs / 60;
    secs %= 60;

    format!("{mins}:{secs:02}")
}
