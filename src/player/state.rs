use crate::domain::{MediaRef, TrackInfo};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    #[default]
    None,
    One,
    All,
}

impl LoopMode {
    /// None → One → All → None.
    pub fn cycle(self) -> Self {
        match self {
            LoopMode::None => LoopMode::One,
            LoopMode::One => LoopMode::All,
            LoopMode::All => LoopMode::None,
        }
    }
}

/// Bookmark into the playlist's currently displayed order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaylistSelection {
    pub title: String,
    pub media: MediaRef,
}

/// Everything the presentation layer needs to render the player.
///
/// Mutated only behind the controller's lock; every command hands back a
/// clone of it for the caller to re-render from.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub status: PlaybackStatus,
    /// Last track loaded into the output. Retained across `stop` so the
    /// player can replay it.
    pub current: Option<MediaRef>,
    /// Whether `current` was launched from the playlist view rather than
    /// picked ad hoc. Drives next/previous semantics.
    pub from_playlist: bool,
    pub selection: Option<PlaylistSelection>,
    pub loop_mode: LoopMode,
    pub shuffle: bool,
    pub volume: f32,
    pub track: TrackInfo,

    pub(crate) failed_streak: usize,
}

impl PlayerState {
    pub(crate) fn new(volume: f32) -> Self {
        PlayerState {
            status: PlaybackStatus::Stopped,
            current: None,
            from_playlist: false,
            selection: None,
            loop_mode: LoopMode::None,
            shuffle: false,
            volume,
            track: TrackInfo::default(),
            failed_streak: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.status == PlaybackStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.status == PlaybackStatus::Stopped
    }
}
