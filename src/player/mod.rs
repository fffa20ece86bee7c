mod controller;
mod monitor;
mod navigation;
mod state;

pub use controller::PlayerController;
pub use navigation::{Action, next_action, previous_action};
pub use state::{LoopMode, PlaybackStatus, PlayerState, PlaylistSelection};

use crate::domain::MediaRef;

/// The abstract command surface. A UI or CLI binds its inputs to these and
/// feeds them to `PlayerController::handle_command`.
pub enum Command {
    TogglePlay,
    Stop,
    Next,
    Previous,
    IncreaseVolume,
    DecreaseVolume,
    CycleLoop,
    ToggleShuffle,
    Play(MediaRef),
    PlayFromPlaylist { title: String, media: MediaRef },
}

/// Step a volume by `delta`, snapping to the `[0.0, 1.0]` boundaries
/// instead of overshooting them.
pub(crate) fn step_volume(volume: f32, delta: f32) -> f32 {
    (volume + delta).clamp(0.0, 1.0)
}
