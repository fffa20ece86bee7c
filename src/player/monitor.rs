use crate::player::PlayerController;
use std::{thread, time::Duration};
use tracing::debug;

/// Background end-of-track detector.
///
/// Sleeps a bounded interval between checks, stands down while a play
/// transition is in flight, and exits once the controller shuts down. The
/// controller guarantees at most one of these loops is alive at a time.
pub(super) fn run(player: PlayerController, poll_interval: Duration) {
    debug!("track monitor started");

    while player.is_running() {
        thread::sleep(poll_interval);

        // A momentarily idle output mid-switch must not read as a finished
        // track.
        if player.is_transitioning() {
            continue;
        }

        player.check_track_end();
    }

    debug!("track monitor stopped");
}
