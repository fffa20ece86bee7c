use super::{
    Command, LoopMode, PlaybackStatus, PlayerState, PlaylistSelection, monitor,
    navigation::{self, Action},
    step_volume,
};
use crate::{
    config::PlayerConfig,
    domain::{MediaRef, Playlist},
    output::{AudioOutput, MetadataLookup, NotificationSink},
};
use std::{
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{debug, warn};

/// What the command path and the monitor loop contend over.
struct Core {
    state: PlayerState,
    playlist: Playlist,
}

struct Shared {
    core: Mutex<Core>,

    output: Box<dyn AudioOutput>,
    metadata: Box<dyn MetadataLookup>,
    notifier: Box<dyn NotificationSink>,

    /// Held high for the whole duration of a play transition; the monitor
    /// loop skips its end-of-track check while it is set.
    transitioning: AtomicBool,
    running: AtomicBool,
    monitor: Mutex<Option<JoinHandle<()>>>,

    poll_interval: Duration,
    volume_step: f32,
}

/// The playback state machine behind the command surface.
///
/// Cloning hands out another handle to the same player. All mutation is
/// serialized behind one lock, shared with the monitor loop; each command
/// runs to completion and returns the resulting state snapshot.
#[derive(Clone)]
pub struct PlayerController {
    shared: Arc<Shared>,
}

impl PlayerController {
    pub fn new(
        output: Box<dyn AudioOutput>,
        metadata: Box<dyn MetadataLookup>,
        notifier: Box<dyn NotificationSink>,
        config: PlayerConfig,
    ) -> Self {
        let config = config.normalized();
        output.set_volume(config.volume);

        PlayerController {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    state: PlayerState::new(config.volume),
                    playlist: Playlist::new(),
                }),
                output,
                metadata,
                notifier,
                transitioning: AtomicBool::new(false),
                running: AtomicBool::new(true),
                monitor: Mutex::new(None),
                poll_interval: config.poll_interval(),
                volume_step: config.volume_step,
            }),
        }
    }

    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.shared.core.lock().unwrap()
    }
}

// ================
//    COMMANDS
// ================
impl PlayerController {
    pub fn handle_command(&self, command: Command) -> PlayerState {
        match command {
            Command::TogglePlay => self.toggle_play(),
            Command::Stop => self.stop(),
            Command::Next => self.advance_next(),
            Command::Previous => self.advance_previous(),
            Command::IncreaseVolume => self.increase_volume(),
            Command::DecreaseVolume => self.decrease_volume(),
            Command::CycleLoop => self.cycle_loop(),
            Command::ToggleShuffle => self.toggle_shuffle(),
            Command::Play(media) => self.play_media(&media, false),
            Command::PlayFromPlaylist { title, media } => self.play_from_playlist(title, media),
        }
    }

    /// Load and start `media`. An empty ref is ignored; a rejected one is
    /// reported and skipped past (see `play_locked`).
    pub fn play_media(&self, media: &MediaRef, from_playlist: bool) -> PlayerState {
        let mut core = self.lock_core();
        self.play_locked(&mut core, media, from_playlist);
        core.state.clone()
    }

    /// Bookmark `(title, media)` as the playlist position, then play it.
    pub fn play_from_playlist<S: Into<String>>(&self, title: S, media: MediaRef) -> PlayerState {
        let mut core = self.lock_core();
        core.state.selection = Some(PlaylistSelection {
            title: title.into(),
            media: media.clone(),
        });
        self.play_locked(&mut core, &media, true);
        core.state.clone()
    }

    pub fn toggle_play(&self) -> PlayerState {
        let mut core = self.lock_core();
        match core.state.status {
            PlaybackStatus::Playing => {
                self.shared.output.pause();
                core.state.status = PlaybackStatus::Paused;
            }
            PlaybackStatus::Paused => {
                self.shared.output.resume();
                core.state.status = PlaybackStatus::Playing;
            }
            PlaybackStatus::Stopped => {
                // Replay the remembered track with its remembered origin, so
                // a track launched from the playlist resumes playlist
                // navigation.
                if let Some(media) = core.state.current.clone() {
                    let from_playlist = core.state.from_playlist;
                    self.play_locked(&mut core, &media, from_playlist);
                }
            }
        }
        core.state.clone()
    }

    /// Stop the output. `current` is kept so toggle-play can replay it.
    pub fn stop(&self) -> PlayerState {
        let mut core = self.lock_core();
        self.stop_locked(&mut core);
        core.state.clone()
    }

    pub fn advance_next(&self) -> PlayerState {
        let mut core = self.lock_core();
        self.advance_next_locked(&mut core);
        core.state.clone()
    }

    pub fn advance_previous(&self) -> PlayerState {
        let mut core = self.lock_core();
        let action = navigation::previous_action(&core.state, &core.playlist);
        self.apply_locked(&mut core, action);
        core.state.clone()
    }

    pub fn cycle_loop(&self) -> PlayerState {
        let mut core = self.lock_core();
        core.state.loop_mode = core.state.loop_mode.cycle();
        core.state.clone()
    }

    /// Shuffle on: snapshot the displayed order and show a random
    /// permutation. Shuffle off: restore the snapshot exactly. No-op while
    /// the playlist is empty.
    pub fn toggle_shuffle(&self) -> PlayerState {
        let mut core = self.lock_core();
        if core.playlist.is_empty() {
            return core.state.clone();
        }

        if core.state.shuffle {
            core.playlist.restore_order();
            core.state.shuffle = false;
        } else {
            core.playlist.shuffle();
            core.state.shuffle = true;
        }
        core.state.clone()
    }

    pub fn adjust_volume(&self, delta: f32) -> PlayerState {
        let mut core = self.lock_core();
        let volume = step_volume(core.state.volume, delta);
        self.shared.output.set_volume(volume);
        core.state.volume = volume;
        core.state.clone()
    }

    pub fn increase_volume(&self) -> PlayerState {
        self.adjust_volume(self.shared.volume_step)
    }

    pub fn decrease_volume(&self) -> PlayerState {
        self.adjust_volume(-self.shared.volume_step)
    }
}

// ================
//    PLAYLIST
// ================
impl PlayerController {
    /// Replace the playlist contents. The new order is the displayed order,
    /// so any previous shuffle is forgotten.
    pub fn set_tracks<I>(&self, tracks: I) -> PlayerState
    where
        I: IntoIterator<Item = (String, MediaRef)>,
    {
        let mut core = self.lock_core();
        core.playlist = Playlist::from_tracks(tracks);
        core.state.shuffle = false;
        core.state.clone()
    }

    pub fn add_track<S: Into<String>>(&self, title: S, media: MediaRef) {
        self.lock_core().playlist.add(title, media);
    }

    pub fn remove_track(&self, title: &str) -> Option<MediaRef> {
        self.lock_core().playlist.remove(title)
    }

    pub fn clear_tracks(&self) -> PlayerState {
        let mut core = self.lock_core();
        core.playlist.clear();
        core.state.shuffle = false;
        core.state.clone()
    }

    /// The displayed order, as `(title, media)` pairs.
    pub fn tracks(&self) -> Vec<(String, MediaRef)> {
        self.lock_core()
            .playlist
            .entries()
            .map(|(t, m)| (t.to_string(), m.clone()))
            .collect()
    }
}

// ================
//    OBSERVERS
// ================
impl PlayerController {
    pub fn snapshot(&self) -> PlayerState {
        self.lock_core().state.clone()
    }

    pub fn is_transitioning(&self) -> bool {
        self.shared.transitioning.load(Ordering::SeqCst)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Ask the monitor loop to wind down and wait for it. Cooperative: the
    /// loop notices within one poll interval.
    pub fn shutdown(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
        let handle = self.shared.monitor.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

// =========================
//    INTERNAL MACHINERY
// =========================
impl PlayerController {
    /// The single play path. Attempts `media`; on rejection notifies and
    /// walks forward through the playlist rather than retrying the same
    /// file, stopping once every entry has failed back-to-back. The
    /// transition flag is held across the whole cascade and always cleared
    /// on exit.
    fn play_locked(&self, core: &mut Core, media: &MediaRef, from_playlist: bool) {
        if media.is_empty() {
            return;
        }

        self.shared.transitioning.store(true, Ordering::SeqCst);

        let mut target = media.clone();
        let mut from_playlist = from_playlist;

        loop {
            core.state.from_playlist = from_playlist;

            if self.shared.output.load_and_play(&target) {
                core.state.status = PlaybackStatus::Playing;
                core.state.current = Some(target.clone());
                core.state.failed_streak = 0;

                // Best effort: keep the previous display values when the
                // lookup fails.
                match self.shared.metadata.lookup(&target) {
                    Ok(track) => core.state.track = track,
                    Err(e) => debug!(media = %target, "metadata lookup failed: {e}"),
                }

                self.ensure_monitor();
                break;
            }

            warn!(media = %target, "output rejected media");
            self.shared.notifier.notify("Unable to play the media file.");
            core.state.failed_streak += 1;

            // Every candidate has failed in a row; stop rather than cycle a
            // playlist with nothing playable in it.
            if core.state.failed_streak >= core.playlist.len().max(1) {
                core.state.failed_streak = 0;
                self.stop_locked(core);
                break;
            }

            match navigation::next_action(&core.state, &core.playlist) {
                Action::Stop => {
                    self.stop_locked(core);
                    break;
                }
                Action::Replay(media) => {
                    target = media;
                }
                Action::PlayAt { title, media } => {
                    core.state.selection = Some(PlaylistSelection {
                        title,
                        media: media.clone(),
                    });
                    target = media;
                    from_playlist = true;
                }
            }
        }

        self.shared.transitioning.store(false, Ordering::SeqCst);
    }

    fn stop_locked(&self, core: &mut Core) {
        self.shared.output.stop();
        core.state.status = PlaybackStatus::Stopped;
    }

    fn advance_next_locked(&self, core: &mut Core) {
        let action = navigation::next_action(&core.state, &core.playlist);
        self.apply_locked(core, action);
    }

    fn apply_locked(&self, core: &mut Core, action: Action) {
        match action {
            Action::Stop => self.stop_locked(core),
            Action::Replay(media) => {
                let from_playlist = core.state.from_playlist;
                self.play_locked(core, &media, from_playlist);
            }
            Action::PlayAt { title, media } => {
                core.state.selection = Some(PlaylistSelection {
                    title,
                    media: media.clone(),
                });
                self.play_locked(core, &media, true);
            }
        }
    }

    /// One monitor loop per controller: start it only if none is alive.
    fn ensure_monitor(&self) {
        let mut guard = self.shared.monitor.lock().unwrap();
        if guard.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let player = self.clone();
        let poll_interval = self.shared.poll_interval;
        *guard = Some(thread::spawn(move || monitor::run(player, poll_interval)));
    }

    /// One monitor tick: decide whether the current track ended naturally.
    /// Status and the busy probe are read under the same lock the command
    /// path holds, so a pause racing an idle output cannot slip through.
    pub(crate) fn check_track_end(&self) {
        let Ok(mut core) = self.shared.core.lock() else {
            return;
        };

        if core.state.status == PlaybackStatus::Playing && !self.shared.output.is_busy() {
            self.handle_track_end_locked(&mut core);
        }
    }

    fn handle_track_end_locked(&self, core: &mut Core) {
        // Never advance while paused, even if the output reads idle.
        if core.state.status == PlaybackStatus::Paused {
            return;
        }

        if !core.state.from_playlist {
            match core.state.current.clone() {
                Some(media) if core.state.loop_mode != LoopMode::None => {
                    debug!(media = %media, "track ended, looping standalone file");
                    self.play_locked(core, &media, false);
                }
                _ => core.state.status = PlaybackStatus::Stopped,
            }
            return;
        }

        if core.playlist.is_empty() {
            core.state.status = PlaybackStatus::Stopped;
            return;
        }

        debug!("track ended, advancing");
        self.advance_next_locked(core);
    }
}
