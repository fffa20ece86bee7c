//! Property tests for the order-restoring shuffle law, loop cycling and
//! volume clamping.

use ostinato::{
    AudioOutput, LoopMode, MediaRef, MetadataLookup, NotificationSink, PlayerConfig,
    PlayerController, Playlist, TrackInfo,
};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_titles() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,12}", 1..40)
        .prop_map(|titles| titles.into_iter().collect())
}

fn playlist_from(titles: &[String]) -> Playlist {
    Playlist::from_tracks(
        titles
            .iter()
            .map(|t| (t.clone(), MediaRef::new(format!("/music/{t}.mp3")))),
    )
}

fn displayed(playlist: &Playlist) -> Vec<String> {
    playlist.entries().map(|(t, _)| t.to_string()).collect()
}

struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn load_and_play(&self, _media: &MediaRef) -> bool {
        true
    }
    fn pause(&self) {}
    fn resume(&self) {}
    fn stop(&self) {}
    fn set_volume(&self, _volume: f32) {}
    fn is_busy(&self) -> bool {
        true
    }
}

struct NoMetadata;

impl MetadataLookup for NoMetadata {
    fn lookup(&self, _media: &MediaRef) -> anyhow::Result<TrackInfo> {
        anyhow::bail!("no tags")
    }
}

struct Quiet;

impl NotificationSink for Quiet {
    fn notify(&self, _message: &str) {}
}

fn silent_player() -> PlayerController {
    PlayerController::new(
        Box::new(SilentOutput),
        Box::new(NoMetadata),
        Box::new(Quiet),
        PlayerConfig::default(),
    )
}

// ===== Property tests =====

proptest! {
    /// Shuffling on then off restores the exact displayed order, for any
    /// non-empty playlist.
    #[test]
    fn shuffle_round_trip_restores_order(titles in arbitrary_titles()) {
        let mut playlist = playlist_from(&titles);
        let original = displayed(&playlist);

        playlist.shuffle();
        playlist.restore_order();

        prop_assert_eq!(displayed(&playlist), original);
    }

    /// Shuffling changes only the order, never the contents.
    #[test]
    fn shuffle_preserves_track_set(titles in arbitrary_titles()) {
        let mut playlist = playlist_from(&titles);
        playlist.shuffle();

        prop_assert_eq!(playlist.len(), titles.len());
        for title in &titles {
            prop_assert!(playlist.get(title).is_some());
        }
    }

    /// Loop mode cycling has period three from any starting mode.
    #[test]
    fn loop_cycle_has_period_three(start in prop::sample::select(vec![
        LoopMode::None,
        LoopMode::One,
        LoopMode::All,
    ])) {
        prop_assert_eq!(start.cycle().cycle().cycle(), start);
        prop_assert_ne!(start.cycle(), start);
    }

    /// No sequence of volume steps escapes `[0.0, 1.0]`, and the ends are
    /// sticky.
    #[test]
    fn volume_stays_clamped(deltas in prop::collection::vec(-0.5f32..0.5, 1..50)) {
        let player = silent_player();

        for delta in deltas {
            let state = player.adjust_volume(delta);
            prop_assert!((0.0..=1.0).contains(&state.volume));
        }

        let ceiling = player.adjust_volume(2.0);
        prop_assert_eq!(ceiling.volume, 1.0);
        prop_assert_eq!(player.adjust_volume(0.1).volume, 1.0);

        let floor = player.adjust_volume(-2.0);
        prop_assert_eq!(floor.volume, 0.0);
        prop_assert_eq!(player.adjust_volume(-0.1).volume, 0.0);
    }
}
