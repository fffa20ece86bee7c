use crate::domain::{MediaRef, TrackInfo};
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// The audio engine as the player sees it. Implementations wrap whatever
/// actually produces sound; the core only starts it, stops it and probes it.
pub trait AudioOutput: Send + Sync {
    /// Load `media` and start playing it. `false` means the output rejected
    /// the media; the controller treats that as non-fatal and moves on.
    fn load_and_play(&self, media: &MediaRef) -> bool;

    fn pause(&self);

    fn resume(&self);

    fn stop(&self);

    /// `volume` is in `[0.0, 1.0]`, already clamped by the caller.
    fn set_volume(&self, volume: f32);

    /// Whether the output is still producing sound. Reads false after a
    /// natural end-of-track as well as after an explicit stop or pause.
    fn is_busy(&self) -> bool;
}

/// Tag lookup for a playable item. May fail; playback never depends on it.
pub trait MetadataLookup: Send + Sync {
    fn lookup(&self, media: &MediaRef) -> Result<TrackInfo>;
}

/// Fire-and-forget user-visible warnings.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier backed by a channel, for front ends that drain messages on
/// their own tick.
pub struct ChannelNotifier {
    sender: Sender<String>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, Receiver<String>) {
        let (sender, receiver) = unbounded();
        (ChannelNotifier { sender }, receiver)
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, message: &str) {
        // A disconnected receiver just means nobody is listening anymore.
        let _ = self.sender.send(message.to_string());
    }
}
