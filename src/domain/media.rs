use crate::get_readable_duration;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

/// Opaque reference to a playable item.
///
/// The core never looks inside the path; decoding it is the audio
/// backend's problem.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef(PathBuf);

impl MediaRef {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        MediaRef(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

impl From<&str> for MediaRef {
    fn from(path: &str) -> Self {
        MediaRef::new(path)
    }
}

impl From<PathBuf> for MediaRef {
    fn from(path: PathBuf) -> Self {
        MediaRef(path)
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Display metadata for the loaded track, refreshed best-effort on each
/// play. A failed lookup leaves the previous values in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration: Duration,
}

impl TrackInfo {
    pub fn duration_str(&self) -> String {
        get_readable_duration(self.duration)
    }
}

impl Default for TrackInfo {
    fn default() -> Self {
        TrackInfo {
            title: "No title available".to_string(),
            artist: "Unknown artist".to_string(),
            album: "No album info".to_string(),
            duration: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ref_detection() {
        assert!(MediaRef::new("").is_empty());
        assert!(!MediaRef::from("/music/song.flac").is_empty());
    }

    #[test]
    fn placeholder_metadata() {
        let info = TrackInfo::default();
        assert_eq!(info.title, "No title available");
        assert_eq!(info.artist, "Unknown artist");
        assert_eq!(info.album, "No album info");
        assert_eq!(info.duration_str(), "0:00");
    }
}
