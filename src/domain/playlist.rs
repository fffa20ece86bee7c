use super::MediaRef;
use indexmap::IndexMap;
use rand::seq::SliceRandom;

/// The displayed track order: title → media, in the order the user sees.
///
/// While shuffled, the pre-shuffle order is retained so unshuffling can
/// restore it exactly. The snapshot is taken fresh on every shuffle and
/// discarded on restore.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    tracks: IndexMap<String, MediaRef>,
    unshuffled: Option<IndexMap<String, MediaRef>>,
}

impl Playlist {
    pub fn new() -> Self {
        Playlist::default()
    }

    pub fn from_tracks<I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = (String, MediaRef)>,
    {
        Playlist {
            tracks: tracks.into_iter().collect(),
            unshuffled: None,
        }
    }

    /// Append a track. While shuffled, the restore snapshot picks it up too,
    /// so it survives turning shuffle off.
    pub fn add<S: Into<String>>(&mut self, title: S, media: MediaRef) {
        let title = title.into();
        if let Some(original) = &mut self.unshuffled {
            original.insert(title.clone(), media.clone());
        }
        self.tracks.insert(title, media);
    }

    pub fn remove(&mut self, title: &str) -> Option<MediaRef> {
        if let Some(original) = &mut self.unshuffled {
            original.shift_remove(title);
        }
        self.tracks.shift_remove(title)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.unshuffled = None;
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&MediaRef> {
        self.tracks.get(title)
    }

    /// Position of `title` in the displayed order.
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.tracks.get_index_of(title)
    }

    pub fn entry_at(&self, index: usize) -> Option<(&str, &MediaRef)> {
        self.tracks.get_index(index).map(|(t, m)| (t.as_str(), m))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &MediaRef)> {
        self.tracks.iter().map(|(t, m)| (t.as_str(), m))
    }

    pub fn is_shuffled(&self) -> bool {
        self.unshuffled.is_some()
    }

    /// Snapshot the current displayed order, then replace it with a random
    /// permutation of itself.
    pub fn shuffle(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        self.unshuffled = Some(self.tracks.clone());

        let mut entries: Vec<(String, MediaRef)> = self.tracks.drain(..).collect();
        entries.shuffle(&mut rand::rng());
        self.tracks = entries.into_iter().collect();
    }

    /// Put the displayed order back to the snapshot taken by `shuffle` and
    /// drop the snapshot.
    pub fn restore_order(&mut self) {
        if let Some(original) = self.unshuffled.take() {
            self.tracks = original;
        }
    }
}
