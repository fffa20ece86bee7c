use crate::{
    domain::{MediaRef, Playlist},
    player::{LoopMode, PlayerState},
};

/// What should play in place of the current track.
///
/// Resolved purely from `(PlayerState, Playlist)`; the controller applies
/// the action and updates the playlist selection when it does.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Stop,
    Replay(MediaRef),
    PlayAt { title: String, media: MediaRef },
}

enum Direction {
    Forward,
    Backward,
}

pub fn next_action(state: &PlayerState, playlist: &Playlist) -> Action {
    resolve(state, playlist, Direction::Forward)
}

pub fn previous_action(state: &PlayerState, playlist: &Playlist) -> Action {
    resolve(state, playlist, Direction::Backward)
}

fn resolve(state: &PlayerState, playlist: &Playlist, direction: Direction) -> Action {
    let Some(current) = &state.current else {
        return Action::Stop;
    };

    // A standalone file never walks the playlist: it loops onto itself or
    // it stops.
    if !state.from_playlist {
        return match state.loop_mode {
            LoopMode::None => Action::Stop,
            LoopMode::One | LoopMode::All => Action::Replay(current.clone()),
        };
    }

    if state.loop_mode == LoopMode::One {
        return Action::Replay(current.clone());
    }

    if playlist.is_empty() {
        return Action::Stop;
    }

    // A selection missing from the displayed order means the playlist
    // changed underneath us; stopping beats guessing an index.
    let Some(selection) = &state.selection else {
        return Action::Stop;
    };
    let Some(index) = playlist.index_of(&selection.title) else {
        return Action::Stop;
    };

    let last = playlist.len() - 1;
    let target = match direction {
        Direction::Forward if index < last => Some(index + 1),
        Direction::Backward if index > 0 => Some(index - 1),
        // Wrapping past either end is only for LoopMode::All
        Direction::Forward if state.loop_mode == LoopMode::All => Some(0),
        Direction::Backward if state.loop_mode == LoopMode::All => Some(last),
        _ => None,
    };

    match target.and_then(|i| playlist.entry_at(i)) {
        Some((title, media)) => Action::PlayAt {
            title: title.to_string(),
            media: media.clone(),
        },
        None => Action::Stop,
    }
}
