//! Background music controls over an injected media-player capability.
//!
//! The embedded player is owned by a third-party widget that becomes usable
//! only after it signals readiness. `PlayerControls` starts detached, remembers
//! the requested volume, and is handed the player through `attach` once the
//! widget is ready. Until then every control is a no-op.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 50;

/// Playback state reported by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

/// Which glyph the play/pause button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    Play,
    Pause,
}

/// Capability handed over by the player widget once it is ready.
pub trait MediaPlayer: Send + Sync {
    fn play(&self);
    fn pause(&self);
    fn set_volume(&self, volume: u8);
    fn state(&self) -> PlayerState;
}

/// Pause icon while playing, play icon otherwise.
#[must_use]
pub fn icon_for(state: PlayerState) -> ToggleIcon {
    match state {
        PlayerState::Playing => ToggleIcon::Pause,
        _ => ToggleIcon::Play,
    }
}

struct Inner {
    player: Option<Box<dyn MediaPlayer>>,
    volume: u8,
}

pub struct PlayerControls {
    inner: Mutex<Inner>,
}

impl Default for PlayerControls {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl PlayerControls {
    #[must_use]
    pub fn new(initial_volume: u8) -> Self {
        Self { inner: Mutex::new(Inner { player: None, volume: initial_volume.min(MAX_VOLUME) }) }
    }

    /// Hand over the ready player: apply the remembered volume, then try to
    /// start playback. Replaces any previously attached player.
    pub fn attach(&self, player: Box<dyn MediaPlayer>) {
        let mut inner = self.lock();
        player.set_volume(inner.volume);
        player.play();
        debug!(volume = inner.volume, "media player attached");
        inner.player = Some(player);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lock().player.is_some()
    }

    #[must_use]
    pub fn volume(&self) -> u8 {
        self.lock().volume
    }

    /// Pause when playing, play in every other state.
    pub fn toggle_play_pause(&self) {
        let inner = self.lock();
        let Some(player) = inner.player.as_ref() else {
            return;
        };
        if player.state() == PlayerState::Playing {
            player.pause();
        } else {
            player.play();
        }
    }

    /// Clamp to 0..=100, remember, and forward when a player is attached.
    pub fn set_volume(&self, volume: u8) {
        let mut inner = self.lock();
        inner.volume = volume.min(MAX_VOLUME);
        if let Some(player) = inner.player.as_ref() {
            player.set_volume(inner.volume);
        }
    }

    /// Icon for the current state; the play icon before the player is ready.
    #[must_use]
    pub fn icon(&self) -> ToggleIcon {
        self.lock()
            .player
            .as_ref()
            .map_or(ToggleIcon::Play, |player| icon_for(player.state()))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "player_test.rs"]
mod tests;
