/// Stateful audio tracks: background music, the sudden-death loop and match-point cues
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Background,
    SuddenDeathLoop,
    PlayerMatchPoint,
    OpponentMatchPoint,
}

/// Transport controls over long-lived tracks; every call may fail and callers tolerate it
pub trait AudioTransport: Send {
    fn play(&mut self, track: Track) -> Result<()>;
    fn pause(&mut self, track: Track) -> Result<()>;
    fn set_loop(&mut self, track: Track, looping: bool) -> Result<()>;
    fn seek(&mut self, track: Track, position: Duration) -> Result<()>;
    fn is_playing(&self, track: Track) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    Play(Track),
    Pause(Track),
    SetLoop(Track, bool),
    Seek(Track, Duration),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackState {
    pub playing: bool,
    pub looping: bool,
    pub position: Duration,
}

#[derive(Default)]
struct Deck {
    tracks: HashMap<Track, TrackState>,
    calls: Vec<TransportCall>,
}

/// In-memory transport: tracks play state and, when recording, logs every call.
/// Clones share the same deck so a host or a test can observe what the controller did.
#[derive(Clone)]
pub struct MemoryTransport {
    deck: Arc<Mutex<Deck>>,
    recording: bool,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransport {
    /// Recording transport for tests and diagnostics
    pub fn new() -> Self {
        Self { deck: Arc::default(), recording: true }
    }

    /// Tracks play state only; the call log stays empty for long-running hosts
    pub fn state_only() -> Self {
        Self { deck: Arc::default(), recording: false }
    }

    pub fn state(&self, track: Track) -> TrackState {
        self.deck
            .lock()
            .map(|deck| deck.tracks.get(&track).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.deck.lock().map(|deck| deck.calls.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut deck) = self.deck.lock() {
            deck.calls.clear();
        }
    }

    fn with_track(&self, call: TransportCall, track: Track, f: impl FnOnce(&mut TrackState)) -> Result<()> {
        let mut deck = self.deck.lock().map_err(|_| anyhow!("audio deck lock poisoned"))?;
        if self.recording {
            deck.calls.push(call);
        }
        f(deck.tracks.entry(track).or_default());
        Ok(())
    }
}

impl AudioTransport for MemoryTransport {
    fn play(&mut self, track: Track) -> Result<()> {
        self.with_track(TransportCall::Play(track), track, |t| t.playing = true)
    }

    fn pause(&mut self, track: Track) -> Result<()> {
        self.with_track(TransportCall::Pause(track), track, |t| t.playing = false)
    }

    fn set_loop(&mut self, track: Track, looping: bool) -> Result<()> {
        self.with_track(TransportCall::SetLoop(track, looping), track, |t| t.looping = looping)
    }

    fn seek(&mut self, track: Track, position: Duration) -> Result<()> {
        self.with_track(TransportCall::Seek(track, position), track, |t| t.position = position)
    }

    fn is_playing(&self, track: Track) -> bool {
        self.state(track).playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let observer = MemoryTransport::new();
        let mut transport = observer.clone();
        transport.play(Track::Background).unwrap();
        assert!(observer.is_playing(Track::Background));
        transport.pause(Track::Background).unwrap();
        assert!(!observer.is_playing(Track::Background));
        assert_eq!(
            observer.calls(),
            vec![TransportCall::Play(Track::Background), TransportCall::Pause(Track::Background)]
        );
    }

    #[test]
    fn test_state_only_keeps_no_log() {
        let observer = MemoryTransport::state_only();
        let mut transport = observer.clone();
        for _ in 0..50 {
            transport.play(Track::SuddenDeathLoop).unwrap();
            transport.set_loop(Track::SuddenDeathLoop, true).unwrap();
        }
        assert!(observer.calls().is_empty());
        assert!(observer.is_playing(Track::SuddenDeathLoop));
        assert!(observer.state(Track::SuddenDeathLoop).looping);
    }
}
