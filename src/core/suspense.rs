/// Sudden-death tension mode, engaged only while both scores sit at the tie threshold
use tracing::{debug, info};

use crate::core::audio::{AudioTransport, Track};
use crate::core::session::Session;
use crate::core::tolerate;
use std::time::Duration;

/// Whether stopping suspense may bring back the background music it paused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Background,
    Never,
}

#[derive(Debug, Default)]
pub struct SuspenseManager {
    /// Background music was playing when suspense paused it
    paused_background: bool,
}

impl SuspenseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make suspense active iff the score pair is the sudden-death tie. Idempotent.
    pub fn sync(&mut self, session: &mut Session, audio: &mut dyn AudioTransport) {
        if session.is_sudden_death() {
            self.start(session, audio);
        } else {
            self.stop(session, audio, Resume::Background);
        }
    }

    pub fn start(&mut self, session: &mut Session, audio: &mut dyn AudioTransport) {
        if session.suspense_active() {
            return;
        }

        self.paused_background = audio.is_playing(Track::Background);
        if self.paused_background {
            tolerate(audio.pause(Track::Background), "pause background music");
        }

        tolerate(audio.set_loop(Track::SuddenDeathLoop, true), "loop suspense track");
        tolerate(audio.seek(Track::SuddenDeathLoop, Duration::ZERO), "rewind suspense track");
        tolerate(audio.play(Track::SuddenDeathLoop), "play suspense track");
        session.set_suspense(true);
        info!(paused_background = self.paused_background, "suspense engaged");
    }

    pub fn stop(&mut self, session: &mut Session, audio: &mut dyn AudioTransport, resume: Resume) {
        if !session.suspense_active() {
            return;
        }

        tolerate(audio.set_loop(Track::SuddenDeathLoop, false), "unloop suspense track");
        tolerate(audio.pause(Track::SuddenDeathLoop), "pause suspense track");
        tolerate(audio.seek(Track::SuddenDeathLoop, Duration::ZERO), "rewind suspense track");
        session.set_suspense(false);

        let resumed = resume == Resume::Background && self.paused_background;
        if resumed {
            tolerate(audio.play(Track::Background), "resume background music");
        }
        self.paused_background = false;
        debug!(?resume, resumed, "suspense released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::{MemoryTransport, TransportCall};

    #[test]
    fn test_sync_is_idempotent() {
        let mut session = Session::with_scores(9, 9);
        let transport = MemoryTransport::new();
        let mut audio = transport.clone();
        let mut suspense = SuspenseManager::new();

        suspense.sync(&mut session, &mut audio);
        assert!(session.suspense_active());
        let after_first = transport.calls().len();
        assert!(after_first > 0);

        suspense.sync(&mut session, &mut audio);
        assert_eq!(transport.calls().len(), after_first);

        let mut calm = Session::with_scores(2, 1);
        let mut quiet = SuspenseManager::new();
        transport.clear_calls();
        quiet.sync(&mut calm, &mut audio);
        quiet.sync(&mut calm, &mut audio);
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_pauses_and_resumes_background() {
        let mut session = Session::with_scores(9, 9);
        let transport = MemoryTransport::new();
        let mut audio = transport.clone();
        audio.play(Track::Background).unwrap();
        let mut suspense = SuspenseManager::new();

        suspense.sync(&mut session, &mut audio);
        assert!(!transport.is_playing(Track::Background));
        assert!(transport.state(Track::SuddenDeathLoop).looping);
        assert!(transport.is_playing(Track::SuddenDeathLoop));

        session.record(crate::core::moves::Outcome::PlayerWins);
        suspense.sync(&mut session, &mut audio);
        assert!(!session.suspense_active());
        assert!(!transport.is_playing(Track::SuddenDeathLoop));
        assert!(transport.is_playing(Track::Background));
    }

    #[test]
    fn test_never_resumes_music_it_did_not_pause() {
        let mut session = Session::with_scores(9, 9);
        let transport = MemoryTransport::new();
        let mut audio = transport.clone();
        let mut suspense = SuspenseManager::new();

        suspense.sync(&mut session, &mut audio);
        session.reset();
        suspense.sync(&mut session, &mut audio);
        assert!(!transport.calls().contains(&TransportCall::Play(Track::Background)));
    }

    #[test]
    fn test_forced_stop_skips_resume() {
        let mut session = Session::with_scores(9, 9);
        let transport = MemoryTransport::new();
        let mut audio = transport.clone();
        audio.play(Track::Background).unwrap();
        let mut suspense = SuspenseManager::new();

        suspense.start(&mut session, &mut audio);
        suspense.stop(&mut session, &mut audio, Resume::Never);
        assert!(!session.suspense_active());
        assert!(!transport.is_playing(Track::Background));

        // a later ordinary stop must not find a stale "paused" marker
        suspense.stop(&mut session, &mut audio, Resume::Background);
        assert!(!transport.is_playing(Track::Background));
    }
}
