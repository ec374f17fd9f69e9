use crate::core::controller::{ChantMode, RoundController, RoundResult};
use crate::core::moves::Move;
use crate::core::session::Phase;
use crate::core::timer::{Timer, TimerHandle};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Default pause between the shake and the reveal
pub const REVEAL_DELAY: Duration = Duration::from_millis(1800);

/// Cloneable handle the host drives the match through.
/// Each admitted round schedules exactly one timer that completes it.
#[derive(Clone)]
pub struct Engine {
    controller: Arc<Mutex<RoundController>>,
    pending: Arc<Mutex<Option<TimerHandle>>>,
    timer: Timer,
    delay: Duration,
    results: mpsc::UnboundedSender<RoundResult>,
}

impl Engine {
    pub fn new(controller: RoundController, delay: Duration) -> (Self, mpsc::UnboundedReceiver<RoundResult>) {
        let (results, results_rx) = mpsc::unbounded_channel();
        let engine = Self {
            controller: Arc::new(Mutex::new(controller)),
            pending: Arc::new(Mutex::new(None)),
            timer: Timer,
            delay,
            results,
        };
        (engine, results_rx)
    }

    /// Start a round; `false` when one is already in flight and the request was dropped
    pub fn play_round(&self, human: Move) -> bool {
        let Some(round) = self.controller().start_round(human) else {
            return false;
        };

        let controller = self.controller.clone();
        let results = self.results.clone();
        let handle = self.timer.after(self.delay, move || {
            let finished = lock(&controller).complete_round(round);
            if let Some(result) = finished {
                if results.send(result).is_err() {
                    debug!("round result dropped: no listener");
                }
            }
        });
        *lock(&self.pending) = Some(handle);
        true
    }

    pub fn reset(&self) {
        if let Some(handle) = lock(&self.pending).take() {
            handle.cancel();
        }
        self.controller().reset();
    }

    pub fn toggle_music(&self) -> bool {
        self.controller().toggle_music()
    }

    pub fn toggle_chant(&self) -> ChantMode {
        self.controller().toggle_chant()
    }

    pub fn player_score(&self) -> u32 {
        self.controller().session().player_score()
    }

    pub fn opponent_score(&self) -> u32 {
        self.controller().session().opponent_score()
    }

    pub fn suspense_active(&self) -> bool {
        self.controller().session().suspense_active()
    }

    pub fn busy(&self) -> bool {
        self.controller().session().busy()
    }

    pub fn phase(&self) -> Phase {
        self.controller().session().phase()
    }

    pub fn music_on(&self) -> bool {
        self.controller().music_on()
    }

    pub fn chant(&self) -> ChantMode {
        self.controller().chant()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn controller(&self) -> MutexGuard<'_, RoundController> {
        lock(&self.controller)
    }
}

/// A panic elsewhere must not wedge the match; the state behind the lock stays usable
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::MemoryTransport;
    use crate::core::opponent::ScriptedOpponent;
    use crate::core::presentation::RecordingSink;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(cpu: Move) -> (Engine, mpsc::UnboundedReceiver<RoundResult>) {
        let controller = RoundController::new(
            Box::new(ScriptedOpponent::always(cpu)),
            Box::new(RecordingSink::new()),
            Box::new(MemoryTransport::new()),
            StdRng::seed_from_u64(5),
        );
        Engine::new(controller, REVEAL_DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_only_during_delay() {
        let (engine, mut results) = engine(Move::Scissors);
        assert!(!engine.busy());

        assert!(engine.play_round(Move::Rock));
        assert!(engine.busy());
        assert_eq!(engine.phase(), Phase::Shaking);
        assert!(!engine.play_round(Move::Paper));

        let result = results.recv().await.unwrap();
        assert_eq!(result.score_after, (1, 0));
        assert!(!engine.busy());
        assert_eq!(engine.player_score(), 1);
        assert_eq!(engine.opponent_score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_mid_round_cancels_completion() {
        let (engine, mut results) = engine(Move::Scissors);
        assert!(engine.play_round(Move::Rock));
        engine.reset();
        assert!(!engine.busy());

        tokio::time::sleep(REVEAL_DELAY * 2).await;
        assert!(results.try_recv().is_err());
        assert_eq!(engine.player_score(), 0);

        assert!(engine.play_round(Move::Rock));
        assert_eq!(results.recv().await.unwrap().score_after, (1, 0));
    }
}
