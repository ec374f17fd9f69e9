use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::core::audio::{MemoryTransport, Track};
use crate::core::controller::RoundResult;
use crate::core::engine::Engine;
use crate::core::moves::Move;
use crate::host::renderer::{self, Snapshot};
use crate::host::stage::StageSink;

enum Flow {
    Continue,
    Quit,
}

/// Interactive terminal host: keys in, stage out, redrawn every frame
pub struct TerminalHost {
    engine: Engine,
    stage: StageSink,
    deck: MemoryTransport,
    results: mpsc::UnboundedReceiver<RoundResult>,
}

impl TerminalHost {
    pub fn new(
        engine: Engine,
        stage: StageSink,
        deck: MemoryTransport,
        results: mpsc::UnboundedReceiver<RoundResult>,
    ) -> Self {
        Self { engine, stage, deck, results }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()?;
        let outcome = self.event_loop(&mut terminal).await;
        ratatui::restore();
        outcome
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut render_timer = tokio::time::interval(Duration::from_millis(33));

        loop {
            match self.snapshot() {
                Ok(view) => {
                    terminal.draw(|f| renderer::render(f, &view))?;
                }
                Err(e) => warn!(error = %e, "skipping frame"),
            }

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Flow::Quit = self.handle_key(key.code) {
                            break;
                        }
                    }
                }
            }

            tokio::select! {
                _ = render_timer.tick() => {}

                Some(result) = self.results.recv() => {
                    info!(
                        outcome = ?result.outcome,
                        score = ?result.score_after,
                        events = ?result.special_events,
                        "round shown"
                    );
                }
            }
        }

        info!(
            player = self.engine.player_score(),
            opponent = self.engine.opponent_score(),
            "leaving table"
        );
        Ok(())
    }

    fn handle_key(&self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('0') => self.engine.reset(),
            KeyCode::Char('m') => {
                self.engine.toggle_music();
            }
            KeyCode::Char('v') => {
                self.engine.toggle_chant();
            }
            KeyCode::Char(c) => {
                // Only r/p/s parse; anything else never reaches the controller
                if let Ok(mv) = c.to_string().parse::<Move>() {
                    if !self.engine.play_round(mv) {
                        info!(%mv, "busy, key ignored");
                    }
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            stage: self.stage.snapshot()?,
            phase: self.engine.phase(),
            suspense: self.engine.suspense_active(),
            music_on: self.engine.music_on(),
            chant: self.engine.chant(),
            background: self.deck.state(Track::Background),
        })
    }
}
