/// Round controller: IDLE -> SHAKING -> REVEALING -> RESOLVING -> IDLE
///
/// A round is split at its single suspension point. `start_round` admits the
/// round and plays the shake phase; whoever owns the timer calls
/// `complete_round` once the reveal delay has elapsed.
use clap::ValueEnum;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::audio::{AudioTransport, Track};
use crate::core::captions::{self, pick_variant};
use crate::core::commentary::{comment, Commentary};
use crate::core::moves::{resolve, Move, Outcome};
use crate::core::opponent::MoveGenerator;
use crate::core::presentation::{
    BubbleTag, CaptionTag, HandState, PresentationSink, SceneCategory, ScoreTag, Sound,
};
use crate::core::session::{Phase, RoundToken, Session, Side, SpecialEvent, Standing};
use crate::core::suspense::{Resume, SuspenseManager};
use crate::core::tolerate;

/// Which chant cue accompanies the shake
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChantMode {
    #[default]
    Voice,
    Hands,
}

impl ChantMode {
    fn sound(self) -> Sound {
        match self {
            ChantMode::Voice => Sound::ChantVoice,
            ChantMode::Hands => Sound::ChantHands,
        }
    }
}

/// A round admitted by `start_round`, waiting for its reveal
#[derive(Debug, Clone, Copy)]
pub struct PendingRound {
    token: RoundToken,
    pub human: Move,
    pub opponent: Move,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub human_move: Move,
    pub opponent_move: Move,
    pub outcome: Outcome,
    pub score_after: (u32, u32),
    pub special_events: Vec<SpecialEvent>,
    pub headline: String,
    pub commentary: Commentary,
}

pub struct RoundController {
    session: Session,
    suspense: SuspenseManager,
    opponent: Box<dyn MoveGenerator>,
    sink: Box<dyn PresentationSink>,
    audio: Box<dyn AudioTransport>,
    rng: StdRng,
    chant: ChantMode,
    music_on: bool,
}

impl RoundController {
    pub fn new(
        opponent: Box<dyn MoveGenerator>,
        sink: Box<dyn PresentationSink>,
        audio: Box<dyn AudioTransport>,
        rng: StdRng,
    ) -> Self {
        let mut controller = Self {
            session: Session::new(),
            suspense: SuspenseManager::new(),
            opponent,
            sink,
            audio,
            rng,
            chant: ChantMode::default(),
            music_on: false,
        };
        controller.present_idle();
        controller
    }

    pub fn with_chant(mut self, chant: ChantMode) -> Self {
        self.chant = chant;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn chant(&self) -> ChantMode {
        self.chant
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    /// Admit a round and play the shake phase. `None` when a round is already in flight.
    pub fn start_round(&mut self, human: Move) -> Option<PendingRound> {
        let Some(token) = self.session.begin_round() else {
            debug!(%human, "round request dropped while busy");
            return None;
        };

        let opponent = self.opponent.generate();

        if self.session.suspense_active() && !self.session.is_sudden_death() {
            self.suspense.stop(&mut self.session, self.audio.as_mut(), Resume::Background);
        }

        let sink = self.sink.as_mut();
        tolerate(sink.play_sound(self.chant.sound()), "play chant");
        tolerate(sink.show_hands(HandState::Shaking), "shake hands");
        for side in [Side::Player, Side::Opponent] {
            tolerate(
                sink.show_bubble(side, captions::BUBBLE_SHAKING, BubbleTag::Shaking),
                "shake bubble",
            );
        }
        let emoji = pick_variant(captions::SHAKE_EMOJIS, &mut self.rng).copied().unwrap_or("✊");
        tolerate(
            sink.show_caption(&format!("{} Shaking hands...", emoji), CaptionTag::Shake),
            "shake caption",
        );
        tolerate(sink.show_result(captions::SHAKE_RESULT), "shake status");

        info!(%human, %opponent, "round started");
        Some(PendingRound { token, human, opponent })
    }

    /// Reveal, resolve and react. `None` if a reset discarded the round meanwhile.
    pub fn complete_round(&mut self, pending: PendingRound) -> Option<RoundResult> {
        if !self.session.is_current(pending.token) {
            debug!("stale round discarded after reset");
            return None;
        }

        self.session.advance(Phase::Revealing);
        self.reveal(&pending);

        let outcome = resolve(pending.human, pending.opponent);
        self.session.advance(Phase::Resolving);
        self.show_scene_for(outcome);

        let mut headline = self.apply_outcome(&pending, outcome).to_string();
        self.show_standing();

        let special_events = self.session.special_events();
        for event in &special_events {
            let phrase = self.react(*event);
            headline.push(' ');
            headline.push_str(phrase);
        }

        let (player, opponent) = self.session.scores();
        let commentary = comment(player, opponent, outcome);
        headline.push(' ');
        headline.push_str(commentary.text);
        tolerate(self.sink.show_result(&headline), "show result");

        self.suspense.sync(&mut self.session, self.audio.as_mut());
        self.check_invariants();
        self.session.finish_round();

        info!(
            human = %pending.human,
            opponent = %pending.opponent,
            ?outcome,
            player,
            opponent_score = opponent,
            events = ?special_events,
            "round complete"
        );

        Some(RoundResult {
            human_move: pending.human,
            opponent_move: pending.opponent,
            outcome,
            score_after: (player, opponent),
            special_events,
            headline,
            commentary,
        })
    }

    /// Zero the match, silence suspense without bringing music back, redraw the idle table
    pub fn reset(&mut self) {
        self.session.reset();
        self.suspense.stop(&mut self.session, self.audio.as_mut(), Resume::Never);
        self.present_idle();

        if self.music_on && !self.audio.is_playing(Track::Background) {
            tolerate(self.audio.play(Track::Background), "restart background music");
        }

        self.check_invariants();
        info!("session reset");
    }

    /// Host-level music switch; returns the new setting
    pub fn toggle_music(&mut self) -> bool {
        let result = if self.music_on {
            self.audio.pause(Track::Background)
        } else {
            self.audio.play(Track::Background)
        };
        tolerate(result, "toggle background music");
        self.music_on = !self.music_on;
        info!(music_on = self.music_on, "music toggled");
        self.music_on
    }

    pub fn toggle_chant(&mut self) -> ChantMode {
        self.chant = match self.chant {
            ChantMode::Voice => ChantMode::Hands,
            ChantMode::Hands => ChantMode::Voice,
        };
        self.chant
    }

    fn reveal(&mut self, pending: &PendingRound) {
        let sink = self.sink.as_mut();
        tolerate(sink.show_hands(HandState::Open), "open hands");
        tolerate(
            sink.show_bubble(Side::Player, pending.human.glyph(), BubbleTag::Neutral),
            "reveal player",
        );
        tolerate(
            sink.show_bubble(Side::Opponent, pending.opponent.glyph(), BubbleTag::Neutral),
            "reveal opponent",
        );
    }

    fn show_scene_for(&mut self, outcome: Outcome) {
        let (category, pool) = match outcome {
            Outcome::Draw => (SceneCategory::Draw, captions::DRAW_SCENES),
            Outcome::PlayerWins => (SceneCategory::Win, captions::WIN_SCENES),
            Outcome::OpponentWins => (SceneCategory::Lose, captions::LOSE_SCENES),
        };
        let art = pick_variant(pool, &mut self.rng).copied().unwrap_or(captions::SCENE_INITIAL);
        tolerate(self.sink.show_scene(category, art), "show scene");
    }

    /// Score the round and play its caption and cue; returns the headline
    fn apply_outcome(&mut self, pending: &PendingRound, outcome: Outcome) -> &'static str {
        self.session.record(outcome);

        let (winner, headline, pool, tag, sound) = match outcome {
            Outcome::Draw => {
                let caption = pick_variant(captions::DRAW_CAPTIONS, &mut self.rng).copied().unwrap_or("");
                tolerate(self.sink.show_caption(caption, CaptionTag::Draw), "draw caption");
                tolerate(self.sink.play_sound(Sound::Draw), "draw sound");
                return captions::RESULT_DRAW;
            }
            Outcome::PlayerWins => (
                Side::Player,
                captions::RESULT_WIN,
                captions::WIN_CAPTIONS,
                CaptionTag::Win,
                Sound::Win,
            ),
            Outcome::OpponentWins => (
                Side::Opponent,
                captions::RESULT_LOSE,
                captions::LOSE_CAPTIONS,
                CaptionTag::Lose,
                Sound::Lose,
            ),
        };

        let caption = pick_variant(pool, &mut self.rng).copied().unwrap_or("");
        let sink = self.sink.as_mut();
        tolerate(sink.show_caption(caption, tag), "outcome caption");
        tolerate(sink.highlight_score(winner, ScoreTag::Pulse), "pulse score");

        let glyph = |side: Side| match side {
            Side::Player => pending.human.glyph(),
            Side::Opponent => pending.opponent.glyph(),
        };
        tolerate(sink.show_bubble(winner, glyph(winner), BubbleTag::Win), "winner bubble");
        tolerate(
            sink.show_bubble(winner.other(), glyph(winner.other()), BubbleTag::Lose),
            "loser bubble",
        );
        tolerate(sink.play_sound(sound), "outcome sound");
        headline
    }

    fn show_standing(&mut self) {
        let (player, opponent) = self.session.scores();
        let sink = self.sink.as_mut();
        tolerate(sink.show_scores(player, opponent), "show scores");
        match self.session.standing() {
            Standing::Ahead(leader) => {
                tolerate(sink.highlight_score(leader, ScoreTag::Winner), "highlight leader");
                tolerate(sink.highlight_score(leader.other(), ScoreTag::Loser), "highlight trailer");
            }
            Standing::Tied => {
                for side in [Side::Player, Side::Opponent] {
                    tolerate(sink.highlight_score(side, ScoreTag::Tie), "highlight tie");
                }
            }
        }
    }

    /// Audio and narrative for one threshold event; returns the phrase for the headline
    fn react(&mut self, event: SpecialEvent) -> &'static str {
        match event {
            SpecialEvent::SuddenDeathTie => {
                self.stop_match_point_cues();
                self.suspense.start(&mut self.session, self.audio.as_mut());
                pick_variant(captions::SUDDEN_DEATH_CAPTIONS, &mut self.rng)
                    .copied()
                    .unwrap_or("")
            }
            SpecialEvent::PlayerMatchPoint => {
                self.restart_track(Track::PlayerMatchPoint);
                captions::PLAYER_MATCH_POINT
            }
            SpecialEvent::OpponentMatchPoint => {
                self.restart_track(Track::OpponentMatchPoint);
                captions::OPPONENT_MATCH_POINT
            }
            SpecialEvent::PlayerChampion => {
                self.silence_for_champion();
                tolerate(self.sink.play_sound(Sound::EpicWin), "champion sound");
                captions::PLAYER_CHAMPION
            }
            SpecialEvent::OpponentChampion => {
                self.silence_for_champion();
                tolerate(self.sink.play_sound(Sound::GameOver), "game over sound");
                captions::OPPONENT_CHAMPION
            }
        }
    }

    fn restart_track(&mut self, track: Track) {
        tolerate(self.audio.seek(track, Duration::ZERO), "rewind cue");
        tolerate(self.audio.play(track), "play cue");
    }

    fn stop_match_point_cues(&mut self) {
        for track in [Track::PlayerMatchPoint, Track::OpponentMatchPoint] {
            if self.audio.is_playing(track) {
                tolerate(self.audio.pause(track), "stop match point cue");
                tolerate(self.audio.seek(track, Duration::ZERO), "rewind match point cue");
            }
        }
    }

    fn silence_for_champion(&mut self) {
        self.stop_match_point_cues();
        self.suspense.stop(&mut self.session, self.audio.as_mut(), Resume::Never);
    }

    fn present_idle(&mut self) {
        let sink = self.sink.as_mut();
        tolerate(sink.show_hands(HandState::Closed), "close hands");
        for side in [Side::Player, Side::Opponent] {
            tolerate(sink.show_bubble(side, captions::BUBBLE_IDLE, BubbleTag::Neutral), "idle bubble");
        }
        tolerate(sink.show_scene(SceneCategory::Initial, captions::SCENE_INITIAL), "idle scene");
        tolerate(sink.show_caption(captions::IDLE_CAPTION, CaptionTag::Idle), "idle caption");
        tolerate(sink.show_result(captions::IDLE_RESULT), "idle status");
        self.show_standing();
    }

    /// Suspense must mirror the sudden-death tie; resync if it ever drifts
    fn check_invariants(&mut self) {
        let consistent = self.session.suspense_active() == self.session.is_sudden_death();
        debug_assert!(consistent, "suspense flag out of sync with scores {:?}", self.session.scores());
        if !consistent {
            warn!(scores = ?self.session.scores(), "suspense flag drifted; resyncing");
            self.suspense.sync(&mut self.session, self.audio.as_mut());
        }
    }
}
