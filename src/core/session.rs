/// Match state: the score pair, the round phase and the suspense flag
use serde::{Deserialize, Serialize};

use crate::core::moves::Outcome;

/// Wins needed to take the match
pub const THRESHOLD_WIN: u32 = 10;
/// One below the winning threshold: match point, or sudden death when both sit here
pub const THRESHOLD_TIE: u32 = THRESHOLD_WIN - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Shaking,
    Revealing,
    Resolving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEvent {
    PlayerMatchPoint,
    OpponentMatchPoint,
    SuddenDeathTie,
    PlayerChampion,
    OpponentChampion,
}

/// Who is ahead on the scoreboard, derived from the scores every time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Ahead(Side),
    Tied,
}

/// Proof that a round was admitted; stale after a reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundToken {
    epoch: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    player_score: u32,
    opponent_score: u32,
    phase: Phase,
    suspense_active: bool,
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            player_score: 0,
            opponent_score: 0,
            phase: Phase::Idle,
            suspense_active: false,
            epoch: 0,
        }
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.opponent_score)
    }

    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// True from round start until round completion
    pub fn busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn suspense_active(&self) -> bool {
        self.suspense_active
    }

    pub fn is_sudden_death(&self) -> bool {
        self.player_score == THRESHOLD_TIE && self.opponent_score == THRESHOLD_TIE
    }

    /// The side sitting one win away while the other trails
    pub fn match_point(&self) -> Option<Side> {
        [Side::Player, Side::Opponent]
            .into_iter()
            .find(|&side| self.score_of(side) == THRESHOLD_TIE && self.score_of(side.other()) < THRESHOLD_TIE)
    }

    /// The side sitting on the winning threshold ahead of the other.
    /// Play is never locked: a draw at 10 reports it again, an 11th win does not.
    pub fn champion(&self) -> Option<Side> {
        [Side::Player, Side::Opponent]
            .into_iter()
            .find(|&side| self.score_of(side) == THRESHOLD_WIN && self.score_of(side) > self.score_of(side.other()))
    }

    pub fn standing(&self) -> Standing {
        match self.player_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => Standing::Ahead(Side::Player),
            std::cmp::Ordering::Less => Standing::Ahead(Side::Opponent),
            std::cmp::Ordering::Equal => Standing::Tied,
        }
    }

    /// Threshold events implied by the current score pair, in evaluation order
    pub fn special_events(&self) -> Vec<SpecialEvent> {
        let mut events = Vec::new();
        if self.is_sudden_death() {
            events.push(SpecialEvent::SuddenDeathTie);
        } else {
            match self.match_point() {
                Some(Side::Player) => events.push(SpecialEvent::PlayerMatchPoint),
                Some(Side::Opponent) => events.push(SpecialEvent::OpponentMatchPoint),
                None => {}
            }
        }
        match self.champion() {
            Some(Side::Player) => events.push(SpecialEvent::PlayerChampion),
            Some(Side::Opponent) => events.push(SpecialEvent::OpponentChampion),
            None => {}
        }
        events
    }

    /// Admit a new round, or refuse when one is already in flight
    pub(crate) fn begin_round(&mut self) -> Option<RoundToken> {
        if self.busy() {
            return None;
        }
        self.phase = Phase::Shaking;
        Some(RoundToken { epoch: self.epoch })
    }

    pub(crate) fn is_current(&self, token: RoundToken) -> bool {
        self.busy() && token.epoch == self.epoch
    }

    pub(crate) fn advance(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Draw => {}
            Outcome::PlayerWins => self.player_score += 1,
            Outcome::OpponentWins => self.opponent_score += 1,
        }
    }

    pub(crate) fn finish_round(&mut self) {
        self.phase = Phase::Idle;
    }

    pub(crate) fn set_suspense(&mut self, active: bool) {
        self.suspense_active = active;
    }

    /// Zero the scores and drop any round in flight
    pub(crate) fn reset(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.phase = Phase::Idle;
        self.epoch += 1;
    }

    #[cfg(test)]
    pub(crate) fn with_scores(player: u32, opponent: u32) -> Self {
        Self {
            player_score: player,
            opponent_score: opponent,
            ..Self::new()
        }
    }
}
