/// Presentation sink: declarative commands the round controller emits
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::core::session::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandState {
    Closed,
    Shaking,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleTag {
    Neutral,
    Shaking,
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneCategory {
    Initial,
    Draw,
    Win,
    Lose,
}

/// Fire-and-forget cues; stoppable tracks live on the audio transport instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    ChantVoice,
    ChantHands,
    Win,
    Lose,
    Draw,
    EpicWin,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionTag {
    Idle,
    Shake,
    Win,
    Lose,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTag {
    Winner,
    Loser,
    Tie,
    Pulse,
}

/// Owns no game logic. Implementations may fail; the controller logs and moves on.
pub trait PresentationSink: Send {
    fn show_hands(&mut self, state: HandState) -> Result<()>;
    fn show_bubble(&mut self, side: Side, text: &str, tag: BubbleTag) -> Result<()>;
    fn show_scene(&mut self, category: SceneCategory, art: &str) -> Result<()>;
    fn play_sound(&mut self, sound: Sound) -> Result<()>;
    fn show_caption(&mut self, text: &str, tag: CaptionTag) -> Result<()>;
    fn show_result(&mut self, text: &str) -> Result<()>;
    fn show_scores(&mut self, player: u32, opponent: u32) -> Result<()>;
    fn highlight_score(&mut self, side: Side, tag: ScoreTag) -> Result<()>;
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn show_hands(&mut self, _state: HandState) -> Result<()> {
        Ok(())
    }
    fn show_bubble(&mut self, _side: Side, _text: &str, _tag: BubbleTag) -> Result<()> {
        Ok(())
    }
    fn show_scene(&mut self, _category: SceneCategory, _art: &str) -> Result<()> {
        Ok(())
    }
    fn play_sound(&mut self, _sound: Sound) -> Result<()> {
        Ok(())
    }
    fn show_caption(&mut self, _text: &str, _tag: CaptionTag) -> Result<()> {
        Ok(())
    }
    fn show_result(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
    fn show_scores(&mut self, _player: u32, _opponent: u32) -> Result<()> {
        Ok(())
    }
    fn highlight_score(&mut self, _side: Side, _tag: ScoreTag) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    Hands(HandState),
    Bubble(Side, String, BubbleTag),
    Scene(SceneCategory, String),
    Sound(Sound),
    Caption(String, CaptionTag),
    Result(String),
    Scores(u32, u32),
    Highlight(Side, ScoreTag),
}

/// Keeps every command in order. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.cues()
            .into_iter()
            .filter_map(|cue| match cue {
                Cue::Sound(sound) => Some(sound),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }

    fn push(&self, cue: Cue) -> Result<()> {
        self.log
            .lock()
            .map_err(|_| anyhow!("recording sink lock poisoned"))?
            .push(cue);
        Ok(())
    }
}

impl PresentationSink for RecordingSink {
    fn show_hands(&mut self, state: HandState) -> Result<()> {
        self.push(Cue::Hands(state))
    }
    fn show_bubble(&mut self, side: Side, text: &str, tag: BubbleTag) -> Result<()> {
        self.push(Cue::Bubble(side, text.to_string(), tag))
    }
    fn show_scene(&mut self, category: SceneCategory, art: &str) -> Result<()> {
        self.push(Cue::Scene(category, art.to_string()))
    }
    fn play_sound(&mut self, sound: Sound) -> Result<()> {
        self.push(Cue::Sound(sound))
    }
    fn show_caption(&mut self, text: &str, tag: CaptionTag) -> Result<()> {
        self.push(Cue::Caption(text.to_string(), tag))
    }
    fn show_result(&mut self, text: &str) -> Result<()> {
        self.push(Cue::Result(text.to_string()))
    }
    fn show_scores(&mut self, player: u32, opponent: u32) -> Result<()> {
        self.push(Cue::Scores(player, opponent))
    }
    fn highlight_score(&mut self, side: Side, tag: ScoreTag) -> Result<()> {
        self.push(Cue::Highlight(side, tag))
    }
}
