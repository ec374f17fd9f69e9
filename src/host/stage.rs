/// Terminal view model; the presentation sink the interactive host plugs into the controller
use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

use crate::core::presentation::{
    BubbleTag, CaptionTag, HandState, PresentationSink, SceneCategory, ScoreTag, Sound,
};
use crate::core::session::Side;

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub text: String,
    pub tag: BubbleTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub hands: HandState,
    pub player_bubble: Bubble,
    pub opponent_bubble: Bubble,
    pub scene: SceneCategory,
    pub scene_art: String,
    pub caption: String,
    pub caption_tag: CaptionTag,
    pub result: String,
    pub scores: (u32, u32),
    pub player_tag: ScoreTag,
    pub opponent_tag: ScoreTag,
    /// Side that scored last; cleared once the next round starts shaking
    pub pulse: Option<Side>,
    pub last_sound: Option<Sound>,
}

impl Default for Stage {
    fn default() -> Self {
        let idle = Bubble { text: "?".into(), tag: BubbleTag::Neutral };
        Self {
            hands: HandState::Closed,
            player_bubble: idle.clone(),
            opponent_bubble: idle,
            scene: SceneCategory::Initial,
            scene_art: String::new(),
            caption: String::new(),
            caption_tag: CaptionTag::Idle,
            result: String::new(),
            scores: (0, 0),
            player_tag: ScoreTag::Tie,
            opponent_tag: ScoreTag::Tie,
            pulse: None,
            last_sound: None,
        }
    }
}

impl Stage {
    pub fn bubble(&self, side: Side) -> &Bubble {
        match side {
            Side::Player => &self.player_bubble,
            Side::Opponent => &self.opponent_bubble,
        }
    }
}

/// Shared handle: the controller writes, the render loop snapshots
#[derive(Debug, Clone, Default)]
pub struct StageSink {
    stage: Arc<Mutex<Stage>>,
}

impl StageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Result<Stage> {
        Ok(self.stage.lock().map_err(|_| anyhow!("stage lock poisoned"))?.clone())
    }

    fn update(&self, f: impl FnOnce(&mut Stage)) -> Result<()> {
        let mut stage = self.stage.lock().map_err(|_| anyhow!("stage lock poisoned"))?;
        f(&mut stage);
        Ok(())
    }
}

impl PresentationSink for StageSink {
    fn show_hands(&mut self, state: HandState) -> Result<()> {
        self.update(|stage| {
            if state == HandState::Shaking {
                stage.pulse = None;
            }
            stage.hands = state;
        })
    }

    fn show_bubble(&mut self, side: Side, text: &str, tag: BubbleTag) -> Result<()> {
        let bubble = Bubble { text: text.to_string(), tag };
        self.update(|stage| match side {
            Side::Player => stage.player_bubble = bubble,
            Side::Opponent => stage.opponent_bubble = bubble,
        })
    }

    fn show_scene(&mut self, category: SceneCategory, art: &str) -> Result<()> {
        self.update(|stage| {
            stage.scene = category;
            stage.scene_art = art.to_string();
        })
    }

    fn play_sound(&mut self, sound: Sound) -> Result<()> {
        self.update(|stage| stage.last_sound = Some(sound))
    }

    fn show_caption(&mut self, text: &str, tag: CaptionTag) -> Result<()> {
        self.update(|stage| {
            stage.caption = text.to_string();
            stage.caption_tag = tag;
        })
    }

    fn show_result(&mut self, text: &str) -> Result<()> {
        self.update(|stage| stage.result = text.to_string())
    }

    fn show_scores(&mut self, player: u32, opponent: u32) -> Result<()> {
        self.update(|stage| stage.scores = (player, opponent))
    }

    fn highlight_score(&mut self, side: Side, tag: ScoreTag) -> Result<()> {
        self.update(|stage| match (tag, side) {
            (ScoreTag::Pulse, _) => stage.pulse = Some(side),
            (_, Side::Player) => stage.player_tag = tag,
            (_, Side::Opponent) => stage.opponent_tag = tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_land_on_stage() {
        let observer = StageSink::new();
        let mut sink = observer.clone();
        sink.show_hands(HandState::Open).unwrap();
        sink.show_bubble(Side::Opponent, "✋", BubbleTag::Win).unwrap();
        sink.highlight_score(Side::Opponent, ScoreTag::Pulse).unwrap();
        sink.highlight_score(Side::Opponent, ScoreTag::Winner).unwrap();
        sink.show_scores(0, 1).unwrap();

        let stage = observer.snapshot().unwrap();
        assert_eq!(stage.hands, HandState::Open);
        assert_eq!(stage.bubble(Side::Opponent).text, "✋");
        assert_eq!(stage.pulse, Some(Side::Opponent));
        assert_eq!(stage.opponent_tag, ScoreTag::Winner);
        assert_eq!(stage.player_tag, ScoreTag::Tie);
        assert_eq!(stage.scores, (0, 1));
    }
}
