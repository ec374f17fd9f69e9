/// Score commentary appended to every round headline
use serde::Serialize;

use crate::core::moves::Outcome;
use crate::core::session::THRESHOLD_WIN;

/// Lead a side needs before the commentary calls it dominant
const DOMINANT_LEAD: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Champion,
    Defeated,
    Dominant,
    Crushed,
    Tied,
    Ahead,
    Behind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Commentary {
    pub mood: Mood,
    pub text: &'static str,
}

/// Exactly one branch applies for any score pair.
/// The last outcome is accepted for callers that track it, but only the scores decide.
pub fn comment(player_score: u32, opponent_score: u32, _last: Outcome) -> Commentary {
    let diff = player_score as i64 - opponent_score as i64;

    let mood = if player_score >= THRESHOLD_WIN && diff > 0 {
        Mood::Champion
    } else if opponent_score >= THRESHOLD_WIN && diff < 0 {
        Mood::Defeated
    } else if diff >= DOMINANT_LEAD {
        Mood::Dominant
    } else if diff <= -DOMINANT_LEAD {
        Mood::Crushed
    } else if diff == 0 {
        Mood::Tied
    } else if diff > 0 {
        Mood::Ahead
    } else {
        Mood::Behind
    };

    Commentary { mood, text: text_for(mood) }
}

fn text_for(mood: Mood) -> &'static str {
    match mood {
        Mood::Champion => "🏆 First to 10 wins! What a run!",
        Mood::Defeated => "💻 The machine got to 10 first... rematch?",
        Mood::Dominant => "🔥 Score: you're dominating! What a streak!",
        Mood::Crushed => "😞 Score: it's running you over... turn it around!",
        Mood::Tied => "⚖️ Score: all square for now...",
        Mood::Ahead => "😎 Score: you're in front! Keep it up!",
        Mood::Behind => "😞 Score: it's ahead... time to react!",
    }
}
