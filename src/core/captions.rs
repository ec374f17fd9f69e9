/// Text and scene pools, plus the picker that draws from them
use rand::seq::IndexedRandom;
use rand::Rng;

/// Draw one entry uniformly; `None` only for an empty pool
pub fn pick_variant<'a, T, R: Rng + ?Sized>(pool: &'a [T], rng: &mut R) -> Option<&'a T> {
    pool.choose(rng)
}

pub const SHAKE_EMOJIS: &[&str] = &["👊🤝", "✊✊", "✊", "✊✋", "👏👏"];

pub const IDLE_CAPTION: &str = "Pick your move!";
pub const IDLE_RESULT: &str = "Make your choice";
pub const SHAKE_RESULT: &str = "Getting ready...";
pub const BUBBLE_IDLE: &str = "?";
pub const BUBBLE_SHAKING: &str = "...";

pub const WIN_CAPTIONS: &[&str] = &[
    "🎉 You won! You're on fire... can you do it again?",
    "🏆 Well played, champ! Can you keep the streak?",
    "💪 You're good! Can you string a few together?",
    "⚔️ Lucky you! Go buy a lottery ticket.",
    "🔥 Crushed it! Think you can win the next one too?",
];

pub const LOSE_CAPTIONS: &[&str] = &[
    "💥 You lost! Don't give up, try another move.",
    "😅 Tough loss... can you turn it around?",
    "👊 Down for now, but you can come back stronger!",
    "😞 The machine took this one... rematch?",
    "⚡ Not this time, but the next one could be yours!",
];

pub const DRAW_CAPTIONS: &[&str] = &[
    "⚖️ Draw!",
    "😎 Dead even... shall we break the tie?",
    "⚔️ Nobody won... get ready for the next one!",
    "🌀 Draw! The fight stays tight.",
    "🎲 Tied up! Time to try again.",
];

pub const SUDDEN_DEATH_CAPTIONS: &[&str] = &[
    "⚡ All or nothing: whoever wins now is the champion!",
    "⚡ The next throw decides everything... a champion is about to rise!",
    "⚡ Total suspense! The next point crowns the winner!",
    "⚡ Moment of truth: win this one and take the title!",
    "⚡ Final battle! One more win and the champion is revealed!",
    "⚡ The next winner writes their name in glory!",
];

pub const PLAYER_MATCH_POINT: &str = "⚡ Just one more win to close it out!";
pub const OPPONENT_MATCH_POINT: &str = "⚡ And it needs just one more win to close it out!";
pub const PLAYER_CHAMPION: &str = "🏆 You won the match!";
pub const OPPONENT_CHAMPION: &str = "💀 Game Over! The machine won.";

pub const RESULT_WIN: &str = "You won!";
pub const RESULT_LOSE: &str = "You lost!";
pub const RESULT_DRAW: &str = "Draw!";

pub const SCENE_INITIAL: &str = "scene-initial";
pub const WIN_SCENES: &[&str] = &["scene-win-1", "scene-win-2", "scene-win-3"];
pub const DRAW_SCENES: &[&str] = &["scene-draw-1", "scene-draw-2", "scene-draw-3"];
pub const LOSE_SCENES: &[&str] = &["scene-lose-1", "scene-lose-2", "scene-lose-3"];
