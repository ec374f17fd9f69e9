/// Ratatui drawing for the match table
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::audio::TrackState;
use crate::core::controller::ChantMode;
use crate::core::presentation::{BubbleTag, CaptionTag, HandState, SceneCategory, ScoreTag};
use crate::core::session::{Phase, Side};
use crate::host::stage::Stage;

/// Everything one frame needs, captured without holding any lock while drawing
pub struct Snapshot {
    pub stage: Stage,
    pub phase: Phase,
    pub suspense: bool,
    pub music_on: bool,
    pub chant: ChantMode,
    pub background: TrackState,
}

pub fn render(frame: &mut Frame, view: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scoreboard
            Constraint::Min(7),    // Table
            Constraint::Length(3), // Caption
            Constraint::Length(5), // Result
            Constraint::Length(3), // Status
        ])
        .split(frame.area());

    render_scoreboard(frame, chunks[0], view);
    render_table(frame, chunks[1], view);

    let caption = Paragraph::new(view.stage.caption.as_str())
        .alignment(Alignment::Center)
        .style(caption_style(view.stage.caption_tag))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(caption, chunks[2]);

    let result = Paragraph::new(view.stage.result.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" RESULT "));
    frame.render_widget(result, chunks[3]);

    render_status(frame, chunks[4], view);
}

fn render_scoreboard(frame: &mut Frame, area: Rect, view: &Snapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (player, opponent) = view.stage.scores;
    for (side, label, score, tag, slot) in [
        (Side::Player, " YOU ", player, view.stage.player_tag, halves[0]),
        (Side::Opponent, " CPU ", opponent, view.stage.opponent_tag, halves[1]),
    ] {
        let mut style = score_style(tag);
        if view.stage.pulse == Some(side) {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        let widget = Paragraph::new(score.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(label));
        frame.render_widget(widget, slot);
    }
}

fn render_table(frame: &mut Frame, area: Rect, view: &Snapshot) {
    let stage = &view.stage;
    let hand = match stage.hands {
        HandState::Closed => "✊",
        HandState::Shaking => "〰✊〰",
        HandState::Open => "🖐",
    };
    let bubble = |side: Side| {
        let b = stage.bubble(side);
        Span::styled(format!(" [ {} ] ", b.text), bubble_style(b.tag))
    };

    let mut lines = vec![
        Line::from(vec![bubble(Side::Player), Span::raw("        "), bubble(Side::Opponent)]),
        Line::from(format!("{}            {}", hand, hand)),
        Line::from(""),
        Line::from(Span::styled(
            format!("scene: {}", stage.scene_art),
            Style::default().fg(scene_color(stage.scene)),
        )),
    ];
    if view.suspense {
        lines.push(Line::from(Span::styled(
            "⚡ SUDDEN DEATH ⚡",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }

    let title = match view.phase {
        Phase::Idle => " JOKENPO ",
        Phase::Shaking => " JOKENPO · shaking ",
        Phase::Revealing | Phase::Resolving => " JOKENPO · reveal ",
    };
    let table = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &Snapshot) {
    let music = match (view.music_on, view.background.playing) {
        (true, true) => "♪ on",
        (true, false) => "♪ paused",
        (false, _) => "♪ off",
    };
    let chant = match view.chant {
        ChantMode::Voice => "🔊 voice",
        ChantMode::Hands => "✊ hands",
    };
    let sound = view
        .stage
        .last_sound
        .map(|s| format!("{:?}", s))
        .unwrap_or_else(|| "-".into());

    let text = format!(
        "r/p/s play · 0 reset · m music ({}) · v chant ({}) · q quit    last cue: {}",
        music, chant, sound
    );
    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn score_style(tag: ScoreTag) -> Style {
    match tag {
        ScoreTag::Winner => Style::default().fg(Color::Green),
        ScoreTag::Loser => Style::default().fg(Color::Red),
        ScoreTag::Tie | ScoreTag::Pulse => Style::default().fg(Color::Yellow),
    }
}

fn bubble_style(tag: BubbleTag) -> Style {
    match tag {
        BubbleTag::Neutral => Style::default(),
        BubbleTag::Shaking => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        BubbleTag::Win => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        BubbleTag::Lose => Style::default().fg(Color::Red),
    }
}

fn caption_style(tag: CaptionTag) -> Style {
    match tag {
        CaptionTag::Idle => Style::default().fg(Color::Cyan),
        CaptionTag::Shake => Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        CaptionTag::Win => Style::default().fg(Color::Green),
        CaptionTag::Lose => Style::default().fg(Color::Red),
        CaptionTag::Draw => Style::default().fg(Color::Yellow),
    }
}

fn scene_color(scene: SceneCategory) -> Color {
    match scene {
        SceneCategory::Initial => Color::Cyan,
        SceneCategory::Win => Color::Green,
        SceneCategory::Lose => Color::Red,
        SceneCategory::Draw => Color::Yellow,
    }
}
