use jokenpo::core::audio::{AudioTransport, MemoryTransport, Track, TransportCall};
use jokenpo::core::engine::{Engine, REVEAL_DELAY};
use jokenpo::core::opponent::ScriptedOpponent;
use jokenpo::core::presentation::{Cue, HandState, RecordingSink, Sound};
use jokenpo::core::session::Phase;
use jokenpo::{Move, Outcome, RoundController, RoundResult, SpecialEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

// Against an opponent that always throws rock
const WIN: Move = Move::Paper;
const LOSE: Move = Move::Scissors;
const DRAW: Move = Move::Rock;

fn table(cpu: Move) -> (RoundController, RecordingSink, MemoryTransport) {
    let sink = RecordingSink::new();
    let deck = MemoryTransport::new();
    let controller = RoundController::new(
        Box::new(ScriptedOpponent::always(cpu)),
        Box::new(sink.clone()),
        Box::new(deck.clone()),
        StdRng::seed_from_u64(2025),
    );
    (controller, sink, deck)
}

fn play(controller: &mut RoundController, human: Move) -> RoundResult {
    let pending = controller.start_round(human).expect("table should be idle");
    controller.complete_round(pending).expect("round should not be stale")
}

/// Alternate wins and losses so neither side reaches 10 on the way
fn drive_to(controller: &mut RoundController, player: u32, opponent: u32) {
    while controller.session().scores() != (player, opponent) {
        let (p, o) = controller.session().scores();
        let next = if p < player && (p <= o || o >= opponent) { WIN } else { LOSE };
        play(controller, next);
    }
}

#[test]
fn scenario_first_win_has_no_special_event() {
    let (mut controller, _, _) = table(Move::Scissors);
    let result = play(&mut controller, Move::Rock);

    assert_eq!(result.outcome, Outcome::PlayerWins);
    assert_eq!(result.score_after, (1, 0));
    assert!(result.special_events.is_empty());
    assert!(!controller.session().busy());
}

#[test]
fn scenario_draw_at_nine_all_keeps_sudden_death() {
    let (mut controller, _, deck) = table(Move::Rock);
    drive_to(&mut controller, 9, 9);
    assert!(controller.session().suspense_active());

    let result = play(&mut controller, DRAW);
    assert_eq!(result.outcome, Outcome::Draw);
    assert_eq!(result.score_after, (9, 9));
    assert_eq!(result.special_events, vec![SpecialEvent::SuddenDeathTie]);
    assert!(controller.session().suspense_active());
    assert!(deck.is_playing(Track::SuddenDeathLoop));
}

#[test]
fn scenario_sudden_death_started_once() {
    let (mut controller, _, deck) = table(Move::Rock);
    drive_to(&mut controller, 9, 9);
    play(&mut controller, DRAW);
    play(&mut controller, DRAW);

    let starts = deck
        .calls()
        .into_iter()
        .filter(|call| *call == TransportCall::Play(Track::SuddenDeathLoop))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn scenario_champion_from_nine_eight() {
    let (mut controller, sink, deck) = table(Move::Rock);
    drive_to(&mut controller, 9, 8);
    assert!(deck.is_playing(Track::PlayerMatchPoint));

    let result = play(&mut controller, WIN);
    assert_eq!(result.score_after, (10, 8));
    assert_eq!(result.special_events, vec![SpecialEvent::PlayerChampion]);
    assert!(!deck.is_playing(Track::PlayerMatchPoint));
    assert!(!controller.session().suspense_active());
    assert_eq!(sink.sounds().last(), Some(&Sound::EpicWin));
}

#[test]
fn scenario_champion_out_of_sudden_death_keeps_music_off() {
    let (mut controller, _, deck) = table(Move::Rock);
    controller.toggle_music();
    drive_to(&mut controller, 9, 9);
    assert!(!deck.is_playing(Track::Background));
    deck.clear_calls();

    let result = play(&mut controller, LOSE);
    assert_eq!(result.special_events, vec![SpecialEvent::OpponentChampion]);
    assert!(!deck.is_playing(Track::SuddenDeathLoop));
    assert!(!deck.calls().contains(&TransportCall::Play(Track::Background)));
}

#[test]
fn scenario_match_point_survives_a_loss() {
    let (mut controller, _, deck) = table(Move::Rock);
    drive_to(&mut controller, 9, 5);
    deck.clear_calls();

    let result = play(&mut controller, LOSE);
    assert_eq!(result.outcome, Outcome::OpponentWins);
    assert_eq!(result.score_after, (9, 6));
    assert_eq!(result.special_events, vec![SpecialEvent::PlayerMatchPoint]);
    assert!(deck.calls().contains(&TransportCall::Play(Track::PlayerMatchPoint)));
    assert!(!controller.session().suspense_active());
}

#[test]
fn scenario_reset_clears_everything() {
    let (mut controller, sink, deck) = table(Move::Rock);
    drive_to(&mut controller, 9, 9);
    deck.clear_calls();
    sink.clear();

    controller.reset();
    assert_eq!(controller.session().scores(), (0, 0));
    assert!(!controller.session().busy());
    assert!(!controller.session().suspense_active());
    assert!(!deck.is_playing(Track::SuddenDeathLoop));
    assert!(!deck.calls().contains(&TransportCall::Play(Track::Background)));
    assert!(sink.cues().contains(&Cue::Hands(HandState::Closed)));
    assert!(sink.cues().contains(&Cue::Scores(0, 0)));
}

#[test]
fn scenario_request_while_busy_is_dropped() {
    let (mut controller, sink, _) = table(Move::Rock);
    let pending = controller.start_round(WIN).unwrap();
    let in_flight = sink.cues().len();

    assert!(controller.start_round(LOSE).is_none());
    assert_eq!(sink.cues().len(), in_flight);
    assert_eq!(controller.session().scores(), (0, 0));

    let result = controller.complete_round(pending).unwrap();
    assert_eq!(result.human_move, WIN);
    assert_eq!(result.score_after, (1, 0));
}

#[test]
fn invalid_move_never_reaches_the_table() {
    assert!("lizard".parse::<Move>().is_err());
    assert!("spock".parse::<Move>().is_err());
}

#[tokio::test(start_paused = true)]
async fn busy_spans_exactly_the_reveal_delay() {
    let (controller, _, _) = table(Move::Rock);
    let (engine, mut results) = Engine::new(controller, REVEAL_DELAY);

    assert!(engine.play_round(WIN));
    tokio::time::sleep(REVEAL_DELAY - Duration::from_millis(1)).await;
    assert!(engine.busy());
    assert_eq!(engine.phase(), Phase::Shaking);
    assert!(!engine.play_round(LOSE));

    let result = results.recv().await.unwrap();
    assert_eq!(result.score_after, (1, 0));
    assert!(!engine.busy());
    assert!(engine.play_round(LOSE));
}

#[tokio::test(start_paused = true)]
async fn engine_reset_returns_to_idle() {
    let (controller, _, _) = table(Move::Rock);
    let (engine, mut results) = Engine::new(controller, Duration::from_millis(10));

    for _ in 0..3 {
        assert!(engine.play_round(WIN));
        results.recv().await.unwrap();
    }
    assert_eq!(engine.player_score(), 3);

    engine.reset();
    assert_eq!(engine.player_score(), 0);
    assert_eq!(engine.opponent_score(), 0);
    assert!(!engine.busy());
    assert!(!engine.suspense_active());
}
