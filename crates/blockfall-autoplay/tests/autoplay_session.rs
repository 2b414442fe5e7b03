use std::time::Duration;

use blockfall_autoplay::move_planner::HeuristicPlanner;
use blockfall_engine::{
    BOARD_HEIGHT, GameConfig, GameEvent, GameSession, Intent, SessionState, TimerKind,
};

fn autoplay_session(seed: u64) -> GameSession {
    let config = GameConfig::default().with_seed(seed);
    let mut session = GameSession::new(config, Some(Box::new(HeuristicPlanner::default())));
    session.set_autoplay(true);
    session
}

fn run_until_pieces(session: &mut GameSession, pieces: usize) {
    while session.stats().completed_pieces() < pieces
        && session.session_state() == SessionState::Playing
    {
        assert!(session.advance_to_next_deadline());
    }
}

#[test]
fn test_autoplay_places_pieces_and_clears_lines() {
    let mut session = autoplay_session(2024);
    run_until_pieces(&mut session, 60);

    let stats = session.stats();
    assert!(session.session_state().is_playing());
    assert!(stats.completed_pieces() >= 60);
    // 60 pieces cover 240 cells; a 200-cell board cannot hold them without clears.
    assert!(stats.total_cleared_lines() > 0);
    assert!(stats.score() > 0);
    // A piece whose rows are still flashing is counted once the clear ends.
    let pending = usize::from(!session.clearing_rows().is_empty());
    assert_eq!(
        stats.line_cleared_counter().iter().sum::<usize>() + pending,
        stats.completed_pieces()
    );
}

#[test]
fn test_same_seed_same_game() {
    let mut a = autoplay_session(7);
    let mut b = autoplay_session(7);
    run_until_pieces(&mut a, 30);
    run_until_pieces(&mut b, 30);
    assert_eq!(a.board(), b.board());
    assert_eq!(a.stats(), b.stats());
    assert_eq!(a.now(), b.now());
}

#[test]
fn test_board_invariants_hold_every_tick() {
    let mut session = autoplay_session(99);
    for _ in 0..2000 {
        assert!(session.advance_to_next_deadline());
        assert_eq!(session.board().rows().len(), BOARD_HEIGHT);
        if session.clearing_rows().is_empty() {
            assert!(session.board().full_rows().is_empty());
        } else {
            assert!(session.falling_piece().is_none());
        }
        if session.session_state().is_game_over() {
            break;
        }
    }
}

#[test]
fn test_manual_input_is_ignored_under_autoplay() {
    let mut session = autoplay_session(5);
    let before = *session.falling_piece().unwrap();
    session.press(Intent::MoveLeft);
    session.press(Intent::Rotate);
    session.press(Intent::HardDrop);
    assert_eq!(session.falling_piece(), Some(&before));
    assert_eq!(session.stats().completed_pieces(), 0);

    session.press(Intent::ToggleAutoplay);
    assert!(!session.is_autoplay());
    assert!(!session.active_timers().contains(&TimerKind::AutoplayDecision));
}

#[test]
fn test_clear_events_are_reported() {
    let mut session = autoplay_session(2024);
    let mut clearing = 0;
    let mut cleared = 0;
    while session.stats().total_cleared_lines() == 0 {
        assert!(session.advance_to_next_deadline());
        for event in session.take_events() {
            match event {
                GameEvent::LinesClearing { count } => clearing += count,
                GameEvent::LinesCleared { count, points } => {
                    assert!(points > 0);
                    cleared += count;
                }
                _ => {}
            }
        }
        assert!(session.session_state().is_playing());
    }
    assert_eq!(clearing, cleared);
    assert_eq!(cleared, session.stats().total_cleared_lines());
    assert!(session.now() > Duration::ZERO);
}
