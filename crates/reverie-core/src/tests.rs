#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{EventKind, GameEvent};
    use crate::state::GameState;
    use crate::types::Position;

    /// Record every event of `kind` into a shared buffer.
    fn record(state: &mut GameState, kind: EventKind) -> Arc<Mutex<Vec<GameEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        state.subscribe(kind, move |event| {
            sink.lock().unwrap().push(event.clone());
        });
        log
    }

    // ---- Serde round-trips ----

    #[test]
    fn test_ai_mode_serde() {
        for v in [AiMode::Patrol, AiMode::Hunt, AiMode::Attack] {
            let json = serde_json::to_string(&v).unwrap();
            let back: AiMode = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_score_reason_serde() {
        for v in [
            ScoreReason::DreamFragment,
            ScoreReason::TimeBonus,
            ScoreReason::CaughtByEnemy,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: ScoreReason = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_grade_serde() {
        for v in [Grade::S, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F] {
            let json = serde_json::to_string(&v).unwrap();
            let back: Grade = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_game_event_serde_tagged() {
        let event = GameEvent::ScoreChanged {
            new_score: 150,
            points: 50,
            reason: ScoreReason::DreamFragment,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ScoreChanged\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), EventKind::ScoreChanged);
    }

    // ---- Score invariants ----

    #[test]
    fn test_score_never_negative() {
        let mut state = GameState::new();
        state.add_score(30, ScoreReason::DreamFragment);
        state.subtract_score(100, ScoreReason::CaughtByEnemy);
        assert_eq!(state.score(), 0);
        state.subtract_score(9999, ScoreReason::CaughtByEnemy);
        assert_eq!(state.score(), 0);
        state.add_score(10, ScoreReason::DreamFragment);
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_subtract_score_emits_negative_points() {
        let mut state = GameState::new();
        state.add_score(100, ScoreReason::DreamFragment);
        let log = record(&mut state, EventKind::ScoreChanged);
        state.subtract_score(50, ScoreReason::CaughtByEnemy);
        let events = log.lock().unwrap();
        match &events[0] {
            GameEvent::ScoreChanged {
                new_score, points, ..
            } => {
                assert_eq!(*new_score, 50);
                assert_eq!(*points, -50);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    // ---- Fragments ----

    #[test]
    fn test_fragments_clamped_at_total() {
        let mut state = GameState::new();
        for _ in 0..TOTAL_FRAGMENTS + 5 {
            state.collect_fragment();
        }
        assert_eq!(state.fragments_collected(), TOTAL_FRAGMENTS);
        assert!(state.can_exit_level());
    }

    #[test]
    fn test_all_fragments_event_fires_once() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::AllFragmentsCollected);
        for _ in 0..TOTAL_FRAGMENTS + 3 {
            state.collect_fragment();
        }
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    // ---- Timer & difficulty ramp ----

    #[test]
    fn test_difficulty_ramp_linear() {
        let mut state = GameState::new();
        // Burn down to 15 seconds remaining: ramp is halfway.
        state.update_time(START_TIME_SECS - 15.0);
        assert!((state.enemy_speed() - 1.25).abs() < 1e-9);
        assert!((state.enemy_aggressiveness() - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_no_ramp_above_threshold() {
        let mut state = GameState::new();
        state.update_time(10.0); // 80s left
        assert_eq!(state.enemy_speed(), 1.0);
        assert_eq!(state.enemy_aggressiveness(), 1.0);
    }

    #[test]
    fn test_time_up_fires_exactly_once() {
        let mut state = GameState::new();
        let time_up = record(&mut state, EventKind::TimeUp);
        let lost = record(&mut state, EventKind::GameLost);

        state.update_time(START_TIME_SECS + 5.0);
        assert_eq!(state.time_left(), 0.0);
        assert!(state.is_lost());
        assert!(!state.is_running());

        // Repeating the tick must not re-trigger anything.
        state.update_time(1.0);
        state.update_time(1.0);
        assert_eq!(time_up.lock().unwrap().len(), 1);
        assert_eq!(lost.lock().unwrap().len(), 1);
    }

    // ---- Terminal idempotency ----

    #[test]
    fn test_win_idempotent() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::GameWon);
        state.win_game();
        state.win_game();
        state.win_game();
        assert!(state.is_won());
        assert!(!state.is_running());
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_lose_after_win_is_noop() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::GameLost);
        state.win_game();
        state.lose_game(LoseReason::TimeUp);
        assert!(state.is_won());
        assert!(!state.is_lost());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_win_reports_time_bonus() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::GameWon);
        state.update_time(30.0); // 60s left
        state.win_game();
        let events = log.lock().unwrap();
        match &events[0] {
            GameEvent::GameWon { time_bonus } => assert_eq!(*time_bonus, 600),
            other => panic!("unexpected event {other:?}"),
        }
    }

    // ---- Capture & respawn ----

    #[test]
    fn test_capture_routes_through_loss() {
        let mut state = GameState::new();
        let died = record(&mut state, EventKind::PlayerDied);
        let lost = record(&mut state, EventKind::GameLost);

        state.player_caught_by_enemy();
        assert!(state.is_player_caught());
        assert!(state.is_lost());
        assert!(!state.is_running());
        assert_eq!(died.lock().unwrap().len(), 1);
        assert_eq!(lost.lock().unwrap().len(), 1);

        // Second capture is a no-op.
        state.player_caught_by_enemy();
        assert_eq!(died.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_respawn_countdown() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::PlayerRespawned);

        state.player_caught_by_enemy();
        state.begin_respawn(2.0);
        state.update_player_respawn(1.0);
        assert!(state.is_player_caught());
        assert!(log.lock().unwrap().is_empty());

        state.update_player_respawn(1.5);
        assert!(!state.is_player_caught());
        assert_eq!(state.player_respawn_time(), 0.0);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    // ---- Reset ----

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::GameReset);

        state.add_score(500, ScoreReason::DreamFragment);
        state.collect_fragment();
        state.update_time(70.0);
        state.player_caught_by_enemy();

        state.reset();
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_left(), START_TIME_SECS);
        assert_eq!(state.fragments_collected(), 0);
        assert!(state.is_running());
        assert!(!state.is_won());
        assert!(!state.is_lost());
        assert!(!state.is_player_caught());
        assert_eq!(state.enemy_speed(), 1.0);
        assert_eq!(state.enemy_aggressiveness(), 1.0);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    // ---- Event bus semantics ----

    #[test]
    fn test_listeners_invoked_in_registration_order() {
        let mut state = GameState::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in 0..3 {
            let sink = Arc::clone(&order);
            state.subscribe(EventKind::TimeUpdated, move |_| {
                sink.lock().unwrap().push(tag);
            });
        }
        state.update_time(1.0);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_removes_first_match() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::TimeUpdated);
        let extra = {
            let sink = Arc::clone(&log);
            state.subscribe(EventKind::TimeUpdated, move |event| {
                sink.lock().unwrap().push(event.clone());
            })
        };

        state.update_time(1.0);
        assert_eq!(log.lock().unwrap().len(), 2);

        state.unsubscribe(EventKind::TimeUpdated, extra);
        state.update_time(1.0);
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_clear_listeners_silences_the_bus() {
        let mut state = GameState::new();
        let log = record(&mut state, EventKind::TimeUpdated);
        assert_eq!(state.listener_count(EventKind::TimeUpdated), 1);

        state.clear_listeners();
        assert_eq!(state.listener_count(EventKind::TimeUpdated), 0);
        state.update_time(1.0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_trigger_with_no_listeners_is_noop() {
        let mut state = GameState::new();
        // Must not panic or change state.
        state.trigger_event(&GameEvent::AllFragmentsCollected);
        assert_eq!(state.score(), 0);
    }

    // ---- Queries ----

    #[test]
    fn test_progress_percentages() {
        let mut state = GameState::new();
        state.collect_fragment();
        state.collect_fragment();
        state.update_time(45.0);
        let progress = state.progress();
        assert!((progress.fragments_pct - 25.0).abs() < 1e-9);
        assert!((progress.time_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 0.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-12);
        let up = Position::new(0.0, 2.0, 0.0);
        assert_eq!(a.horizontal_distance_to(&up), 0.0);
        assert_eq!(a.distance_to(&up), 2.0);
    }
}
