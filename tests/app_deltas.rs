use std::time::{Duration, Instant};

use courtside::config::AppConfig;
use courtside::score::{MatchRules, Team, TeamPair};
use courtside::state::{AppState, Delta, apply_delta};

fn state_with_names() -> AppState {
    let cfg = AppConfig {
        team_a_name: "ALCARAZ".to_string(),
        team_b_name: "SINNER".to_string(),
        ..AppConfig::default()
    };
    AppState::from_config(&cfg)
}

#[test]
fn point_delta_scores_and_arms_point_flash() {
    let mut state = AppState::new();
    let now = Instant::now();
    apply_delta(&mut state, Delta::Point(Team::A), now);

    assert_eq!(state.engine.team_a_score(), "15");
    assert_eq!(state.point_flash_team(now), Some(Team::A));
    assert_eq!(state.game_flash_team(now), None);
    // Plain rallies are not logged.
    assert!(state.logs.is_empty());
}

#[test]
fn flashes_expire_after_configured_durations() {
    let mut state = AppState::new();
    let now = Instant::now();
    for _ in 0..4 {
        apply_delta(&mut state, Delta::Point(Team::B), now);
    }
    assert_eq!(state.game_flash_team(now), Some(Team::B));

    let later = now + Duration::from_millis(500);
    assert_eq!(state.point_flash_team(later), None);
    assert_eq!(state.game_flash_team(later), Some(Team::B));

    let much_later = now + Duration::from_millis(1500);
    state.clear_expired_flashes(much_later);
    assert!(state.point_flash.is_none());
    assert!(state.game_flash.is_none());
}

#[test]
fn game_and_set_events_are_logged_with_team_names() {
    let mut state = state_with_names();
    let now = Instant::now();
    for _ in 0..24 {
        apply_delta(&mut state, Delta::Point(Team::A), now);
    }
    assert_eq!(state.engine.sets_won(), TeamPair::new(1, 0));
    let joined = state.logs.iter().cloned().collect::<Vec<_>>().join("\n");
    assert!(joined.contains("[INFO] Game ALCARAZ"));
    assert!(joined.contains("[INFO] Set ALCARAZ (1-0)"));
    assert!(!joined.contains("Match won"));
}

#[test]
fn undo_delta_with_empty_history_only_logs() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Undo, Instant::now());
    assert!(!state.engine.can_undo());
    assert_eq!(state.logs.len(), 1);
    assert!(state.logs[0].ends_with("[INFO] Nothing to undo"));
}

#[test]
fn reset_and_undo_clear_flashes() {
    let mut state = AppState::new();
    let now = Instant::now();
    apply_delta(&mut state, Delta::Point(Team::A), now);
    apply_delta(&mut state, Delta::Reset, now);
    assert!(state.point_flash.is_none());
    assert_eq!(state.engine.team_a_score(), "0");

    apply_delta(&mut state, Delta::Undo, now);
    assert_eq!(state.engine.team_a_score(), "15");
    assert!(state.point_flash.is_none());
}

#[test]
fn toggle_deltas_update_rules_and_log() {
    let mut state = AppState::new();
    let now = Instant::now();
    apply_delta(&mut state, Delta::ToggleGoldenPoint, now);
    apply_delta(&mut state, Delta::ToggleBestOfThree, now);
    assert_eq!(
        state.engine.rules(),
        MatchRules {
            golden_point: true,
            best_of_three: false,
        }
    );
    assert!(state.logs[0].ends_with("Golden point on"));
    assert!(state.logs[1].ends_with("Best of 1"));
}

#[test]
fn points_after_match_end_are_ignored() {
    let cfg = AppConfig {
        rules: MatchRules {
            golden_point: true,
            best_of_three: false,
        },
        ..AppConfig::default()
    };
    let mut state = AppState::from_config(&cfg);
    let now = Instant::now();
    for _ in 0..24 {
        apply_delta(&mut state, Delta::Point(Team::B), now);
    }
    assert_eq!(state.engine.winner(), Some(Team::B));
    let logs_before = state.logs.len();
    let depth = state.engine.history_len();

    apply_delta(&mut state, Delta::Point(Team::A), now);
    assert_eq!(state.engine.history_len(), depth);
    assert_eq!(state.logs.len(), logs_before);
}

#[test]
fn log_delta_is_bounded() {
    let mut state = AppState::new();
    for idx in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {idx}")), Instant::now());
    }
    assert_eq!(state.logs.len(), 200);
    assert!(state.logs.back().is_some_and(|l| l.ends_with("line 249")));
}

#[test]
fn settings_panel_toggles() {
    let mut state = AppState::new();
    assert!(!state.settings_visible);
    state.toggle_settings();
    assert!(state.settings_visible);
}
