//! Pure transition functions for a single point.
//!
//! Regular games and tiebreak games are scored by separate functions; both close the set
//! through [`close_set`] and the match winner is re-evaluated only when a set changes hands.

use crate::score::{
    ADVANTAGE, FORTY, GAMES_TO_WIN_SET, LOVE, MatchRules, MatchState, ScoreEvent,
    TIEBREAK_POINTS_TO_WIN, Team, TeamPair, WINNING_MARGIN,
};

/// Applies one point won by `team`. A decided match is left untouched.
pub fn score_point(
    state: &mut MatchState,
    rules: MatchRules,
    team: Team,
    events: &mut Vec<ScoreEvent>,
) {
    if state.winner.is_some() {
        return;
    }
    events.push(ScoreEvent::PointWon(team));

    let set_closed = if state.tie_break {
        tiebreak_point(state, team, events)
    } else {
        regular_point(state, rules, team, events)
    };

    if set_closed && let Some(winner) = evaluate_match_winner(state, rules) {
        events.push(ScoreEvent::MatchWon(winner));
    }
}

/// Returns true when the point closed the set.
fn regular_point(
    state: &mut MatchState,
    rules: MatchRules,
    team: Team,
    events: &mut Vec<ScoreEvent>,
) -> bool {
    let other = team.opponent();
    let mine = state.points[team];
    let theirs = state.points[other];

    if mine < FORTY {
        state.points[team] += 1;
        if state.is_deuce() {
            events.push(ScoreEvent::Deuce);
        }
        return false;
    }

    if mine == ADVANTAGE || theirs < FORTY {
        return game_won(state, team, events);
    }

    if theirs == FORTY {
        if rules.golden_point {
            return game_won(state, team, events);
        }
        state.points[team] = ADVANTAGE;
        events.push(ScoreEvent::Advantage(team));
        return false;
    }

    // 40 against advantage: back to deuce.
    state.points[other] = FORTY;
    events.push(ScoreEvent::Deuce);
    false
}

fn game_won(state: &mut MatchState, team: Team, events: &mut Vec<ScoreEvent>) -> bool {
    let other = team.opponent();
    state.games[team] += 1;
    state.points = TeamPair::new(LOVE, LOVE);
    events.push(ScoreEvent::GameWon(team));

    let mine = state.games[team];
    let theirs = state.games[other];
    if mine >= GAMES_TO_WIN_SET && mine.saturating_sub(theirs) >= WINNING_MARGIN {
        close_set(state, team, events);
        return true;
    }
    if mine == GAMES_TO_WIN_SET && theirs == GAMES_TO_WIN_SET {
        state.tie_break = true;
        events.push(ScoreEvent::TiebreakStarted);
    }
    false
}

/// Tiebreak points are raw counts with no cap; first to 7 by two takes the set.
fn tiebreak_point(state: &mut MatchState, team: Team, events: &mut Vec<ScoreEvent>) -> bool {
    let other = team.opponent();
    state.points[team] += 1;

    let mine = state.points[team];
    let theirs = state.points[other];
    if mine >= TIEBREAK_POINTS_TO_WIN && mine.saturating_sub(theirs) >= WINNING_MARGIN {
        close_set(state, team, events);
        return true;
    }
    false
}

fn close_set(state: &mut MatchState, team: Team, events: &mut Vec<ScoreEvent>) {
    state.sets[team] += 1;
    state.games = TeamPair::new(0, 0);
    state.points = TeamPair::new(LOVE, LOVE);
    state.tie_break = false;
    events.push(ScoreEvent::SetWon {
        team,
        sets: state.sets,
    });
}

/// Declares a winner when one team has reached the set threshold and leads on sets.
/// Never replaces an existing winner. Returns the newly declared team, if any.
pub fn evaluate_match_winner(state: &mut MatchState, rules: MatchRules) -> Option<Team> {
    if state.winner.is_some() {
        return None;
    }
    let needed = rules.sets_to_win();
    let winner = Team::BOTH.into_iter().find(|team| {
        let mine = state.sets[*team];
        mine >= needed && mine > state.sets[team.opponent()]
    })?;
    state.winner = Some(winner);
    Some(winner)
}
