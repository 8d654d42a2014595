use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display labels for a regular game, indexed by the raw point counter.
pub const POINT_LABELS: [&str; 5] = ["0", "15", "30", "40", "AD"];

pub const LOVE: u32 = 0;
pub const FORTY: u32 = 3;
pub const ADVANTAGE: u32 = 4;

pub const GAMES_TO_WIN_SET: u32 = 6;
pub const TIEBREAK_POINTS_TO_WIN: u32 = 7;
pub const WINNING_MARGIN: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown team {token:?} (expected A or B)")]
pub struct ParseTeamError {
    pub token: String,
}

impl FromStr for Team {
    type Err = ParseTeamError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "A" | "a" => Ok(Team::A),
            "B" | "b" => Ok(Team::B),
            other => Err(ParseTeamError {
                token: other.to_string(),
            }),
        }
    }
}

/// One counter per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamPair<T> {
    pub a: T,
    pub b: T,
}

impl<T> TeamPair<T> {
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }
}

impl<T> Index<Team> for TeamPair<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

impl<T> IndexMut<Team> for TeamPair<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}

/// Everything that undo restores. Configuration lives in [`MatchRules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub sets: TeamPair<u32>,
    pub games: TeamPair<u32>,
    // Regular game: 0..=4 (4 = advantage). Tiebreak: raw point count.
    pub points: TeamPair<u32>,
    pub tie_break: bool,
    pub winner: Option<Team>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_deuce(&self) -> bool {
        !self.tie_break && self.points.a == FORTY && self.points.b == FORTY
    }

    pub fn advantage(&self) -> Option<Team> {
        if self.tie_break {
            return None;
        }
        Team::BOTH
            .into_iter()
            .find(|team| self.points[*team] == ADVANTAGE)
    }

    /// Point display for one team: tennis labels in a regular game, the raw count in a
    /// tiebreak. Counters outside the label table render as an empty string.
    pub fn score_label(&self, team: Team) -> String {
        let points = self.points[team];
        if self.tie_break {
            return points.to_string();
        }
        POINT_LABELS
            .get(points as usize)
            .map(|label| (*label).to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub golden_point: bool,
    pub best_of_three: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            golden_point: false,
            best_of_three: true,
        }
    }
}

impl MatchRules {
    pub fn sets_to_win(&self) -> u32 {
        if self.best_of_three { 2 } else { 1 }
    }
}

/// Notifications produced by the engine for whoever renders the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    PointWon(Team),
    Deuce,
    Advantage(Team),
    GameWon(Team),
    TiebreakStarted,
    SetWon { team: Team, sets: TeamPair<u32> },
    MatchWon(Team),
    Undone,
    Reset,
    GoldenPointChanged(bool),
    BestOfThreeChanged(bool),
}

impl ScoreEvent {
    pub fn describe(&self) -> String {
        match self {
            ScoreEvent::PointWon(team) => format!("Point {team}"),
            ScoreEvent::Deuce => "Deuce".to_string(),
            ScoreEvent::Advantage(team) => format!("Advantage {team}"),
            ScoreEvent::GameWon(team) => format!("Game {team}"),
            ScoreEvent::TiebreakStarted => "Tiebreak at 6-6".to_string(),
            ScoreEvent::SetWon { team, sets } => {
                format!("Set {team} (sets {}-{})", sets.a, sets.b)
            }
            ScoreEvent::MatchWon(team) => format!("Match {team}"),
            ScoreEvent::Undone => "Undo".to_string(),
            ScoreEvent::Reset => "Match reset".to_string(),
            ScoreEvent::GoldenPointChanged(on) => format!("Golden point {}", on_off(*on)),
            ScoreEvent::BestOfThreeChanged(on) => {
                format!("Best of {}", if *on { 3 } else { 1 })
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_parses_case_insensitive_tokens() {
        assert_eq!("a".parse::<Team>().unwrap(), Team::A);
        assert_eq!(" B ".parse::<Team>().unwrap(), Team::B);
        let err = "C".parse::<Team>().unwrap_err();
        assert_eq!(err.token, "C");
        assert_eq!(err.to_string(), "unknown team \"C\" (expected A or B)");
    }

    #[test]
    fn score_label_uses_tennis_names_outside_tiebreak() {
        let mut state = MatchState::new();
        assert_eq!(state.score_label(Team::A), "0");
        state.points = TeamPair::new(3, 4);
        assert_eq!(state.score_label(Team::A), "40");
        assert_eq!(state.score_label(Team::B), "AD");
    }

    #[test]
    fn score_label_out_of_range_is_empty() {
        let mut state = MatchState::new();
        state.points.a = 9;
        assert_eq!(state.score_label(Team::A), "");
    }

    #[test]
    fn score_label_shows_raw_count_in_tiebreak() {
        let mut state = MatchState::new();
        state.tie_break = true;
        state.games = TeamPair::new(6, 6);
        state.points = TeamPair::new(11, 9);
        assert_eq!(state.score_label(Team::A), "11");
        assert_eq!(state.score_label(Team::B), "9");
    }

    #[test]
    fn sets_to_win_follows_format() {
        let mut rules = MatchRules::default();
        assert_eq!(rules.sets_to_win(), 2);
        rules.best_of_three = false;
        assert_eq!(rules.sets_to_win(), 1);
    }
}
