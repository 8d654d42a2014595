use crate::rules;
use crate::score::{MatchRules, MatchState, ScoreEvent, Team, TeamPair};

/// Pending notifications kept when nobody drains them; the oldest are dropped first.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Owns the live match: current state, format toggles, undo history and pending
/// notifications for the display.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    state: MatchState,
    rules: MatchRules,
    // One snapshot per accepted point or reset, taken before the mutation.
    history: Vec<MatchState>,
    events: Vec<ScoreEvent>,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: MatchRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn award_point(&mut self, team: Team) {
        if self.state.winner.is_some() {
            return;
        }
        self.history.push(self.state);
        rules::score_point(&mut self.state, self.rules, team, &mut self.events);
        self.trim_events();
    }

    /// Restores the snapshot taken before the last point or reset. The format is not part
    /// of history, so the winner is re-checked against the current rules afterwards.
    pub fn undo(&mut self) {
        let Some(previous) = self.history.pop() else {
            return;
        };
        self.state = previous;
        self.events.push(ScoreEvent::Undone);
        if let Some(winner) = rules::evaluate_match_winner(&mut self.state, self.rules) {
            self.events.push(ScoreEvent::MatchWon(winner));
        }
        self.trim_events();
    }

    pub fn reset(&mut self) {
        self.history.push(self.state);
        self.state = MatchState::new();
        self.events.push(ScoreEvent::Reset);
        self.trim_events();
    }

    pub fn toggle_golden_point(&mut self) {
        self.rules.golden_point = !self.rules.golden_point;
        self.events
            .push(ScoreEvent::GoldenPointChanged(self.rules.golden_point));
        self.trim_events();
    }

    /// Flips the match format and immediately re-checks the winner against the sets
    /// already played. A winner is only ever added here, never cleared.
    pub fn toggle_best_of_three(&mut self) {
        self.rules.best_of_three = !self.rules.best_of_three;
        self.events
            .push(ScoreEvent::BestOfThreeChanged(self.rules.best_of_three));
        if let Some(winner) = rules::evaluate_match_winner(&mut self.state, self.rules) {
            self.events.push(ScoreEvent::MatchWon(winner));
        }
        self.trim_events();
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    pub fn score_label(&self, team: Team) -> String {
        self.state.score_label(team)
    }

    pub fn team_a_score(&self) -> String {
        self.score_label(Team::A)
    }

    pub fn team_b_score(&self) -> String {
        self.score_label(Team::B)
    }

    pub fn winner(&self) -> Option<Team> {
        self.state.winner
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn sets_won(&self) -> TeamPair<u32> {
        self.state.sets
    }

    pub fn games_won(&self) -> TeamPair<u32> {
        self.state.games
    }

    pub fn tie_break(&self) -> bool {
        self.state.tie_break
    }

    /// Drains notifications raised since the previous call. At most
    /// [`MAX_PENDING_EVENTS`] are buffered between calls.
    pub fn take_events(&mut self) -> Vec<ScoreEvent> {
        std::mem::take(&mut self.events)
    }

    fn trim_events(&mut self) {
        if self.events.len() > MAX_PENDING_EVENTS {
            let drain_count = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..drain_count);
        }
    }
}
