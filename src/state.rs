use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::engine::ScoringEngine;
use crate::score::{ScoreEvent, Team};

const MAX_LOGS: usize = 200;

/// A short-lived highlight on one team's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub team: Team,
    pub until: Instant,
}

impl Flash {
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.until
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: ScoringEngine,
    pub team_a_name: String,
    pub team_b_name: String,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub settings_visible: bool,
    pub point_flash: Option<Flash>,
    pub game_flash: Option<Flash>,
    pub point_flash_for: Duration,
    pub game_flash_for: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            engine: ScoringEngine::with_rules(cfg.rules),
            team_a_name: cfg.team_a_name.clone(),
            team_b_name: cfg.team_b_name.clone(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            settings_visible: false,
            point_flash: None,
            game_flash: None,
            point_flash_for: cfg.point_flash,
            game_flash_for: cfg.game_flash,
        }
    }

    pub fn team_name(&self, team: Team) -> &str {
        match team {
            Team::A => &self.team_a_name,
            Team::B => &self.team_b_name,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn toggle_settings(&mut self) {
        self.settings_visible = !self.settings_visible;
    }

    pub fn clear_expired_flashes(&mut self, now: Instant) {
        if self.point_flash.is_some_and(|f| !f.is_active(now)) {
            self.point_flash = None;
        }
        if self.game_flash.is_some_and(|f| !f.is_active(now)) {
            self.game_flash = None;
        }
    }

    pub fn point_flash_team(&self, now: Instant) -> Option<Team> {
        self.point_flash
            .filter(|f| f.is_active(now))
            .map(|f| f.team)
    }

    pub fn game_flash_team(&self, now: Instant) -> Option<Team> {
        self.game_flash.filter(|f| f.is_active(now)).map(|f| f.team)
    }

    fn absorb_events(&mut self, now: Instant) {
        for event in self.engine.take_events() {
            match event {
                ScoreEvent::PointWon(team) => {
                    self.point_flash = Some(Flash {
                        team,
                        until: now + self.point_flash_for,
                    });
                    // Rally-by-rally entries would drown the console.
                    continue;
                }
                ScoreEvent::GameWon(team) | ScoreEvent::SetWon { team, .. } => {
                    self.game_flash = Some(Flash {
                        team,
                        until: now + self.game_flash_for,
                    });
                }
                ScoreEvent::Undone | ScoreEvent::Reset => {
                    self.point_flash = None;
                    self.game_flash = None;
                }
                _ => {}
            }
            let line = self.narrate(event);
            self.push_log(format!("[INFO] {line}"));
        }
    }

    fn narrate(&self, event: ScoreEvent) -> String {
        match event {
            ScoreEvent::Advantage(team) => format!("Advantage {}", self.team_name(team)),
            ScoreEvent::GameWon(team) => format!("Game {}", self.team_name(team)),
            ScoreEvent::SetWon { team, sets } => format!(
                "Set {} ({}-{})",
                self.team_name(team),
                sets.a,
                sets.b
            ),
            ScoreEvent::MatchWon(team) => format!("Match won by {}", self.team_name(team)),
            other => other.describe(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    Point(Team),
    Undo,
    Reset,
    ToggleGoldenPoint,
    ToggleBestOfThree,
    Log(String),
}

pub fn apply_delta(state: &mut AppState, delta: Delta, now: Instant) {
    match delta {
        Delta::Point(team) => {
            if state.engine.winner().is_some() {
                return;
            }
            state.engine.award_point(team);
        }
        Delta::Undo => {
            if !state.engine.can_undo() {
                state.push_log("[INFO] Nothing to undo");
                return;
            }
            state.engine.undo();
        }
        Delta::Reset => state.engine.reset(),
        Delta::ToggleGoldenPoint => state.engine.toggle_golden_point(),
        Delta::ToggleBestOfThree => state.engine.toggle_best_of_three(),
        Delta::Log(msg) => {
            state.push_log(msg);
            return;
        }
    }
    state.absorb_events(now);
}

pub fn format_label(best_of_three: bool) -> &'static str {
    if best_of_three { "Best of 3" } else { "Best of 1" }
}

pub fn on_off_label(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
