//! Scripted matches: a JSON file with optional format flags and a compact point string.
//!
//! ```json
//! { "golden_point": false, "best_of_three": true, "points": "AAAA BBBB -A R" }
//! ```
//!
//! `A`/`B` award a point, `-` undoes the last action, `R` resets the match. Whitespace is
//! ignored and letters are case-insensitive.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::engine::ScoringEngine;
use crate::score::{MatchRules, ScoreEvent, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    Point(Team),
    Undo,
    Reset,
}

#[derive(Debug, Clone, Deserialize)]
struct ReplayFile {
    #[serde(default)]
    golden_point: Option<bool>,
    #[serde(default)]
    best_of_three: Option<bool>,
    points: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub rules: MatchRules,
    pub steps: Vec<ReplayStep>,
}

impl Replay {
    /// Plays every step on a fresh engine and returns it together with the events raised.
    pub fn run(&self) -> (ScoringEngine, Vec<ScoreEvent>) {
        let mut engine = ScoringEngine::with_rules(self.rules);
        let mut events = Vec::new();
        for step in &self.steps {
            match step {
                ReplayStep::Point(team) => engine.award_point(*team),
                ReplayStep::Undo => engine.undo(),
                ReplayStep::Reset => engine.reset(),
            }
            events.extend(engine.take_events());
        }
        (engine, events)
    }
}

pub fn parse_steps(raw: &str) -> Result<Vec<ReplayStep>> {
    let mut steps = Vec::with_capacity(raw.len());
    for (offset, ch) in raw.char_indices() {
        let step = match ch {
            c if c.is_whitespace() => continue,
            '-' => ReplayStep::Undo,
            'R' | 'r' => ReplayStep::Reset,
            other => {
                let team = other
                    .to_string()
                    .parse::<Team>()
                    .with_context(|| format!("unexpected replay token at offset {offset}"))?;
                ReplayStep::Point(team)
            }
        };
        steps.push(step);
    }
    Ok(steps)
}

pub fn parse_replay(raw: &str) -> Result<Replay> {
    let file: ReplayFile = serde_json::from_str(raw).context("invalid replay json")?;
    let defaults = MatchRules::default();
    let rules = MatchRules {
        golden_point: file.golden_point.unwrap_or(defaults.golden_point),
        best_of_three: file.best_of_three.unwrap_or(defaults.best_of_three),
    };
    let steps = parse_steps(&file.points).context("invalid replay points")?;
    Ok(Replay { rules, steps })
}

pub fn load_replay(path: &Path) -> Result<Replay> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading replay {}", path.display()))?;
    parse_replay(&raw)
}
