use std::env;
use std::time::Duration;

use crate::score::MatchRules;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub team_a_name: String,
    pub team_b_name: String,
    pub rules: MatchRules,
    pub demo_feed: bool,
    pub demo_point_interval: Duration,
    // Probability that team A takes a simulated rally.
    pub demo_serve_bias: f64,
    pub point_flash: Duration,
    pub game_flash: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            team_a_name: "TEAM A".to_string(),
            team_b_name: "TEAM B".to_string(),
            rules: MatchRules::default(),
            demo_feed: false,
            demo_point_interval: Duration::from_millis(1200),
            demo_serve_bias: 0.5,
            point_flash: Duration::from_millis(400),
            game_flash: Duration::from_millis(1000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparseable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let name = |key: &str, fallback: String| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
                .unwrap_or(fallback)
        };
        let millis = |key: &str, fallback: Duration, min: u64, max: u64| {
            lookup(key)
                .and_then(|val| val.trim().parse::<u64>().ok())
                .map(|ms| Duration::from_millis(ms.clamp(min, max)))
                .unwrap_or(fallback)
        };

        let golden_point = lookup("GOLDEN_POINT")
            .and_then(|val| parse_flag(&val))
            .unwrap_or(defaults.rules.golden_point);
        let best_of_three = match lookup("BEST_OF").as_deref().map(str::trim) {
            Some("1") => false,
            Some("3") => true,
            _ => defaults.rules.best_of_three,
        };

        Self {
            team_a_name: name("TEAM_A_NAME", defaults.team_a_name),
            team_b_name: name("TEAM_B_NAME", defaults.team_b_name),
            rules: MatchRules {
                golden_point,
                best_of_three,
            },
            demo_feed: lookup("DEMO_FEED")
                .and_then(|val| parse_flag(&val))
                .unwrap_or(defaults.demo_feed),
            demo_point_interval: millis("DEMO_POINT_MS", defaults.demo_point_interval, 200, 10_000),
            demo_serve_bias: lookup("DEMO_SERVE_BIAS")
                .and_then(|val| val.trim().parse::<f64>().ok())
                .filter(|bias| bias.is_finite())
                .map(|bias| bias.clamp(0.05, 0.95))
                .unwrap_or(defaults.demo_serve_bias),
            point_flash: millis("POINT_FLASH_MS", defaults.point_flash, 0, 5_000),
            game_flash: millis("GAME_FLASH_MS", defaults.game_flash, 0, 10_000),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.team_a_name, "TEAM A");
        assert!(cfg.rules.best_of_three);
        assert!(!cfg.rules.golden_point);
        assert!(!cfg.demo_feed);
        assert_eq!(cfg.point_flash, Duration::from_millis(400));
    }

    #[test]
    fn parses_format_and_flags() {
        let cfg = config_from(&[
            ("BEST_OF", "1"),
            ("GOLDEN_POINT", "Yes"),
            ("DEMO_FEED", "on"),
            ("TEAM_B_NAME", "  Nadal "),
        ]);
        assert!(!cfg.rules.best_of_three);
        assert!(cfg.rules.golden_point);
        assert!(cfg.demo_feed);
        assert_eq!(cfg.team_b_name, "Nadal");
    }

    #[test]
    fn clamps_and_ignores_bad_values() {
        let cfg = config_from(&[
            ("DEMO_POINT_MS", "5"),
            ("DEMO_SERVE_BIAS", "1.7"),
            ("BEST_OF", "5"),
            ("GOLDEN_POINT", "maybe"),
            ("GAME_FLASH_MS", "abc"),
        ]);
        assert_eq!(cfg.demo_point_interval, Duration::from_millis(200));
        assert!((cfg.demo_serve_bias - 0.95).abs() < f64::EPSILON);
        assert!(cfg.rules.best_of_three);
        assert!(!cfg.rules.golden_point);
        assert_eq!(cfg.game_flash, Duration::from_millis(1000));
    }
}
