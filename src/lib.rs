pub mod config;
pub mod engine;
pub mod fake_feed;
pub mod replay;
pub mod rules;
pub mod score;
pub mod state;
