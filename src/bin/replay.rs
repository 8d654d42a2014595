use std::path::PathBuf;

use anyhow::Context;

use courtside::replay;
use courtside::score::Team;

fn main() -> anyhow::Result<()> {
    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let path = path.unwrap_or_else(|| PathBuf::from("tests/fixtures/replay_tiebreak.json"));

    let replay = replay::load_replay(&path)?;
    let (engine, events) = replay.run();

    if json {
        let out = serde_json::to_string_pretty(engine.state()).context("serialize match state")?;
        println!("{out}");
        return Ok(());
    }

    for event in &events {
        println!("{}", event.describe());
    }
    println!();
    let sets = engine.sets_won();
    let games = engine.games_won();
    println!("Sets:   {}-{}", sets.a, sets.b);
    println!("Games:  {}-{}", games.a, games.b);
    println!(
        "Points: {}-{}{}",
        engine.score_label(Team::A),
        engine.score_label(Team::B),
        if engine.tie_break() { " (tiebreak)" } else { "" }
    );
    match engine.winner() {
        Some(team) => println!("Winner: {team}"),
        None => println!("Winner: -"),
    }

    Ok(())
}
