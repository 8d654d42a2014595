use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use courtside::engine::ScoringEngine;
use courtside::replay::parse_steps;
use courtside::score::{MatchRules, Team};

fn rally_script(len: usize) -> Vec<Team> {
    // Deterministic mix of holds, deuces and tiebreaks.
    (0..len)
        .map(|idx| {
            if (idx * 7 + idx / 5) % 3 == 0 {
                Team::B
            } else {
                Team::A
            }
        })
        .collect()
}

fn bench_award_points(c: &mut Criterion) {
    let script = rally_script(2_000);
    c.bench_function("award_point_2000", |b| {
        b.iter(|| {
            let mut engine = ScoringEngine::with_rules(MatchRules::default());
            for team in &script {
                engine.award_point(*team);
                if engine.winner().is_some() {
                    engine.reset();
                }
            }
            black_box(engine.state().sets);
        })
    });
}

fn bench_undo_all(c: &mut Criterion) {
    let script = rally_script(500);
    c.bench_function("undo_500", |b| {
        b.iter(|| {
            let mut engine = ScoringEngine::new();
            for team in &script {
                engine.award_point(*team);
            }
            while engine.can_undo() {
                engine.undo();
            }
            black_box(engine.take_events().len());
        })
    });
}

fn bench_replay_parse(c: &mut Criterion) {
    let raw = "AAAABBBB ABABABAB - AAAA ".repeat(200);
    c.bench_function("replay_parse_steps", |b| {
        b.iter(|| {
            let steps = parse_steps(black_box(&raw)).unwrap();
            black_box(steps.len());
        })
    });
}

criterion_group!(benches, bench_award_points, bench_undo_all, bench_replay_parse);
criterion_main!(benches);
