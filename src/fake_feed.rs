use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::score::Team;
use crate::state::Delta;

/// Spawns a rally simulator that keeps sending points until the receiver goes away.
pub fn spawn_fake_feed(tx: Sender<Delta>, interval: Duration, bias_a: f64) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        if tx
            .send(Delta::Log(format!(
                "[INFO] Demo feed: one point every {} ms, team A wins {:.0}% of rallies",
                interval.as_millis(),
                bias_a * 100.0
            )))
            .is_err()
        {
            return;
        }

        loop {
            thread::sleep(interval);
            let team = pick_rally_winner(&mut rng, bias_a);
            if tx.send(Delta::Point(team)).is_err() {
                return;
            }
        }
    });
}

/// Non-finite biases count as an even contest.
pub fn pick_rally_winner(rng: &mut impl Rng, bias_a: f64) -> Team {
    let bias = if bias_a.is_finite() {
        bias_a.clamp(0.0, 1.0)
    } else {
        0.5
    };
    if rng.gen_bool(bias) {
        Team::A
    } else {
        Team::B
    }
}
