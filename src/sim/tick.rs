//! Per-tick run update
//!
//! Core game loop that advances a run deterministically. Order within a tick
//! is fixed: spawn check, actor physics (player then ghost), obstacle movement
//! and culling, then the collision check.

use super::collision::hits_any;
use super::obstacles::Obstacle;
use super::state::{Run, RunPhase};
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump pressed since the previous tick
    pub jump: bool,
}

/// Something the host needs to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunEvent {
    /// The player hit an obstacle; `score` is seconds survived
    Died { score: f64 },
}

/// Advance the run to host time `now_ms`
pub fn tick(run: &mut Run, now_ms: f64, input: &TickInput) -> Option<RunEvent> {
    match run.phase {
        RunPhase::Dead => return None,
        RunPhase::Starting => {
            log::info!("Run started with seed {}", run.seed);
            run.phase = RunPhase::Running;
        }
        RunPhase::Running => {}
    }

    // Run clock never goes backwards
    run.elapsed_ms = (now_ms - run.started_at_ms).max(run.elapsed_ms);
    run.ticks += 1;
    let elapsed = run.elapsed_ms;

    let jump = input.jump && run.record_jump();

    if let Some((obstacle, record)) = run.generator.poll(&mut run.rng, elapsed) {
        log::debug!(
            "Spawn at {:.0}ms: {}x{} @ {:.2}",
            record.at_ms,
            record.width,
            record.height,
            record.speed
        );
        run.obstacles.push(obstacle);
    }

    let physics = run.physics;
    physics.step(&mut run.player, jump);
    if let Some(ghost) = run.ghost.as_mut() {
        ghost.step(&physics, elapsed);
    }

    run.generator.advance(&mut run.obstacles);

    let player = run.player.bounds();
    if hits_any(&player, run.obstacles.iter().map(Obstacle::bounds)) {
        run.player.alive = false;
        run.phase = RunPhase::Dead;
        let score = run.score();
        log::info!("Run over after {:.1}s ({} jumps)", score, run.jumps.len());
        return Some(RunEvent::Died { score });
    }

    None
}

/// Headless re-run of a recorded run at a fixed tick interval.
///
/// Recorded jumps are fed as inputs, at most one per tick, on the first tick at
/// or after their timestamp. Returns the score at death, or at `max_ms` if the
/// run survives that long. A tick interval that is not a positive finite number
/// never advances the clock, so it scores 0.
pub fn replay(seed: u32, jumps: &[f64], tick_ms: f64, max_ms: f64, tuning: &Tuning) -> f64 {
    if !(tick_ms.is_finite() && tick_ms > 0.0) {
        log::warn!("Refusing to replay with tick interval {}", tick_ms);
        return 0.0;
    }

    let mut run = Run::new(seed, None, tuning, 0.0);
    let mut pending = jumps.iter().peekable();

    let mut step = 0u64;
    loop {
        let now = step as f64 * tick_ms;
        if now > max_ms {
            break;
        }
        let jump = pending.next_if(|&&at| at <= now).is_some();
        if let Some(RunEvent::Died { score }) = tick(&mut run, now, &TickInput { jump }) {
            return score;
        }
        step += 1;
    }
    run.score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::GhostRecord;

    const TICK_MS: f64 = 16.0;

    /// Tick until death (or `max_ticks`), jumping whenever `should_jump` says so
    fn play(
        run: &mut Run,
        max_ticks: u64,
        mut should_jump: impl FnMut(&Run) -> bool,
    ) -> Option<f64> {
        for i in 0..max_ticks {
            let input = TickInput {
                jump: should_jump(run),
            };
            if let Some(RunEvent::Died { score }) = tick(run, i as f64 * TICK_MS, &input) {
                return Some(score);
            }
        }
        None
    }

    /// Jump when the nearest obstacle ahead is about to reach the player
    fn autopilot(run: &Run) -> bool {
        let px = run.player.pos.x + run.player.size.x;
        run.obstacles
            .iter()
            .any(|o| o.pos.x > px && o.pos.x - px < 50.0)
    }

    #[test]
    fn test_first_tick_starts_run() {
        let mut run = Run::new(1, None, &Tuning::default(), 500.0);
        assert!(tick(&mut run, 500.0, &TickInput::default()).is_none());
        assert_eq!(run.phase, RunPhase::Running);
        assert_eq!(run.elapsed_ms, 0.0);
        assert!(run.obstacles.is_empty());
    }

    #[test]
    fn test_idle_player_dies_and_freezes() {
        let mut run = Run::new(42, None, &Tuning::default(), 0.0);
        let score = play(&mut run, 10_000, |_| false).expect("idle player should be hit");
        assert!(score > 0.6);
        assert_eq!(run.phase, RunPhase::Dead);
        assert!(!run.player.alive);

        let frozen = run.clone();
        assert!(tick(&mut run, 1e7, &TickInput { jump: true }).is_none());
        assert_eq!(run.elapsed_ms, frozen.elapsed_ms);
        assert_eq!(run.jumps, frozen.jumps);
        assert_eq!(run.obstacles, frozen.obstacles);
        assert_eq!(run.score(), score);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut run = Run::new(3, None, &Tuning::default(), 0.0);
        tick(&mut run, 100.0, &TickInput::default());
        tick(&mut run, 50.0, &TickInput::default());
        assert_eq!(run.elapsed_ms, 100.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let tuning = Tuning::default();
        let mut a = Run::new(77, None, &tuning, 0.0);
        let mut b = Run::new(77, None, &tuning, 0.0);
        let score_a = play(&mut a, 3000, autopilot);
        let score_b = play(&mut b, 3000, autopilot);

        assert_eq!(score_a, score_b);
        assert_eq!(a.rng, b.rng);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.jumps, b.jumps);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_live_obstacles_stay_bounded() {
        let mut run = Run::new(31, None, &Tuning::default(), 0.0);
        for i in 0..5000 {
            let input = TickInput {
                jump: autopilot(&run),
            };
            tick(&mut run, i as f64 * TICK_MS, &input);
            assert!(run.obstacles.len() <= 5, "{} live at tick {i}", run.obstacles.len());
        }
    }

    #[test]
    fn test_replay_reproduces_score() {
        let tuning = Tuning::default();
        let ticks = 5000;
        let mut run = Run::new(2024, None, &tuning, 0.0);
        let score = play(&mut run, ticks, autopilot).unwrap_or(run.score());
        assert!(!run.jumps.is_empty());

        let horizon = (ticks - 1) as f64 * TICK_MS;
        let replayed = replay(run.seed, &run.jumps, TICK_MS, horizon, &tuning);
        assert_eq!(replayed, score);
    }

    #[test]
    fn test_replay_without_jumps_matches_idle_run() {
        let tuning = Tuning::default();
        let mut run = Run::new(42, None, &tuning, 0.0);
        let score = play(&mut run, 10_000, |_| false).unwrap();
        assert_eq!(replay(42, &[], TICK_MS, 1e9, &tuning), score);
    }

    #[test]
    fn test_replay_rejects_degenerate_tick_interval() {
        let tuning = Tuning::default();
        for tick_ms in [0.0, -16.0, f64::NAN, f64::INFINITY] {
            assert_eq!(replay(1, &[100.0], tick_ms, 1000.0, &tuning), 0.0);
        }
    }

    #[test]
    fn test_ghost_mirrors_recorded_player() {
        let tuning = Tuning::default();
        let mut original = Run::new(8, None, &tuning, 0.0);
        play(&mut original, 3000, autopilot);
        let record = GhostRecord {
            name: "ada".into(),
            seed: original.seed,
            jumps: original.jumps.clone(),
            date: 0.0,
        };

        // Same seed, same inputs: the ghost tracks the player tick for tick
        let mut run = Run::new(original.seed, Some(&record), &tuning, 0.0);
        let mut pending = original.jumps.clone().into_iter().peekable();
        for i in 0..original.ticks {
            let now = i as f64 * TICK_MS;
            let jump = pending.next_if(|&at| at <= now).is_some();
            tick(&mut run, now, &TickInput { jump });
            let ghost = run.ghost.as_ref().unwrap();
            assert_eq!(ghost.actor.pos, run.player.pos, "diverged at tick {i}");
        }
    }

    #[test]
    fn test_ghost_does_not_collide() {
        let tuning = Tuning::default();
        let record = GhostRecord {
            name: "idle".into(),
            seed: 0,
            jumps: Vec::new(),
            date: 0.0,
        };
        let mut run = Run::new(42, Some(&record), &tuning, 0.0);
        play(&mut run, 10_000, |_| false);
        assert!(run.ghost.as_ref().unwrap().actor.alive);
    }
}
