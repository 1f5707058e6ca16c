//! Run state and core simulation types
//!
//! Everything one run owns lives here: its seed and PRNG, the player, the
//! optional ghost, live obstacles and the run clock.

use serde::{Deserialize, Serialize};

use super::ghost::Ghost;
use super::obstacles::{Obstacle, ObstacleGenerator};
use super::physics::{Actor, Physics};
use super::rng::Mulberry32;
use crate::highscores::BestRun;
use crate::persistence::{Candidate, GhostRecord};
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Built but not yet ticked
    Starting,
    /// Active gameplay
    Running,
    /// Player hit an obstacle; frozen
    Dead,
}

/// One run from start to death
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Seed for the obstacle stream, fixed for the whole run
    pub seed: u32,
    pub rng: Mulberry32,
    pub phase: RunPhase,
    pub player: Actor,
    /// Jump presses in ms since run start, ascending
    pub jumps: Vec<f64>,
    pub ghost: Option<Ghost>,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub generator: ObstacleGenerator,
    pub physics: Physics,
    /// Host clock reading when the run started (ms)
    pub started_at_ms: f64,
    /// Run clock (ms); stops advancing at death
    pub elapsed_ms: f64,
    pub ticks: u64,
    submitted: bool,
}

impl Run {
    /// Create a run with the given seed, starting at host time `started_at_ms`.
    ///
    /// The ghost replays `ghost`'s jump timing against this run's own obstacles.
    pub fn new(
        seed: u32,
        ghost: Option<&GhostRecord>,
        tuning: &Tuning,
        started_at_ms: f64,
    ) -> Self {
        Self {
            seed,
            rng: Mulberry32::new(seed),
            phase: RunPhase::Starting,
            player: Actor::grounded(tuning),
            jumps: Vec::new(),
            ghost: ghost.map(|g| Ghost::from_record(g, tuning)),
            obstacles: Vec::new(),
            generator: ObstacleGenerator::new(tuning),
            physics: Physics::from_tuning(tuning),
            started_at_ms,
            elapsed_ms: 0.0,
            ticks: 0,
            submitted: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase != RunPhase::Dead
    }

    /// Seconds survived
    pub fn score(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    /// Record a jump press at the current run time; ignored once dead
    pub fn record_jump(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.jumps.push(self.elapsed_ms);
        true
    }

    /// Build the best-score submission for a dead run.
    ///
    /// Returns `Some` at most once per run, and only if the score beats `best`.
    pub fn claim_submission(
        &mut self,
        name: &str,
        best: &BestRun,
        date_ms: f64,
    ) -> Option<Candidate> {
        if self.is_alive() || self.submitted {
            return None;
        }
        self.submitted = true;

        let score = self.score();
        if !best.beats(score) {
            return None;
        }
        Some(Candidate {
            name: Some(name.to_string()),
            score,
            seed: self.seed,
            jumps: Some(self.jumps.clone()),
            date: Some(date_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best(score: f64) -> BestRun {
        BestRun { score, ghost: None }
    }

    #[test]
    fn test_new_run_is_starting() {
        let run = Run::new(5, None, &Tuning::default(), 1000.0);
        assert_eq!(run.phase, RunPhase::Starting);
        assert!(run.obstacles.is_empty());
        assert!(run.ghost.is_none());
        assert_eq!(run.score(), 0.0);
        assert_eq!(run.rng, Mulberry32::new(5));
    }

    #[test]
    fn test_claim_only_when_dead_and_once() {
        let mut run = Run::new(5, None, &Tuning::default(), 0.0);
        run.elapsed_ms = 4200.0;
        assert!(run.claim_submission("ada", &best(1.0), 0.0).is_none());

        run.phase = RunPhase::Dead;
        let candidate = run.claim_submission("ada", &best(1.0), 99.0).unwrap();
        assert_eq!(candidate.score, 4.2);
        assert_eq!(candidate.seed, 5);
        assert_eq!(candidate.date, Some(99.0));
        assert!(run.claim_submission("ada", &best(1.0), 0.0).is_none());
    }

    #[test]
    fn test_claim_skipped_when_not_a_best() {
        let mut run = Run::new(5, None, &Tuning::default(), 0.0);
        run.elapsed_ms = 3000.0;
        run.phase = RunPhase::Dead;
        assert!(run.claim_submission("ada", &best(3.0), 0.0).is_none());
    }

    #[test]
    fn test_no_jumps_recorded_when_dead() {
        let mut run = Run::new(5, None, &Tuning::default(), 0.0);
        assert!(run.record_jump());
        run.phase = RunPhase::Dead;
        assert!(!run.record_jump());
        assert_eq!(run.jumps, vec![0.0]);
    }
}
