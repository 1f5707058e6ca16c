//! Ghost replay
//!
//! The ghost replays only the jump timing of the best run. Its trajectory comes
//! from feeding those jumps through the same physics as the player; it faces the
//! current run's obstacles and never collides with them.

use serde::{Deserialize, Serialize};

use super::physics::{Actor, Physics};
use crate::persistence::GhostRecord;
use crate::tuning::Tuning;

/// Cursor over a recorded list of jump timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostPlayer {
    jumps: Vec<f64>,
    cursor: usize,
    tolerance_ms: f64,
}

impl GhostPlayer {
    pub fn new(jumps: Vec<f64>, tolerance_ms: f64) -> Self {
        Self {
            jumps,
            cursor: 0,
            tolerance_ms,
        }
    }

    /// Whether the ghost jumps on the tick at run-relative time `elapsed_ms`.
    ///
    /// Fires at most one recorded jump per call, up to `tolerance_ms` early.
    pub fn should_jump(&mut self, elapsed_ms: f64) -> bool {
        match self.jumps.get(self.cursor) {
            Some(&at) if elapsed_ms >= at - self.tolerance_ms => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }
}

/// A ghost actor together with the replay driving it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub name: String,
    pub actor: Actor,
    replay: GhostPlayer,
}

impl Ghost {
    pub fn from_record(record: &GhostRecord, tuning: &Tuning) -> Self {
        Self {
            name: record.name.clone(),
            actor: Actor::grounded(tuning),
            replay: GhostPlayer::new(record.jumps.clone(), tuning.ghost_jump_tolerance_ms),
        }
    }

    /// Physics step for the ghost, with the jump decided by the replay
    pub fn step(&mut self, physics: &Physics, elapsed_ms: f64) {
        let jump = self.replay.should_jump(elapsed_ms);
        physics.step(&mut self.actor, jump);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE_MS: f64 = 10.0;

    #[test]
    fn test_jumps_fire_once_within_tolerance() {
        let mut ghost = GhostPlayer::new(vec![500.0, 1200.0], TOLERANCE_MS);
        let fired: Vec<bool> = [480.0, 490.0, 500.0, 1180.0, 1190.0, 1200.0, 5000.0]
            .into_iter()
            .map(|t| ghost.should_jump(t))
            .collect();
        assert_eq!(fired, vec![false, true, false, false, true, false, false]);
    }

    #[test]
    fn test_late_tick_fires_backlog_one_per_tick() {
        let mut ghost = GhostPlayer::new(vec![100.0, 110.0, 120.0], TOLERANCE_MS);
        assert!(ghost.should_jump(500.0));
        assert!(ghost.should_jump(516.0));
        assert!(ghost.should_jump(532.0));
        assert!(!ghost.should_jump(548.0));
    }

    #[test]
    fn test_empty_recording_never_jumps() {
        let mut ghost = GhostPlayer::new(Vec::new(), TOLERANCE_MS);
        assert!(!ghost.should_jump(0.0));
        assert!(!ghost.should_jump(1e9));
    }

    #[test]
    fn test_tolerance_comes_from_tuning() {
        let tuning = Tuning {
            ghost_jump_tolerance_ms: 50.0,
            ..Tuning::default()
        };
        let record = GhostRecord {
            name: "ada".into(),
            seed: 3,
            jumps: vec![100.0],
            date: 0.0,
        };
        let mut ghost = Ghost::from_record(&record, &tuning);
        ghost.step(&Physics::from_tuning(&tuning), 50.0);
        assert!(!ghost.actor.on_ground());
    }

    #[test]
    fn test_ghost_actor_follows_replay() {
        let tuning = Tuning::default();
        let physics = Physics::from_tuning(&tuning);
        let record = GhostRecord {
            name: "ada".into(),
            seed: 3,
            jumps: vec![32.0],
            date: 0.0,
        };
        let mut ghost = Ghost::from_record(&record, &tuning);

        ghost.step(&physics, 16.0);
        assert!(ghost.actor.on_ground());
        ghost.step(&physics, 32.0);
        assert!(!ghost.actor.on_ground());
    }
}
