//! Best-score rules on top of a repository

use std::sync::Mutex;

use super::StoreError;
use super::record::{Candidate, GhostRecord, Standing, SubmitReply};
use super::repository::Repository;
use crate::platform;

/// The two operations a run needs from persistence
pub trait ScoreStore {
    /// Current best score and ghost
    fn read(&self) -> Result<Standing, StoreError>;
    /// Offer a finished run; only a strictly higher score replaces the best
    fn submit(&self, candidate: &Candidate) -> Result<SubmitReply, StoreError>;
}

/// Serializes read-compare-write so concurrent submissions cannot interleave
#[derive(Debug)]
pub struct HighscoreService<R> {
    repo: Mutex<R>,
}

impl<R: Repository> HighscoreService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo: Mutex::new(repo),
        }
    }

    /// Validate and submit a raw JSON payload.
    ///
    /// `score` must be present and numeric before the rest of the body is typed.
    pub fn submit_json(&self, body: &[u8]) -> Result<SubmitReply, StoreError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.get("score").is_some_and(serde_json::Value::is_number) {
            return Err(StoreError::InvalidScore);
        }
        let candidate: Candidate = serde_json::from_value(value)?;
        self.submit(&candidate)
    }
}

impl<R: Repository> ScoreStore for HighscoreService<R> {
    fn read(&self) -> Result<Standing, StoreError> {
        let mut repo = self.repo.lock().map_err(|_| StoreError::Poisoned)?;
        repo.load()
    }

    fn submit(&self, candidate: &Candidate) -> Result<SubmitReply, StoreError> {
        if !candidate.score.is_finite() {
            return Err(StoreError::InvalidScore);
        }

        let mut repo = self.repo.lock().map_err(|_| StoreError::Poisoned)?;
        let current = repo.load()?;

        if candidate.score <= current.best_score {
            log::debug!(
                "Rejected score {:.3} (best is {:.3})",
                candidate.score,
                current.best_score
            );
            return Ok(SubmitReply {
                updated: false,
                best_score: current.best_score,
                ghost: current.ghost,
            });
        }

        let ghost = GhostRecord {
            name: candidate.normalized_name(),
            seed: candidate.seed,
            jumps: candidate.jumps.clone().unwrap_or_default(),
            date: candidate.date.unwrap_or_else(platform::now_ms),
        };
        let standing = Standing {
            best_score: candidate.score,
            ghost: Some(ghost),
        };
        repo.save(&standing)?;

        log::info!(
            "New best {:.3} by {}",
            standing.best_score,
            standing.ghost.as_ref().map_or("?", |g| g.name.as_str())
        );
        Ok(SubmitReply {
            updated: true,
            best_score: standing.best_score,
            ghost: standing.ghost,
        })
    }
}
