//! Best score + ghost persistence
//!
//! Exactly one record is kept: the best run so far. Features:
//! - Typed JSON wire records (`Standing`, `Candidate`, `SubmitReply`)
//! - Read/compare/write serialized behind one lock
//! - In-memory and JSON-file repositories (atomic replace on write)

pub mod record;
pub mod repository;
pub mod service;

pub use record::{Candidate, GhostRecord, Standing, SubmitReply};
pub use repository::{MemoryRepository, Repository};
#[cfg(not(target_arch = "wasm32"))]
pub use repository::JsonFileRepository;
pub use service::{HighscoreService, ScoreStore};

use thiserror::Error;

/// Errors surfaced by the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored or submitted JSON is malformed
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Submission carried no usable numeric score
    #[error("score must be a number")]
    InvalidScore,
    /// A writer panicked while holding the store lock
    #[error("store lock poisoned")]
    Poisoned,
    /// Transport failure reaching a remote store
    #[error("transport: {0}")]
    Transport(String),
}
