//! Ghost Runner - An endless runner with a best-run ghost
//!
//! Core modules:
//! - `sim`: Deterministic simulation (PRNG, obstacles, physics, collisions, ghost replay)
//! - `app`: Top-level controller owning the current run and cached best score
//! - `persistence`: Best score + ghost record store
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use highscores::BestRun;
pub use input::{InputEvent, InputQueue};
pub use settings::Settings;
pub use tuning::Tuning;

/// Store constants
pub mod consts {
    /// Maximum player name length kept by the store (in characters)
    pub const MAX_NAME_CHARS: usize = 24;
    /// Name stored when a submission carries none
    pub const DEFAULT_PLAYER_NAME: &str = "anon";
}
