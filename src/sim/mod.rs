//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded PRNG only (one stream per run)
//! - Run-relative clock only
//! - Fixed update order within a tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod ghost;
pub mod obstacles;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, hits_any};
pub use ghost::{Ghost, GhostPlayer};
pub use obstacles::{Obstacle, ObstacleGenerator, SpawnRecord};
pub use physics::{Actor, Physics};
pub use rng::Mulberry32;
pub use state::{Run, RunPhase};
pub use tick::{RunEvent, TickInput, replay, tick};
