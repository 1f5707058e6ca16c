//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so runs can be replayed
//! with the exact constants they were played with.

use serde::{Deserialize, Serialize};

/// Simulation constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width (px)
    pub field_width: f32,
    /// Playfield height (px)
    pub field_height: f32,
    /// Distance from the bottom of the field to the ground line (px)
    pub ground_inset: f32,

    /// Fixed horizontal position of the player and ghost (px)
    pub actor_x: f32,
    /// Actor width (px)
    pub actor_width: f32,
    /// Actor height (px)
    pub actor_height: f32,

    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (px/tick, negative is up)
    pub jump_velocity: f32,

    /// Minimum time between spawns (ms)
    pub spawn_gap_min_ms: f64,
    /// Random extra time added to the spawn gap (ms)
    pub spawn_gap_spread_ms: f64,
    /// Shortest obstacle (px)
    pub obstacle_height_min: f32,
    /// Number of whole-pixel heights above the minimum
    pub obstacle_height_spread: f32,
    /// Narrowest obstacle (px)
    pub obstacle_width_min: f32,
    /// Number of whole-pixel widths above the minimum
    pub obstacle_width_spread: f32,
    /// Slowest obstacle (px/tick)
    pub obstacle_speed_min: f32,
    /// Random extra speed (px/tick)
    pub obstacle_speed_spread: f32,
    /// Obstacles spawn this far past the right edge (px)
    pub spawn_offset: f32,
    /// Obstacles are culled once their right edge passes this far left of the field (px)
    pub offscreen_margin: f32,

    /// How early a recorded ghost jump may fire (ms)
    pub ghost_jump_tolerance_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 300.0,
            ground_inset: 40.0,

            actor_x: 80.0,
            actor_width: 28.0,
            actor_height: 28.0,

            gravity: 0.65,
            jump_velocity: -11.5,

            spawn_gap_min_ms: 600.0,
            spawn_gap_spread_ms: 400.0,
            obstacle_height_min: 30.0,
            obstacle_height_spread: 40.0,
            obstacle_width_min: 20.0,
            obstacle_width_spread: 20.0,
            obstacle_speed_min: 6.0,
            obstacle_speed_spread: 2.0,
            spawn_offset: 10.0,
            offscreen_margin: 20.0,

            ghost_jump_tolerance_ms: 10.0,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_inset
    }

    /// Resting y (top edge) of an actor standing on the ground
    #[inline]
    pub fn actor_floor(&self) -> f32 {
        self.ground_y() - self.actor_height
    }

    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
