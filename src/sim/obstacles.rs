//! Seeded obstacle generation and movement
//!
//! The generator draws from the run's PRNG on every tick, never from wall-clock
//! randomness, so a seed plus the sequence of tick times fully determines the
//! obstacle stream. Draw order per tick: gap, then (on spawn) height, width, speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::Mulberry32;
use crate::tuning::Tuning;

/// An obstacle sliding left along the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed (px/tick)
    pub speed: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Right edge is more than `margin` left of the field
    #[inline]
    pub fn is_offscreen(&self, margin: f32) -> bool {
        self.pos.x + self.size.x < -margin
    }
}

/// What was spawned and when, independent of where it has moved since
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRecord {
    /// Run-relative time of the spawn (ms)
    pub at_ms: f64,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

/// Decides once per tick whether an obstacle appears
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleGenerator {
    last_spawn_ms: f64,
    spawn_x: f32,
    ground_y: f32,
    offscreen_margin: f32,
    gap_min_ms: f64,
    gap_spread_ms: f64,
    height_min: f32,
    height_spread: f32,
    width_min: f32,
    width_spread: f32,
    speed_min: f32,
    speed_spread: f32,
}

impl ObstacleGenerator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_spawn_ms: 0.0,
            spawn_x: tuning.field_width + tuning.spawn_offset,
            ground_y: tuning.ground_y(),
            offscreen_margin: tuning.offscreen_margin,
            gap_min_ms: tuning.spawn_gap_min_ms,
            gap_spread_ms: tuning.spawn_gap_spread_ms,
            height_min: tuning.obstacle_height_min,
            height_spread: tuning.obstacle_height_spread,
            width_min: tuning.obstacle_width_min,
            width_spread: tuning.obstacle_width_spread,
            speed_min: tuning.obstacle_speed_min,
            speed_spread: tuning.obstacle_speed_spread,
        }
    }

    /// Spawn check for the tick at run-relative time `now_ms`
    pub fn poll(&mut self, rng: &mut Mulberry32, now_ms: f64) -> Option<(Obstacle, SpawnRecord)> {
        let gap = rng.next_range(self.gap_min_ms, self.gap_spread_ms);
        if now_ms - self.last_spawn_ms < gap {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let height = self.height_min + (rng.next_f64() * self.height_spread as f64).floor() as f32;
        let width = self.width_min + (rng.next_f64() * self.width_spread as f64).floor() as f32;
        let speed = rng.next_range(self.speed_min as f64, self.speed_spread as f64) as f32;

        let obstacle = Obstacle {
            pos: Vec2::new(self.spawn_x, self.ground_y - height),
            size: Vec2::new(width, height),
            speed,
        };
        let record = SpawnRecord {
            at_ms: now_ms,
            width,
            height,
            speed,
        };
        Some((obstacle, record))
    }

    /// Move every obstacle left by its speed, then drop the ones fully off-screen
    pub fn advance(&self, obstacles: &mut Vec<Obstacle>) {
        for obstacle in obstacles.iter_mut() {
            obstacle.pos.x -= obstacle.speed;
        }
        obstacles.retain(|o| !o.is_offscreen(self.offscreen_margin));
    }
}
