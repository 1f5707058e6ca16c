//! Vertical kinematics for the player and the ghost
//!
//! One call advances one actor by exactly one tick. Units are px and px/tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// A jumping actor (player or ghost)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub vy: f32,
    pub size: Vec2,
    /// Resting y when standing on the ground
    pub floor: f32,
    pub alive: bool,
}

impl Actor {
    /// Actor standing on the ground at the tuned x position
    pub fn grounded(tuning: &Tuning) -> Self {
        let floor = tuning.actor_floor();
        Self {
            pos: Vec2::new(tuning.actor_x, floor),
            vy: 0.0,
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
            floor,
            alive: true,
        }
    }

    /// At or below the ground line, eligible to jump
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.pos.y >= self.floor
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Gravity and jump impulse shared by every actor in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub gravity: f32,
    pub jump_velocity: f32,
}

impl Physics {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            gravity: tuning.gravity,
            jump_velocity: tuning.jump_velocity,
        }
    }

    /// Advance `actor` by one tick. Jumps requested while airborne are ignored.
    pub fn step(&self, actor: &mut Actor, jump: bool) {
        if jump && actor.on_ground() {
            actor.vy = self.jump_velocity;
        }

        actor.vy += self.gravity;
        actor.pos.y += actor.vy;

        if actor.pos.y > actor.floor {
            actor.pos.y = actor.floor;
            actor.vy = 0.0;
        }
    }
}
