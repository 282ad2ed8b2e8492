//! The player-controlled square

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Aabb, Wall, WallSide};
use crate::tuning::Tuning;

/// Directional input for one physics tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Sum of the held directions (not normalized)
    pub fn vector(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir += Vec2::Y;
        }
        if self.left {
            dir += Vec2::NEG_X;
        }
        if self.right {
            dir += Vec2::X;
        }
        if self.down {
            dir += Vec2::NEG_Y;
        }
        dir
    }
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Uniform scale, never below `original_scale`
    pub size: f32,
    pub original_scale: f32,
    pub growth: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: tuning.original_scale,
            original_scale: tuning.original_scale,
            growth: tuning.growth,
            speed: tuning.player_speed,
        }
    }

    /// Back to starting size at the world origin
    ///
    /// The bounds are not used; the player always recenters on the origin.
    pub fn reset(&mut self, _world_min: Vec2, _world_max: Vec2) {
        self.size = self.original_scale;
        self.pos = Vec2::ZERO;
    }

    /// Move along the normalized input direction for one fixed step
    pub fn apply_input(&mut self, move_vector: Vec2, dt: f32) {
        self.pos += move_vector.normalize_or_zero() * self.speed * dt;
    }

    /// Gain one growth increment (no upper bound)
    pub fn grow(&mut self) {
        self.size += self.growth;
    }

    /// Player collider box
    ///
    /// The player always uses a unit box collider scaled by `size`; the
    /// tuning's `collider_size` only describes enemies.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half(self.pos, Vec2::splat(self.size / 2.0))
    }

    /// Keep the player box on the screen side of every wall's inner face
    ///
    /// Clamps against the face even when the box has jumped clean past a
    /// wall in one step.
    pub fn confine(&mut self, walls: &[Wall]) {
        let half = self.size / 2.0;
        for wall in walls {
            let face = wall.inner_face();
            match wall.side {
                WallSide::Left => self.pos.x = self.pos.x.max(face + half),
                WallSide::Right => self.pos.x = self.pos.x.min(face - half),
                WallSide::Bottom => self.pos.y = self.pos.y.max(face + half),
                WallSide::Top => self.pos.y = self.pos.y.min(face - half),
            }
        }
    }
}
