//! Enemy squares that drift across the screen

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::WorldBounds;
use crate::tuning::Tuning;

/// Screen edge an enemy entered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Bottom,
    Top,
    Left,
    Right,
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable slot ID
    pub id: u64,
    pub pos: Vec2,
    /// Uniform scale (width == height)
    pub size: f32,
    /// World units per second
    pub speed: f32,
    /// Unit movement direction, perpendicular to the spawn edge
    pub dir: Vec2,
}

impl Enemy {
    /// Create an enemy just off one screen edge, heading across the screen
    ///
    /// Draw order is size, axis, side, position along the edge, speed.
    pub fn spawn<R: Rng + ?Sized>(
        id: u64,
        rng: &mut R,
        bounds: &WorldBounds,
        tuning: &Tuning,
    ) -> Self {
        let size = rng.random_range(tuning.min_size..=tuning.max_size);

        // Push the edges out so the whole collider starts off screen
        let spawn_rect = bounds.expanded(tuning.collider_size / 2.0 * size);
        let (min, max) = (spawn_rect.min, spawn_rect.max);

        // 0 = bottom/top edge, 1 = left/right edge
        let axis: u8 = rng.random_range(0..2);
        // 0 = min side, 1 = max side
        let side: u8 = rng.random_range(0..2);

        let along = if axis == 0 {
            rng.random_range(min.x..=max.x)
        } else {
            rng.random_range(min.y..=max.y)
        };

        let pos = if axis == 0 {
            Vec2::new(along, if side == 0 { min.y } else { max.y })
        } else {
            Vec2::new(if side == 0 { min.x } else { max.x }, along)
        };

        let sign = if side == 0 { 1.0 } else { -1.0 };
        let dir = (if axis == 0 { Vec2::Y } else { Vec2::X }) * sign;

        let speed = rng.random_range(tuning.min_speed..=tuning.max_speed);

        Self {
            id,
            pos,
            size,
            speed,
            dir,
        }
    }

    /// Advance along the movement direction
    #[inline]
    pub fn tick(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }

    /// Edge this enemy entered from
    pub fn edge(&self) -> SpawnEdge {
        if self.dir.x == 0.0 {
            if self.dir.y > 0.0 {
                SpawnEdge::Bottom
            } else {
                SpawnEdge::Top
            }
        } else if self.dir.x > 0.0 {
            SpawnEdge::Left
        } else {
            SpawnEdge::Right
        }
    }
}
