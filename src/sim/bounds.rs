//! World rectangle, margins, and axis-aligned box tests
//!
//! The visible world rectangle comes from the viewport every frame. Two
//! different expansions of it are used:
//! - spawn: half the enemy collider scaled by the enemy's size
//! - cull: a fixed `CULL_MARGIN`, tested against `pos ± size`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use crate::consts::{CULL_MARGIN, WALL_OFFSET, WALL_THICKNESS};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_half(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True if the two boxes share any area (touching edges count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Visible world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        debug_assert!(min.x < max.x && min.y < max.y, "degenerate world bounds");
        Self { min, max }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Grow both corners outward by `margin`
    pub fn expanded(&self, margin: Vec2) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// False only when the box lies entirely outside the rectangle
    pub fn overlaps_aabb(&self, aabb: &Aabb) -> bool {
        !(aabb.min.x > self.max.x
            || aabb.min.y > self.max.y
            || aabb.max.x < self.min.x
            || aabb.max.y < self.min.y)
    }

    /// The four walls that keep the player on screen
    ///
    /// Each wall sits `WALL_OFFSET` beyond its screen edge and runs the full
    /// length of that edge, overlapping its neighbours at the corners.
    pub fn walls(&self) -> [Wall; 4] {
        let size = self.size();
        let center = (self.min + self.max) / 2.0;
        let reach = 2.0 * (WALL_OFFSET + WALL_THICKNESS / 2.0);
        let vertical = Vec2::new(WALL_THICKNESS, size.y + reach);
        let horizontal = Vec2::new(size.x + reach, WALL_THICKNESS);
        [
            Wall {
                side: WallSide::Left,
                center: Vec2::new(self.min.x - WALL_OFFSET, center.y),
                size: vertical,
            },
            Wall {
                side: WallSide::Right,
                center: Vec2::new(self.max.x + WALL_OFFSET, center.y),
                size: vertical,
            },
            Wall {
                side: WallSide::Bottom,
                center: Vec2::new(center.x, self.min.y - WALL_OFFSET),
                size: horizontal,
            },
            Wall {
                side: WallSide::Top,
                center: Vec2::new(center.x, self.max.y + WALL_OFFSET),
                size: horizontal,
            },
        ]
    }
}

/// Source of the visible world rectangle (camera/viewport)
pub trait Viewport {
    fn world_rect(&self) -> WorldBounds;
}

impl Viewport for WorldBounds {
    fn world_rect(&self) -> WorldBounds {
        *self
    }
}

/// Orthographic camera looking down the z axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthoCamera {
    pub center: Vec2,
    /// Half the visible height in world units
    pub half_height: f32,
    /// Screen width / height
    pub aspect: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            half_height: 5.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Viewport for OrthoCamera {
    fn world_rect(&self) -> WorldBounds {
        let half = Vec2::new(self.half_height * self.aspect, self.half_height);
        WorldBounds::new(self.center - half, self.center + half)
    }
}

/// Which screen edge a wall guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Bottom,
    Top,
}

/// A solid wall just outside the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    pub center: Vec2,
    pub size: Vec2,
}

impl Wall {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half(self.center, self.size / 2.0)
    }

    /// Coordinate of the face pointing at the screen
    pub fn inner_face(&self) -> f32 {
        let aabb = self.aabb();
        match self.side {
            WallSide::Left => aabb.max.x,
            WallSide::Right => aabb.min.x,
            WallSide::Bottom => aabb.max.y,
            WallSide::Top => aabb.min.y,
        }
    }
}

/// Whether an enemy is still inside the cull rectangle
///
/// The enemy's box is `pos ± size`, not its collider, tested against the
/// world expanded by `CULL_MARGIN`. A missing enemy reports `false` so the
/// caller culls it.
pub fn in_world_bounds(bounds: &WorldBounds, enemy: Option<&Enemy>) -> bool {
    let Some(enemy) = enemy else {
        log::error!("bounds check on a missing enemy");
        return false;
    };

    let world = bounds.expanded(CULL_MARGIN);
    let aabb = Aabb::from_center_half(enemy.pos, Vec2::splat(enemy.size));
    world.overlaps_aabb(&aabb)
}
