//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by enemy slot ID)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod state;
pub mod tick;

pub use bounds::{Aabb, OrthoCamera, Viewport, Wall, WallSide, WorldBounds, in_world_bounds};
pub use collision::{detect_overlaps, player_enemy_overlap};
pub use enemy::{Enemy, SpawnEdge};
pub use player::{MoveInput, Player};
pub use state::{GameEvent, GameState, RoundPhase, RoundState};
pub use tick::{TickInput, fixed_tick, frame};
