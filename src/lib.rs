//! Shape Eater - grow by eating smaller shapes, avoid bigger ones
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemies, player, bounds, round state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed physics timestep (50 Hz)
    pub const PHYSICS_DT: f32 = 1.0 / 50.0;
    /// Maximum physics substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Extra room around the screen before an enemy is culled
    pub const CULL_MARGIN: Vec2 = Vec2::new(3.0 / 2.0, 6.0 / 2.0);

    /// Distance from the screen edge to each wall's center
    pub const WALL_OFFSET: f32 = 1.0;
    /// Wall thickness
    pub const WALL_THICKNESS: f32 = 1.0;
}
