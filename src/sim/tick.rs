//! Frame and physics ticks
//!
//! The driver calls `frame` once per rendered frame (variable dt) and
//! `fixed_tick` at the fixed physics rate. Both run on the same thread.

use super::bounds::Viewport;
use super::player::MoveInput;
use super::state::GameState;

/// Input commands for a single physics tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveInput,
    /// Restart/continue button pressed
    pub restart: bool,
}

/// Advance one render frame
///
/// Moves every enemy, culls and backfills the ones that left the screen,
/// then resolves queued overlaps in the order they were reported.
pub fn frame(state: &mut GameState, viewport: &impl Viewport, dt: f32) {
    state.bounds = viewport.world_rect();
    state.frames += 1;

    for enemy in &mut state.enemies {
        enemy.tick(dt);
    }

    let culled = state.cull_out_of_bounds();
    if culled > 0 {
        log::trace!("Frame {}: culled {} enemies", state.frames, culled);
    }

    state.resolve_overlaps();
}

/// Advance one fixed physics step
pub fn fixed_tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.physics_ticks += 1;

    if input.restart {
        state.restart();
    }

    state.player.apply_input(input.movement.vector(), dt);
    if state.tuning.confine_player {
        let walls = state.bounds.walls();
        state.player.confine(&walls);
    }
}
