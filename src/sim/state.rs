//! Round state and the controller that owns every live entity
//!
//! `GameState` decides what happens on collisions, keeps the enemy count
//! constant during play, and records outbound events for the UI/render layer.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{WorldBounds, in_world_bounds};
use super::enemy::Enemy;
use super::player::Player;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active gameplay
    Playing,
    /// Player ran into a bigger enemy
    GameOver,
    /// Score reached the win threshold
    Won,
}

/// Score and phase for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub score: u32,
    pub phase: RoundPhase,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            score: 0,
            phase: RoundPhase::Playing,
        }
    }
}

impl RoundState {
    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.phase == RoundPhase::Won
    }
}

/// Notifications for the UI and render layers, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score text needs updating
    ScoreChanged(u32),
    /// Show the restart button
    GameOver,
    /// Hide the restart button
    HideRestart,
    /// Show the win banner
    Win,
    /// Hide the win banner
    HideWin,
    /// Create a visual for this enemy slot
    EnemySpawned { id: u64 },
    /// Destroy the visual for this enemy slot
    EnemyDespawned { id: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub round: RoundState,
    pub player: Player,
    /// Live enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// World rectangle seen on the most recent frame
    pub bounds: WorldBounds,
    /// Render frames simulated
    pub frames: u64,
    /// Physics ticks simulated
    pub physics_ticks: u64,
    /// Overlap reports waiting for the next frame
    pending_overlaps: Vec<u64>,
    /// Events not yet drained
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next enemy slot ID
    next_id: u64,
}

impl GameState {
    /// Create a game and start the first round
    ///
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(seed: u64, tuning: Tuning, bounds: WorldBounds) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::error!("{e}, falling back to default tuning");
                Tuning::default()
            }
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            tuning,
            round: RoundState::default(),
            enemies: Vec::new(),
            bounds,
            frames: 0,
            physics_ticks: 0,
            pending_overlaps: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.start_round();

        state
    }

    /// Allocate a new enemy slot ID
    pub(crate) fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Look up a live enemy by slot ID
    pub fn enemy(&self, id: u64) -> Option<&Enemy> {
        self.enemies
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.enemies[idx])
    }

    pub fn live_enemies(&self) -> usize {
        self.enemies.len()
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue an overlap reported by the physics layer
    pub fn push_overlap(&mut self, enemy_id: u64) {
        self.pending_overlaps.push(enemy_id);
    }

    pub fn pending_overlaps(&self) -> &[u64] {
        &self.pending_overlaps
    }

    /// Reset score and player, then fill every enemy slot
    fn start_round(&mut self) {
        self.emit(GameEvent::HideWin);
        self.clear_enemies();
        self.reset_player();
        self.pending_overlaps.clear();

        self.round = RoundState::default();
        self.emit(GameEvent::ScoreChanged(0));

        for _ in 0..self.tuning.num_enemies {
            self.spawn_enemy();
        }

        log::info!(
            "Round started: {} enemies, {} points to win",
            self.enemies.len(),
            self.tuning.win_threshold
        );
    }

    /// Start a fresh round after a win or loss
    ///
    /// Returns false (and does nothing) while a round is still in progress.
    pub fn restart(&mut self) -> bool {
        if self.round.phase == RoundPhase::Playing {
            log::warn!("Restart requested mid-round, ignoring");
            return false;
        }

        self.emit(GameEvent::HideRestart);
        self.start_round();
        true
    }

    /// Add a new enemy on a random screen edge
    pub(crate) fn spawn_enemy(&mut self) -> u64 {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, &mut self.rng, &self.bounds, &self.tuning);
        log::debug!(
            "Spawned enemy {} size {:.2} speed {:.2} from {:?}",
            id,
            enemy.size,
            enemy.speed,
            enemy.edge()
        );
        self.enemies.push(enemy);
        self.emit(GameEvent::EnemySpawned { id });
        id
    }

    /// Remove an enemy and immediately spawn its replacement
    ///
    /// Returns false if the slot was not live.
    pub(crate) fn kill_enemy(&mut self, id: u64) -> bool {
        let Ok(idx) = self.enemies.binary_search_by_key(&id, |e| e.id) else {
            return false;
        };
        self.enemies.remove(idx);
        self.emit(GameEvent::EnemyDespawned { id });
        self.spawn_enemy();
        true
    }

    /// Cull every enemy that has left the cull rectangle
    ///
    /// Replacements spawned here are not re-checked until the next frame.
    pub fn cull_out_of_bounds(&mut self) -> usize {
        let ids: Vec<u64> = self.enemies.iter().map(|e| e.id).collect();
        let mut culled = 0;
        for id in ids {
            if !in_world_bounds(&self.bounds, self.enemy(id)) {
                log::debug!("Culling enemy {} (left the screen)", id);
                if self.kill_enemy(id) {
                    culled += 1;
                }
            }
        }
        culled
    }

    /// Apply every queued overlap in arrival order
    pub fn resolve_overlaps(&mut self) {
        let pending = std::mem::take(&mut self.pending_overlaps);
        for id in pending {
            self.resolve_overlap(id);
        }
    }

    /// Player touched an enemy: bigger (or equal) eats, smaller loses
    pub fn resolve_overlap(&mut self, enemy_id: u64) {
        if self.round.phase != RoundPhase::Playing {
            log::debug!("Overlap with enemy {} outside play, dropped", enemy_id);
            return;
        }
        let Some(enemy_size) = self.enemy(enemy_id).map(|e| e.size) else {
            log::debug!("Overlap with stale enemy {}, dropped", enemy_id);
            return;
        };

        if self.player.size < enemy_size {
            log::info!(
                "Player (size {:.2}) hit bigger enemy {} (size {:.2})",
                self.player.size,
                enemy_id,
                enemy_size
            );
            self.lose_round();
        } else {
            self.kill_enemy(enemy_id);
            self.round.score += 1;
            self.emit(GameEvent::ScoreChanged(self.round.score));
            self.player.grow();

            if self.round.score >= self.tuning.win_threshold {
                self.win_round();
            }
        }
    }

    /// Clear the board and show the restart button
    fn lose_round(&mut self) {
        self.round.phase = RoundPhase::GameOver;
        self.end_round();
        log::info!("Game over with {} points", self.round.score);
    }

    /// Show the win banner, then clear the board like a loss
    fn win_round(&mut self) {
        self.round.phase = RoundPhase::Won;
        self.emit(GameEvent::Win);
        self.end_round();
        log::info!("Won with {} points", self.round.score);
    }

    fn end_round(&mut self) {
        self.reset_player();
        self.clear_enemies();
        self.pending_overlaps.clear();
        self.emit(GameEvent::GameOver);
    }

    fn reset_player(&mut self) {
        self.player.reset(self.bounds.min, self.bounds.max);
    }

    fn clear_enemies(&mut self) {
        for enemy in std::mem::take(&mut self.enemies) {
            self.emit(GameEvent::EnemyDespawned { id: enemy.id });
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn screen() -> WorldBounds {
        WorldBounds::new(Vec2::new(-8.0, -4.5), Vec2::new(8.0, 4.5))
    }

    fn new_state(tuning: Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning, screen());
        state.drain_events();
        state
    }

    /// Force an enemy to a known size
    fn set_size(state: &mut GameState, id: u64, size: f32) {
        let idx = state.enemies.iter().position(|e| e.id == id).unwrap();
        state.enemies[idx].size = size;
    }

    #[test]
    fn test_new_round_fills_slots() {
        let mut state = GameState::new(1, Tuning::default(), screen());
        assert_eq!(state.live_enemies(), 10);
        assert_eq!(state.round, RoundState::default());
        assert_eq!(state.player.pos, Vec2::ZERO);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::HideWin);
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 10);
    }

    #[test]
    fn test_enemies_sorted_by_id() {
        let state = new_state(Tuning::default());
        assert!(state.enemies.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_equal_size_is_consumed() {
        let mut state = new_state(Tuning {
            win_threshold: 100,
            ..Default::default()
        });
        let id = state.enemies[0].id;
        set_size(&mut state, id, 1.0);
        assert_eq!(state.player.size, 1.0);

        state.resolve_overlap(id);

        assert_eq!(state.phase(), RoundPhase::Playing);
        assert_eq!(state.score(), 1);
        assert!(state.enemy(id).is_none());
        assert_eq!(state.live_enemies(), 10);
        assert!((state.player.size - 1.1).abs() < 1e-6);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::EnemyDespawned { id });
        assert!(matches!(events[1], GameEvent::EnemySpawned { .. }));
        assert_eq!(events[2], GameEvent::ScoreChanged(1));
    }

    #[test]
    fn test_bigger_enemy_ends_round() {
        let mut state = new_state(Tuning {
            win_threshold: 100,
            ..Default::default()
        });
        // Eat one first so the score is non-zero
        let first = state.enemies[0].id;
        set_size(&mut state, first, 0.1);
        state.resolve_overlap(first);
        state.player.pos = Vec2::new(2.0, 1.0);
        state.player.size = 0.9;

        let id = state.enemies[0].id;
        set_size(&mut state, id, 1.0);
        state.drain_events();
        state.resolve_overlap(id);

        assert_eq!(state.phase(), RoundPhase::GameOver);
        assert!(state.round.is_game_over());
        assert_eq!(state.live_enemies(), 0);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.player.size, state.tuning.original_scale);
        assert_eq!(state.score(), 1);

        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
        assert!(!events.contains(&GameEvent::Win));
    }

    #[test]
    fn test_reaching_threshold_wins() {
        let mut state = new_state(Tuning {
            win_threshold: 1,
            ..Default::default()
        });
        let id = state.enemies[3].id;
        state.resolve_overlap(id);

        assert_eq!(state.score(), 1);
        assert_eq!(state.phase(), RoundPhase::Won);
        assert!(state.round.is_won());
        assert_eq!(state.live_enemies(), 0);
        assert_eq!(state.player.size, state.tuning.original_scale);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Win));
        assert_eq!(events.last(), Some(&GameEvent::GameOver));
    }

    #[test]
    fn test_overlaps_ignored_after_round_ends() {
        let mut state = new_state(Tuning::default());
        let id = state.enemies[0].id;
        state.resolve_overlap(id);
        assert_eq!(state.phase(), RoundPhase::Won);

        state.resolve_overlap(id);
        assert_eq!(state.score(), 1);
        assert_eq!(state.phase(), RoundPhase::Won);
    }

    #[test]
    fn test_stale_overlap_dropped() {
        let mut state = new_state(Tuning {
            win_threshold: 100,
            ..Default::default()
        });
        let id = state.enemies[0].id;
        set_size(&mut state, id, 0.2);
        state.push_overlap(id);
        state.push_overlap(id);
        state.resolve_overlaps();

        assert_eq!(state.score(), 1);
        assert_eq!(state.live_enemies(), 10);
        assert!(state.pending_overlaps().is_empty());
    }

    #[test]
    fn test_restart_after_loss() {
        let mut state = new_state(Tuning {
            win_threshold: 100,
            ..Default::default()
        });
        let first = state.enemies[0].id;
        set_size(&mut state, first, 0.1);
        state.resolve_overlap(first);

        let id = state.enemies[0].id;
        set_size(&mut state, id, 2.0);
        state.resolve_overlap(id);
        assert_eq!(state.phase(), RoundPhase::GameOver);
        state.drain_events();

        assert!(state.restart());
        assert_eq!(state.phase(), RoundPhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.live_enemies(), 10);
        assert_eq!(state.player.size, 1.0);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::HideRestart);
        assert_eq!(events[1], GameEvent::HideWin);
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
    }

    #[test]
    fn test_restart_after_win() {
        let mut state = new_state(Tuning::default());
        let id = state.enemies[0].id;
        state.resolve_overlap(id);
        assert!(state.round.is_won());

        assert!(state.restart());
        assert_eq!(state.round, RoundState::default());
        assert_eq!(state.live_enemies(), state.tuning.num_enemies);
        assert!(state.enemies.iter().all(|e| e.id > id));
    }

    #[test]
    fn test_restart_mid_round_ignored() {
        let mut state = new_state(Tuning::default());
        let ids: Vec<u64> = state.enemies.iter().map(|e| e.id).collect();
        assert!(!state.restart());
        assert_eq!(state.enemies.iter().map(|e| e.id).collect::<Vec<_>>(), ids);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_cull_replaces_in_same_pass() {
        let mut state = new_state(Tuning::default());
        let id = state.enemies[2].id;
        let idx = state.enemies.iter().position(|e| e.id == id).unwrap();
        // Right edge 8 + margin 1.5; box min.x = 20 - size > 9.5
        state.enemies[idx].pos = Vec2::new(20.0, 0.0);

        let culled = state.cull_out_of_bounds();

        assert_eq!(culled, 1);
        assert!(state.enemy(id).is_none());
        assert_eq!(state.live_enemies(), 10);
    }

    #[test]
    fn test_fresh_spawns_survive_cull() {
        let mut state = new_state(Tuning::default());
        assert_eq!(state.cull_out_of_bounds(), 0);
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let tuning = Tuning {
            min_size: 0.6,
            max_size: 0.5,
            ..Default::default()
        };
        let state = GameState::new(1, tuning, screen());
        assert_eq!(state.tuning, Tuning::default());
        assert_eq!(state.live_enemies(), Tuning::default().num_enemies);
        assert_eq!(state.phase(), RoundPhase::Playing);
    }

    #[test]
    fn test_ids_past_u32_range() {
        let mut state = new_state(Tuning::default());
        state.next_id = u64::from(u32::MAX);
        let id = state.enemies[0].id;
        assert!(state.kill_enemy(id));
        assert!(state.kill_enemy(state.enemies[0].id));

        let last = &state.enemies[state.enemies.len() - 1];
        assert_eq!(last.id, u64::from(u32::MAX) + 1);
        assert!(state.enemies.windows(2).all(|w| w[0].id < w[1].id));
        assert!(state.enemy(u64::from(u32::MAX)).is_some());
    }

    #[test]
    fn test_state_snapshot_serializes() {
        let state = new_state(Tuning::default());
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.enemies, state.enemies);
        assert_eq!(restored.round, state.round);
    }
}
