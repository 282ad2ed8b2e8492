//! Player/enemy overlap detection
//!
//! Stands in for an engine's trigger system. The round logic never looks at
//! geometry itself; it only consumes the overlap reports produced here.

use glam::Vec2;

use super::bounds::Aabb;
use super::enemy::Enemy;
use super::player::Player;

/// Enemy collider box: unscaled collider size times the enemy's scale
#[inline]
pub fn enemy_collider(enemy: &Enemy, collider_size: Vec2) -> Aabb {
    Aabb::from_center_half(enemy.pos, collider_size / 2.0 * enemy.size)
}

/// Check whether the player's box touches an enemy's collider
pub fn player_enemy_overlap(player: &Player, enemy: &Enemy, collider_size: Vec2) -> bool {
    player.aabb().intersects(&enemy_collider(enemy, collider_size))
}

/// IDs of every enemy currently touching the player, in slot order
pub fn detect_overlaps(player: &Player, enemies: &[Enemy], collider_size: Vec2) -> Vec<u64> {
    enemies
        .iter()
        .filter(|e| player_enemy_overlap(player, e, collider_size))
        .map(|e| e.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn enemy(id: u64, pos: Vec2, size: f32) -> Enemy {
        Enemy {
            id,
            pos,
            size,
            speed: 1.0,
            dir: Vec2::X,
        }
    }

    #[test]
    fn test_touching_enemy_overlaps() {
        let player = Player::new(&Tuning::default());
        // Player half 0.5, enemy half 0.2
        assert!(player_enemy_overlap(&player, &enemy(1, Vec2::new(0.6, 0.0), 0.4), Vec2::ONE));
        assert!(!player_enemy_overlap(&player, &enemy(1, Vec2::new(0.8, 0.0), 0.4), Vec2::ONE));
    }

    #[test]
    fn test_collider_size_scales_box() {
        let player = Player::new(&Tuning::default());
        let far = enemy(1, Vec2::new(0.8, 0.0), 0.4);
        assert!(player_enemy_overlap(&player, &far, Vec2::new(2.0, 1.0)));
    }

    #[test]
    fn test_detect_overlaps_in_slot_order() {
        let player = Player::new(&Tuning::default());
        let enemies = vec![
            enemy(2, Vec2::new(0.3, 0.3), 0.2),
            enemy(5, Vec2::new(5.0, 0.0), 0.2),
            enemy(9, Vec2::new(-0.4, 0.0), 0.2),
        ];
        assert_eq!(detect_overlaps(&player, &enemies, Vec2::ONE), vec![2, 9]);
    }
}
