//! Obstacle motion and collision detection
//!
//! Ship and missiles are centered axis-aligned boxes. Only missiles in the
//! ship's lane are tested.

use glam::Vec2;

use super::lanes::LaneLayout;
use super::state::{Obstacle, Player};
use crate::consts::{DESPAWN_MARGIN, TIME_SCALE};

/// Centered axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Separating-axis test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let distance = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        distance.x < reach.x && distance.y < reach.y
    }
}

/// Distance an obstacle falls in `dt_ms`
#[inline]
pub fn fall_distance(speed: f32, dt_ms: f32) -> f32 {
    speed * dt_ms * TIME_SCALE
}

/// Move every obstacle down by its own speed
pub fn advance_obstacles(obstacles: &mut [Obstacle], dt_ms: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.y += fall_distance(obstacle.speed, dt_ms);
    }
}

/// Drop obstacles that have left the bottom of the screen
///
/// Survivors keep their relative order. Returns how many were removed.
pub fn prune_obstacles(obstacles: &mut Vec<Obstacle>, height: f32) -> usize {
    let limit = height + DESPAWN_MARGIN;
    let before = obstacles.len();
    obstacles.retain(|o| o.y < limit);
    before - obstacles.len()
}

/// Index of the first obstacle hitting the player, if any
pub fn find_collision(
    player: &Player,
    obstacles: &[Obstacle],
    layout: &LaneLayout,
) -> Option<usize> {
    let ship = player.bounds(layout);
    obstacles
        .iter()
        .position(|o| o.lane == player.lane && ship.overlaps(&o.bounds(layout)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn setup() -> (Player, LaneLayout) {
        let tuning = Tuning::default();
        (Player::new(&tuning), LaneLayout::from_tuning(&tuning))
    }

    fn obstacle(lane: usize, y: f32) -> Obstacle {
        Obstacle {
            lane,
            y,
            radius: 25.0,
            speed: 3.2,
        }
    }

    #[test]
    fn test_aabb_strict_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let touching = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        let inside = Aabb::new(Vec2::new(1.9, 1.9), Vec2::new(1.0, 1.0));
        let x_only = Aabb::new(Vec2::new(0.5, 5.0), Vec2::new(1.0, 1.0));

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(!a.overlaps(&x_only));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_advance_sums_per_tick() {
        let mut obstacles = vec![obstacle(0, -40.0), obstacle(3, 100.0)];
        obstacles[1].speed = 4.0;

        for _ in 0..10 {
            advance_obstacles(&mut obstacles, 16.0);
        }

        let expected0 = -40.0 + 10.0 * 3.2 * 16.0 * 0.06;
        let expected1 = 100.0 + 10.0 * 4.0 * 16.0 * 0.06;
        assert!((obstacles[0].y - expected0).abs() < 1e-3);
        assert!((obstacles[1].y - expected1).abs() < 1e-3);
    }

    #[test]
    fn test_prune_keeps_order() {
        let mut obstacles = vec![
            obstacle(0, 100.0),
            obstacle(1, 861.0),
            obstacle(2, 500.0),
            obstacle(3, 860.0),
            obstacle(4, 859.0),
        ];
        let removed = prune_obstacles(&mut obstacles, 800.0);

        assert_eq!(removed, 2);
        let lanes: Vec<usize> = obstacles.iter().map(|o| o.lane).collect();
        assert_eq!(lanes, vec![0, 2, 4]);
    }

    #[test]
    fn test_collision_same_lane_only() {
        let (player, layout) = setup();
        let hit = vec![obstacle(player.lane, player.y)];
        assert_eq!(find_collision(&player, &hit, &layout), Some(0));

        // Same position, different lane
        let miss = vec![obstacle(player.lane + 1, player.y)];
        assert_eq!(find_collision(&player, &miss, &layout), None);
    }

    #[test]
    fn test_collision_vertical_reach() {
        let (player, layout) = setup();
        let o = obstacle(player.lane, 0.0);
        let reach = player.half_extents().y + o.half_extents().y;

        let just_outside = vec![obstacle(player.lane, player.y - reach - 0.5)];
        assert_eq!(find_collision(&player, &just_outside, &layout), None);

        let just_inside = vec![obstacle(player.lane, player.y - reach + 0.5)];
        assert_eq!(find_collision(&player, &just_inside, &layout), Some(0));
    }

    #[test]
    fn test_collision_first_hit_wins() {
        let (player, layout) = setup();
        let obstacles = vec![
            obstacle(player.lane, 0.0),
            obstacle(player.lane, player.y + 5.0),
            obstacle(player.lane, player.y),
        ];
        assert_eq!(find_collision(&player, &obstacles, &layout), Some(1));
    }
}
