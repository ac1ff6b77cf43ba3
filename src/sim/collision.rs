//! Collision detection and response
//!
//! Everything in the playfield is an axis-aligned box. The runner is tested
//! against every obstacle and every coin each tick; the two classes are
//! independent of each other.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Obstacle, Runner};
use crate::consts::SHIELD_CHANCE;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only touch along an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Outcome of testing the runner against the obstacle set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleContact {
    /// No overlap
    Clear,
    /// Overlap ignored because the shield is up (shield is not consumed)
    Shielded,
    /// Unshielded overlap, the run is over
    Crash { obstacle_id: u32 },
}

/// Test the runner against every active obstacle
pub fn check_obstacles(runner: &Runner, obstacles: &[Obstacle]) -> ObstacleContact {
    let bounds = runner.bounds();
    let Some(hit) = obstacles.iter().find(|o| o.bounds().overlaps(&bounds)) else {
        return ObstacleContact::Clear;
    };

    if runner.shield_active {
        ObstacleContact::Shielded
    } else {
        ObstacleContact::Crash {
            obstacle_id: hit.id,
        }
    }
}

/// Result of picking up a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinPickup {
    pub coin_id: u32,
    /// The shield-chance roll succeeded on this pickup
    pub shield_granted: bool,
}

/// Collect the coin if the runner overlaps it.
///
/// Shield-chance kinds roll for a shield on every pickup. A successful roll
/// resets the timer to the full duration even if a shield is already up.
pub fn try_collect_coin<R: Rng>(runner: &mut Runner, coin: &mut Coin, rng: &mut R) -> Option<CoinPickup> {
    if coin.collected || !coin.bounds().overlaps(&runner.bounds()) {
        return None;
    }

    let shield_granted = runner.traits.shield_chance && rng.random::<f32>() < SHIELD_CHANCE;
    if shield_granted {
        runner.grant_shield();
    }
    coin.collected = true;

    Some(CoinPickup {
        coin_id: coin.id,
        shield_granted,
    })
}

/// Remove obstacles whose trailing edge crossed x=0.
///
/// Each removed obstacle that was never marked passed counts once toward the
/// score. Returns the number of newly passed obstacles.
pub fn retire_obstacles(obstacles: &mut Vec<Obstacle>) -> u64 {
    let mut passed = 0;
    obstacles.retain_mut(|obstacle| {
        if !obstacle.off_screen() {
            return true;
        }
        if !obstacle.passed {
            obstacle.passed = true;
            passed += 1;
        }
        false
    });
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kinds::{CharacterKind, CityTheme, ObstacleKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle_at(id: u32, x: f32, runner: &Runner) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Cone,
            theme: CityTheme::Giza,
            pos: Vec2::new(x, runner.pos.y),
            size: Vec2::new(30.0, 40.0),
            passed: false,
        }
    }

    fn coin_on(runner: &Runner) -> Coin {
        Coin {
            id: 7,
            pos: runner.pos,
            size: 15.0,
            collected: false,
            anim_phase: 0.0,
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0))));
        // Touching edges are not an overlap
        assert!(!a.overlaps(&Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.0, 20.0), Vec2::new(10.0, 10.0))));
    }

    #[test]
    fn test_unshielded_overlap_crashes() {
        let runner = Runner::new(CharacterKind::Default);
        let obstacles = vec![obstacle_at(3, runner.pos.x + 5.0, &runner)];
        assert_eq!(
            check_obstacles(&runner, &obstacles),
            ObstacleContact::Crash { obstacle_id: 3 }
        );
    }

    #[test]
    fn test_shield_ignores_overlap_without_consuming() {
        let mut runner = Runner::new(CharacterKind::Default);
        runner.grant_shield();
        let obstacles = vec![obstacle_at(1, runner.pos.x, &runner)];

        assert_eq!(check_obstacles(&runner, &obstacles), ObstacleContact::Shielded);
        assert!(runner.shield_active);
        assert_eq!(runner.shield_timer, crate::consts::SHIELD_DURATION_TICKS);
    }

    #[test]
    fn test_far_obstacle_is_clear() {
        let runner = Runner::new(CharacterKind::Default);
        let obstacles = vec![obstacle_at(1, 600.0, &runner)];
        assert_eq!(check_obstacles(&runner, &obstacles), ObstacleContact::Clear);
    }

    #[test]
    fn test_coin_pickup_marks_collected_once() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut runner = Runner::new(CharacterKind::Default);
        let mut coin = coin_on(&runner);

        let pickup = try_collect_coin(&mut runner, &mut coin, &mut rng);
        assert_eq!(
            pickup,
            Some(CoinPickup {
                coin_id: 7,
                shield_granted: false
            })
        );
        assert!(coin.collected);
        assert!(try_collect_coin(&mut runner, &mut coin, &mut rng).is_none());
    }

    #[test]
    fn test_shield_chance_probability() {
        let mut rng = Pcg32::seed_from_u64(0xC0FFEE);
        let trials = 20_000;
        let mut granted = 0;

        for _ in 0..trials {
            let mut runner = Runner::new(CharacterKind::Ninja);
            let mut coin = coin_on(&runner);
            let pickup = try_collect_coin(&mut runner, &mut coin, &mut rng).unwrap();
            if pickup.shield_granted {
                assert!(runner.shield_active);
                granted += 1;
            }
        }

        let rate = granted as f64 / trials as f64;
        assert!((rate - 0.1).abs() < 0.02, "shield rate {rate}");
    }

    #[test]
    fn test_shield_roll_refreshes_active_shield() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut runner = Runner::new(CharacterKind::Ninja);
        runner.grant_shield();
        runner.shield_timer = 5;

        // Keep picking up coins until a roll succeeds
        loop {
            let mut coin = coin_on(&runner);
            let pickup = try_collect_coin(&mut runner, &mut coin, &mut rng).unwrap();
            if pickup.shield_granted {
                break;
            }
        }
        assert_eq!(runner.shield_timer, crate::consts::SHIELD_DURATION_TICKS);
    }

    #[test]
    fn test_retire_counts_each_obstacle_once() {
        let runner = Runner::new(CharacterKind::Default);
        let gone = obstacle_at(1, -31.0, &runner);
        let mut already = obstacle_at(2, -40.0, &runner);
        already.passed = true;
        let edge = obstacle_at(3, -30.0, &runner); // trailing edge exactly at 0

        let mut obstacles = vec![gone, already, edge];
        assert_eq!(retire_obstacles(&mut obstacles), 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 3);
        assert_eq!(retire_obstacles(&mut obstacles), 0);
    }
}
