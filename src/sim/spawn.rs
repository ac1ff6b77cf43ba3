//! Procedural spawning of obstacles, coins and clouds
//!
//! Obstacle spacing narrows with score; this is the whole difficulty curve.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kinds::{CityTheme, ObstacleKind};
use crate::consts::*;

/// Obstacle interval bounds (inclusive, in ticks) for a given score
pub fn obstacle_interval_bounds(score: u64) -> (u32, u32) {
    let min = 90u64.saturating_sub(score / 5).max(30);
    let max = 180u64.saturating_sub(score / 2).max(60);
    (min as u32, max as u32)
}

/// What a single scheduler step produced. Entities still need ids.
#[derive(Debug, Default)]
pub struct Spawns {
    pub obstacle: Option<ObstacleSpec>,
    pub coin_y: Option<f32>,
    pub cloud: Option<CloudSpec>,
}

/// Geometry and kind of an obstacle about to enter from the right edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub theme: CityTheme,
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudSpec {
    pub y: f32,
    pub width: f32,
    pub speed: f32,
}

/// Timers driving entity creation during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    obstacle_timer: u32,
    next_obstacle_ticks: u32,
    coin_timer: u32,
    cloud_timer: u32,
}

impl SpawnScheduler {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            obstacle_timer: 0,
            next_obstacle_ticks: rng.random_range(FIRST_OBSTACLE_MIN_TICKS..=FIRST_OBSTACLE_MAX_TICKS),
            coin_timer: 0,
            cloud_timer: 0,
        }
    }

    /// Ticks the obstacle timer must reach before the next obstacle
    pub fn next_obstacle_ticks(&self) -> u32 {
        self.next_obstacle_ticks
    }

    /// Advance all timers by one tick
    pub fn step<R: Rng>(&mut self, score: u64, theme: CityTheme, rng: &mut R) -> Spawns {
        let mut spawns = Spawns::default();

        self.obstacle_timer += 1;
        if self.obstacle_timer >= self.next_obstacle_ticks {
            spawns.obstacle = Some(roll_obstacle(theme, rng));
            self.obstacle_timer = 0;
            let (min, max) = obstacle_interval_bounds(score);
            self.next_obstacle_ticks = rng.random_range(min..=max);
            log::trace!("next obstacle in {} ticks (score {})", self.next_obstacle_ticks, score);
        }

        self.coin_timer += 1;
        if self.coin_timer >= COIN_MIN_GAP_TICKS && rng.random::<f32>() < COIN_SPAWN_CHANCE {
            let max_y = GROUND_Y as i32 - 30;
            spawns.coin_y = Some(rng.random_range(COIN_MIN_Y..=max_y) as f32);
            self.coin_timer = 0;
        }

        self.cloud_timer += 1;
        if self.cloud_timer >= CLOUD_INTERVAL_TICKS {
            spawns.cloud = Some(CloudSpec {
                y: rng.random_range(CLOUD_MIN_Y..=CLOUD_MAX_Y) as f32,
                width: rng.random_range(CLOUD_MIN_WIDTH..=CLOUD_MAX_WIDTH) as f32,
                speed: rng.random_range(CLOUD_MIN_SPEED..CLOUD_MAX_SPEED),
            });
            self.cloud_timer = 0;
        }

        spawns
    }
}

fn roll_obstacle<R: Rng>(theme: CityTheme, rng: &mut R) -> ObstacleSpec {
    let width = rng.random_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH) as f32;
    let height = rng.random_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT) as f32;
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];

    let mut y = GROUND_Y - height;
    if rng.random::<f32>() < OBSTACLE_ELEVATION_CHANCE && height > OBSTACLE_ELEVATION_MIN_HEIGHT {
        y -= rng.random_range(OBSTACLE_MIN_LIFT..=OBSTACLE_MAX_LIFT) as f32;
    }

    ObstacleSpec {
        kind,
        theme,
        pos: Vec2::new(SCREEN_WIDTH, y),
        size: Vec2::new(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_interval_bounds_table() {
        assert_eq!(obstacle_interval_bounds(0), (90, 180));
        assert_eq!(obstacle_interval_bounds(250), (40, 60));
        assert_eq!(obstacle_interval_bounds(1000), (30, 60));
        // Integer division: 4/5 == 0, 1/2 == 0
        assert_eq!(obstacle_interval_bounds(4), (90, 178));
        assert_eq!(obstacle_interval_bounds(1), (90, 180));
    }

    #[test]
    fn test_first_obstacle_interval() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let scheduler = SpawnScheduler::new(&mut rng);
            assert!((60..=180).contains(&scheduler.next_obstacle_ticks()));
        }
    }

    #[test]
    fn test_obstacle_spawns_when_timer_reaches_interval() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut scheduler = SpawnScheduler::new(&mut rng);
        let due = scheduler.next_obstacle_ticks();

        for _ in 1..due {
            assert!(scheduler.step(0, CityTheme::Rome, &mut rng).obstacle.is_none());
        }
        let spec = scheduler.step(0, CityTheme::Rome, &mut rng).obstacle.unwrap();
        assert_eq!(spec.theme, CityTheme::Rome);
        assert_eq!(spec.pos.x, SCREEN_WIDTH);
        assert!((25.0..=45.0).contains(&spec.size.x));
        assert!((35.0..=55.0).contains(&spec.size.y));
        assert!((90..=180).contains(&scheduler.next_obstacle_ticks()));
    }

    #[test]
    fn test_next_interval_uses_current_score() {
        let mut rng = Pcg32::seed_from_u64(23);
        let mut scheduler = SpawnScheduler::new(&mut rng);

        let mut intervals = Vec::new();
        for _ in 0..3000 {
            if scheduler.step(250, CityTheme::London, &mut rng).obstacle.is_some() {
                intervals.push(scheduler.next_obstacle_ticks());
            }
        }

        assert!(intervals.len() > 20);
        assert!(intervals.iter().all(|t| (40..=60).contains(t)));

        // Gaps between spawns follow the narrowed interval
        let mut since = 0;
        let mut gaps = Vec::new();
        for _ in 0..1000 {
            since += 1;
            if scheduler.step(1000, CityTheme::London, &mut rng).obstacle.is_some() {
                gaps.push(since);
                since = 0;
                assert!((30..=60).contains(&scheduler.next_obstacle_ticks()));
            }
        }
        assert!(gaps.iter().skip(1).all(|g| (30..=60).contains(g)));
    }

    #[test]
    fn test_cloud_every_hundred_ticks() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut scheduler = SpawnScheduler::new(&mut rng);
        let cloud_ticks: Vec<u32> = (1..=300)
            .filter(|_| scheduler.step(0, CityTheme::Giza, &mut rng).cloud.is_some())
            .collect();
        assert_eq!(cloud_ticks, vec![100, 200, 300]);
    }

    #[test]
    fn test_coins_respect_minimum_gap() {
        let mut rng = Pcg32::seed_from_u64(17);
        let mut scheduler = SpawnScheduler::new(&mut rng);
        let mut last = 0u32;
        let mut spawned = 0;
        for tick in 1..=5000u32 {
            if let Some(y) = scheduler.step(0, CityTheme::Giza, &mut rng).coin_y {
                assert!(tick - last >= COIN_MIN_GAP_TICKS);
                assert!(y >= COIN_MIN_Y as f32 && y <= GROUND_Y - 30.0);
                last = tick;
                spawned += 1;
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn test_elevated_obstacles_are_tall() {
        let mut rng = Pcg32::seed_from_u64(23);
        for _ in 0..2000 {
            let spec = roll_obstacle(CityTheme::Paris, &mut rng);
            let lift = GROUND_Y - spec.size.y - spec.pos.y;
            if lift > 0.0 {
                assert!(spec.size.y > OBSTACLE_ELEVATION_MIN_HEIGHT);
                assert!((10.0..=20.0).contains(&lift));
            } else {
                assert_eq!(lift, 0.0);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_interval_bounds_are_ordered_and_floored(score in 0u64..100_000) {
            let (min, max) = obstacle_interval_bounds(score);
            prop_assert!(min >= 30 && min <= 90);
            prop_assert!(max >= 60 && max <= 180);
            prop_assert!(min <= max);
        }

        #[test]
        fn prop_bounds_never_widen_with_score(score in 0u64..10_000) {
            let (min_a, max_a) = obstacle_interval_bounds(score);
            let (min_b, max_b) = obstacle_interval_bounds(score + 1);
            prop_assert!(min_b <= min_a && max_b <= max_a);
        }
    }
}
