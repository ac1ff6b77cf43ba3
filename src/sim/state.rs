//! Game state and core simulation types
//!
//! Everything a single run owns lives here. Entities are plain records; the
//! per-tick rules that move them live in `tick`, `spawn` and `collision`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::kinds::{CharacterKind, CityTheme, KindTraits, ObstacleKind};
use super::spawn::SpawnScheduler;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Running,
    /// Simulation frozen, timers and physics suspended
    Paused,
    /// Run ended by an unshielded obstacle hit
    Crashed,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub jump_count: u8,
    pub max_jumps: u8,
    pub kind: CharacterKind,
    /// Resolved from `kind` once, so physics never branches on the kind itself
    pub traits: KindTraits,
    pub shield_active: bool,
    pub shield_timer: u32,
    pub double_jump_armed: bool,
    /// Run cycle phase in [0, 4), cosmetic
    pub anim_phase: f32,
}

impl Runner {
    pub fn new(kind: CharacterKind) -> Self {
        Self {
            pos: Vec2::new(RUNNER_X, GROUND_Y - RUNNER_HEIGHT),
            vel_y: 0.0,
            width: RUNNER_WIDTH,
            height: RUNNER_HEIGHT,
            on_ground: true,
            jump_count: 0,
            max_jumps: MAX_JUMPS,
            kind,
            traits: kind.traits(),
            shield_active: false,
            shield_timer: 0,
            double_jump_armed: false,
            anim_phase: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Y coordinate the runner's top edge rests at when grounded
    fn ground_rest_y(&self) -> f32 {
        GROUND_Y - self.height
    }

    /// Attempt a jump. Returns true if an impulse was applied.
    pub fn jump(&mut self) -> bool {
        if self.traits.double_jump && !self.on_ground && self.double_jump_armed {
            // Bonus air jump, does not touch the charge counter
            self.vel_y = JUMP_IMPULSE * self.traits.air_jump_scale;
            self.double_jump_armed = false;
            return true;
        }

        if self.jump_count < self.max_jumps {
            self.vel_y = JUMP_IMPULSE * self.traits.jump_scale;
            self.on_ground = false;
            self.jump_count += 1;
            return true;
        }

        false
    }

    /// Advance physics and timers by one tick
    pub fn update(&mut self) {
        self.vel_y += GRAVITY * self.traits.gravity_scale;
        self.pos.y += self.vel_y;

        let rest_y = self.ground_rest_y();
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vel_y = 0.0;
            self.on_ground = true;
            self.jump_count = 0;
            if self.traits.double_jump {
                self.double_jump_armed = true;
            }
        }

        if self.shield_active {
            self.shield_timer = self.shield_timer.saturating_sub(1);
            if self.shield_timer == 0 {
                self.shield_active = false;
            }
        }

        if self.on_ground {
            self.anim_phase = (self.anim_phase + RUN_ANIMATION_SPEED) % RUN_ANIMATION_FRAMES;
        }
    }

    /// Turn the shield on for the full duration. An active shield is
    /// refreshed to the full duration rather than extended.
    pub fn grant_shield(&mut self) {
        self.shield_active = true;
        self.shield_timer = SHIELD_DURATION_TICKS;
    }
}

/// An obstacle scrolling toward the runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub theme: CityTheme,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once when the obstacle scrolls off uncollided; never cleared
    pub passed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A coin pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Set once on pickup; never cleared
    pub collected: bool,
    /// Spin phase in [0, 8), cosmetic
    pub anim_phase: f32,
}

impl Coin {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size < 0.0
    }

    pub fn advance(&mut self, scroll_speed: f32) {
        self.pos.x -= scroll_speed;
        self.anim_phase += COIN_ANIMATION_SPEED;
        if self.anim_phase >= COIN_ANIMATION_FRAMES {
            self.anim_phase = 0.0;
        }
    }
}

/// Background cloud (decorative only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    /// Own drift speed, independent of the scroll ramp
    pub speed: f32,
}

impl Cloud {
    pub fn off_screen(&self) -> bool {
        self.pos.x + self.width < 0.0
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub theme: CityTheme,
    pub phase: RunPhase,
    pub runner: Runner,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub clouds: Vec<Cloud>,
    pub spawner: SpawnScheduler,
    /// Obstacles cleared this run
    pub score: u64,
    /// Coins picked up this run (banked only when the run ends by crash)
    pub coins_collected: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current scroll speed for obstacles and coins
    pub scroll_speed: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, kind: CharacterKind, theme: CityTheme) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = SpawnScheduler::new(&mut rng);

        Self {
            seed,
            rng,
            theme,
            phase: RunPhase::Running,
            runner: Runner::new(kind),
            obstacles: Vec::new(),
            coins: Vec::new(),
            clouds: Vec::new(),
            spawner,
            score: 0,
            coins_collected: 0,
            time_ticks: 0,
            scroll_speed: BASE_SCROLL_SPEED,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Crashed
    }

    pub fn pause(&mut self) {
        if self.phase == RunPhase::Running {
            self.phase = RunPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            self.phase = RunPhase::Running;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded(kind: CharacterKind) -> Runner {
        let mut runner = Runner::new(kind);
        runner.update(); // settle on the ground
        runner
    }

    #[test]
    fn test_two_charges_then_no_op() {
        let mut runner = grounded(CharacterKind::Default);
        assert!(runner.on_ground);

        assert!(runner.jump());
        runner.update();
        assert!(!runner.on_ground);
        assert!(runner.jump());
        assert_eq!(runner.jump_count, 2);

        let vel = runner.vel_y;
        runner.update();
        let vel_after_gravity = runner.vel_y;
        assert!((vel_after_gravity - (vel + GRAVITY)).abs() < 1e-5);

        assert!(!runner.jump());
        assert_eq!(runner.jump_count, 2);
        assert_eq!(runner.vel_y, vel_after_gravity);
    }

    #[test]
    fn test_landing_resets_charges() {
        let mut runner = grounded(CharacterKind::Default);
        runner.jump();
        runner.jump();
        for _ in 0..200 {
            runner.update();
        }
        assert!(runner.on_ground);
        assert_eq!(runner.jump_count, 0);
        assert_eq!(runner.vel_y, 0.0);
        assert_eq!(runner.pos.y, GROUND_Y - RUNNER_HEIGHT);
    }

    #[test]
    fn test_low_gravity_jump_is_dampened() {
        let mut runner = grounded(CharacterKind::Alien);
        assert!(runner.jump());
        assert!((runner.vel_y - JUMP_IMPULSE * 0.7).abs() < 1e-5);
        assert_eq!(runner.jump_count, 1);

        runner.update();
        assert!((runner.vel_y - (JUMP_IMPULSE * 0.7 + GRAVITY * 0.3)).abs() < 1e-5);

        assert!(runner.jump());
        assert!(!runner.jump());
    }

    #[test]
    fn test_double_jump_is_independent_of_charges() {
        let mut runner = grounded(CharacterKind::Superhero);
        assert!(runner.double_jump_armed);

        // Ground jump uses a charge
        assert!(runner.jump());
        assert_eq!(runner.jump_count, 1);
        runner.update();

        // Airborne and armed: amplified bonus jump
        assert!(runner.jump());
        assert!((runner.vel_y - JUMP_IMPULSE * 1.2).abs() < 1e-5);
        assert!(!runner.double_jump_armed);
        assert_eq!(runner.jump_count, 1);

        // Then the remaining charge, then nothing
        assert!(runner.jump());
        assert_eq!(runner.jump_count, 2);
        assert!(!runner.jump());
    }

    #[test]
    fn test_shield_timer_counts_down() {
        let mut runner = grounded(CharacterKind::Ninja);
        runner.grant_shield();
        for _ in 0..SHIELD_DURATION_TICKS - 1 {
            runner.update();
            assert!(runner.shield_active);
            assert!(runner.shield_timer > 0);
        }
        runner.update();
        assert!(!runner.shield_active);
        assert_eq!(runner.shield_timer, 0);
    }

    #[test]
    fn test_animation_only_advances_on_ground() {
        let mut runner = grounded(CharacterKind::Default);
        let phase = runner.anim_phase;
        runner.jump();
        runner.update();
        assert_eq!(runner.anim_phase, phase);
    }
}
