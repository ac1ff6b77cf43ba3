//! Deterministic simulation module
//!
//! All gameplay logic for a single run lives here:
//! - Fixed timestep only (one call to `tick` is one tick)
//! - Seeded RNG only
//! - No rendering, audio or persistence dependencies

pub mod collision;
pub mod kinds;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ObstacleContact, check_obstacles, retire_obstacles, try_collect_coin};
pub use kinds::{CharacterKind, CityTheme, KindTraits, ObstacleKind};
pub use spawn::{SpawnScheduler, obstacle_interval_bounds};
pub use state::{Cloud, Coin, GameState, Obstacle, RunPhase, Runner};
pub use tick::{SimEvent, TickInput, autopilot_wants_jump, tick};
