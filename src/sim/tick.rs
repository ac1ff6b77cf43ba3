//! Fixed timestep simulation tick
//!
//! Advances one run by exactly one tick: input, then spawning, physics and
//! collisions, then the scroll ramp.

use glam::Vec2;

use super::collision::{ObstacleContact, check_obstacles, retire_obstacles, try_collect_coin};
use super::state::{Cloud, Coin, GameState, Obstacle, RunPhase};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap)
    pub jump: bool,
    /// Idle/demo mode - jump automatically ahead of obstacles
    pub autopilot: bool,
}

/// Something that happened during a tick that the outside world may care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Jumped,
    CoinCollected { coin_id: u32 },
    ShieldActivated,
    ObstaclePassed,
    /// Unshielded obstacle hit, the run is over
    Crashed { obstacle_id: u32 },
}

/// Ticks of lead the autopilot gives itself before an obstacle arrives
const AUTOPILOT_LEAD_TICKS: f32 = 12.0;

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<SimEvent> {
    let mut events = Vec::new();

    // Don't tick if paused or over
    if state.phase != RunPhase::Running {
        return events;
    }

    let wants_jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    if wants_jump && state.runner.jump() {
        events.push(SimEvent::Jumped);
    }

    state.time_ticks += 1;

    spawn_entities(state);

    state.runner.update();

    // Obstacles
    let speed = state.scroll_speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    let passed = retire_obstacles(&mut state.obstacles);
    if passed > 0 {
        state.score += passed;
        events.extend((0..passed).map(|_| SimEvent::ObstaclePassed));
    }
    let crash = match check_obstacles(&state.runner, &state.obstacles) {
        ObstacleContact::Crash { obstacle_id } => Some(obstacle_id),
        ObstacleContact::Clear | ObstacleContact::Shielded => None,
    };

    // Coins, including on a crash tick
    for coin in &mut state.coins {
        coin.advance(speed);
        if coin.off_screen() {
            continue;
        }
        if let Some(pickup) = try_collect_coin(&mut state.runner, coin, &mut state.rng) {
            state.coins_collected += 1;
            events.push(SimEvent::CoinCollected {
                coin_id: pickup.coin_id,
            });
            if pickup.shield_granted {
                log::debug!("Shield activated at tick {}", state.time_ticks);
                events.push(SimEvent::ShieldActivated);
            }
        }
    }
    state.coins.retain(|c| !c.collected && !c.off_screen());

    if let Some(obstacle_id) = crash {
        log::info!(
            "Crashed into obstacle {} at tick {} (score {}, {} coins)",
            obstacle_id,
            state.time_ticks,
            state.score,
            state.coins_collected
        );
        state.phase = RunPhase::Crashed;
        events.push(SimEvent::Crashed { obstacle_id });
        return events;
    }

    // Clouds drift at their own pace
    for cloud in &mut state.clouds {
        cloud.pos.x -= cloud.speed;
    }
    state.clouds.retain(|c| !c.off_screen());

    if state.time_ticks % SCROLL_RAMP_TICKS == 0 {
        state.scroll_speed += SCROLL_SPEED_STEP;
        log::debug!("Scroll speed now {:.2}", state.scroll_speed);
    }

    events
}

fn spawn_entities(state: &mut GameState) {
    let spawns = state.spawner.step(state.score, state.theme, &mut state.rng);

    if let Some(spec) = spawns.obstacle {
        let id = state.next_entity_id();
        log::trace!("Spawned {:?} obstacle {} ({}x{})", spec.kind, id, spec.size.x, spec.size.y);
        state.obstacles.push(Obstacle {
            id,
            kind: spec.kind,
            theme: spec.theme,
            pos: spec.pos,
            size: spec.size,
            passed: false,
        });
    }

    if let Some(y) = spawns.coin_y {
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: Vec2::new(SCREEN_WIDTH, y),
            size: COIN_SIZE,
            collected: false,
            anim_phase: 0.0,
        });
    }

    if let Some(spec) = spawns.cloud {
        let id = state.next_entity_id();
        state.clouds.push(Cloud {
            id,
            pos: Vec2::new(SCREEN_WIDTH, spec.y),
            width: spec.width,
            speed: spec.speed,
        });
    }
}

/// Jump when grounded and the nearest obstacle ahead is about to arrive
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let runner = &state.runner;
    if !runner.on_ground {
        return false;
    }

    let front = runner.pos.x + runner.width;
    state
        .obstacles
        .iter()
        .map(|o| o.pos.x - front)
        .filter(|gap| *gap >= 0.0)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .is_some_and(|gap| gap <= state.scroll_speed * AUTOPILOT_LEAD_TICKS)
}
