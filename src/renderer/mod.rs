//! Renderer contract
//!
//! The core hands a read-only `Snapshot` of post-update state to whatever
//! draws the frame. Drawing itself is not part of this crate; the renderers
//! here are headless (logging and JSON lines) for the native driver and
//! for tooling.

use std::io::{self, Write};

use serde::Serialize;

use crate::app::Screen;
use crate::economy::RunResult;
use crate::sim::{CharacterKind, CityTheme, Cloud, Coin, Obstacle, Runner};

/// Cursor-driven list screen (menu, city select, pause, game over)
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub items: Vec<&'static str>,
    pub cursor: usize,
}

/// One row of the character shop
#[derive(Debug, Clone, Serialize)]
pub struct ShopEntry {
    pub kind: CharacterKind,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub owned: bool,
    pub equipped: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopView {
    pub entries: Vec<ShopEntry>,
    pub cursor: usize,
    /// Last rejected action, shown until the next shop input
    pub notice: Option<String>,
}

/// Everything visible during a run
#[derive(Debug, Clone, Serialize)]
pub struct RunView<'a> {
    pub runner: &'a Runner,
    pub obstacles: &'a [Obstacle],
    pub coins: &'a [Coin],
    pub clouds: &'a [Cloud],
    pub score: u64,
    pub coins_collected: u64,
    pub time_ticks: u64,
}

/// State of one frame, as seen by a renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub screen: Screen,
    pub theme: CityTheme,
    pub high_score: u64,
    pub total_coins: u64,
    pub equipped: CharacterKind,
    pub menu: Option<MenuView>,
    pub shop: Option<ShopView>,
    /// Present while a run exists (playing, paused, and the screens after it)
    pub run: Option<RunView<'a>>,
    /// Present after a run has been banked
    pub result: Option<RunResult>,
}

/// Produces one frame from a snapshot
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}

/// Logs screen changes and a periodic HUD line
#[derive(Debug)]
pub struct LogRenderer {
    last_screen: Option<Screen>,
    frame: u64,
    hud_interval: u64,
}

impl LogRenderer {
    pub fn new(hud_interval: u64) -> Self {
        Self {
            last_screen: None,
            frame: 0,
            hud_interval: hud_interval.max(1),
        }
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.frame += 1;

        if self.last_screen != Some(snapshot.screen) {
            self.last_screen = Some(snapshot.screen);
            log::info!("[{}] {:?}", snapshot.theme.display_name(), snapshot.screen);
            if let Some(result) = &snapshot.result {
                if matches!(snapshot.screen, Screen::GameOver | Screen::HighScoreCelebration) {
                    log::info!(
                        "Score {} | coins +{} (total {}) | high score {}{}",
                        result.score,
                        result.coins_collected,
                        result.total_coins,
                        snapshot.high_score,
                        if result.new_high_score { " NEW!" } else { "" }
                    );
                }
            }
        }

        if snapshot.screen == Screen::Playing && self.frame % self.hud_interval == 0 {
            if let Some(run) = &snapshot.run {
                log::debug!(
                    "t={} score={} coins={} obstacles={} y={:.1}{}",
                    run.time_ticks,
                    run.score,
                    run.coins_collected,
                    run.obstacles.len(),
                    run.runner.pos.y,
                    if run.runner.shield_active { " SHIELD" } else { "" }
                );
            }
        }

        Ok(())
    }
}

/// Writes one JSON object per frame
#[derive(Debug)]
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")
    }
}
