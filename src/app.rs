//! Top-level screen state machine
//!
//! One `App` owns the economy, the audio manager and at most one run. The
//! driver feeds it one `FrameInput` per frame; `update` handles the intents
//! in order and then advances the run by a single tick if one is playing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::audio::{AudioManager, SoundEffect};
use crate::economy::{EconomyStore, RunResult};
use crate::platform::{Direction, FrameInput, Intent};
use crate::renderer::{MenuView, RunView, ShopEntry, ShopView, Snapshot};
use crate::sim::{CharacterKind, CityTheme, GameState, SimEvent, TickInput, tick};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    Menu,
    ArenaSelect,
    Shop,
    Playing,
    /// Run suspended; only the overlay is live
    Paused,
    /// Shown once after a run that beat the high score
    HighScoreCelebration,
    GameOver,
    /// Terminal
    Quit,
}

const MENU_ITEMS: [&str; 4] = ["Start Game", "City Select", "Character Shop", "Quit Game"];
const PAUSE_ITEMS: [&str; 2] = ["Resume Game", "Quit to Menu"];
const GAME_OVER_ITEMS: [&str; 2] = ["Play Again", "Main Menu"];

/// The game application
#[derive(Debug)]
pub struct App {
    screen: Screen,
    economy: EconomyStore,
    audio: AudioManager,
    /// Seeds each run
    rng: Pcg32,
    theme: CityTheme,
    cursor: usize,
    session: Option<GameState>,
    last_result: Option<RunResult>,
    shop_notice: Option<String>,
    autopilot: bool,
}

impl App {
    pub fn new(economy: EconomyStore, audio: AudioManager, seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            economy,
            audio,
            rng: Pcg32::seed_from_u64(seed),
            theme: CityTheme::default(),
            cursor: 0,
            session: None,
            last_result: None,
            shop_notice: None,
            autopilot: false,
        }
    }

    /// Let the simulation jump on its own (demo/idle mode)
    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn theme(&self) -> CityTheme {
        self.theme
    }

    pub fn economy(&self) -> &EconomyStore {
        &self.economy
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameState> {
        self.session.as_mut()
    }

    pub fn last_result(&self) -> Option<&RunResult> {
        self.last_result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.screen == Screen::Quit
    }

    /// Handle one frame of input, then advance the run by one tick if playing
    pub fn update(&mut self, input: &FrameInput) {
        let mut jump = false;

        for &intent in &input.intents {
            if self.is_finished() {
                return;
            }
            match intent {
                Intent::Quit => self.quit(),
                _ => self.handle_intent(intent, &mut jump),
            }
        }

        if self.screen == Screen::Playing {
            self.step_run(jump);
        }
    }

    /// Flush the economy and stop. An unfinished run is not banked.
    pub fn quit(&mut self) {
        if self.is_finished() {
            return;
        }
        log::info!("Quitting from {:?}", self.screen);
        self.economy.flush();
        self.screen = Screen::Quit;
    }

    fn handle_intent(&mut self, intent: Intent, jump: &mut bool) {
        match self.screen {
            Screen::Menu => match intent {
                Intent::Navigate(dir) => self.move_cursor(dir, MENU_ITEMS.len()),
                Intent::Jump => self.start_run(),
                Intent::Confirm => match self.cursor {
                    0 => self.start_run(),
                    1 => {
                        self.cursor = CityTheme::ALL
                            .iter()
                            .position(|t| *t == self.theme)
                            .unwrap_or(0);
                        self.go_to(Screen::ArenaSelect);
                    }
                    2 => {
                        self.cursor = 0;
                        self.shop_notice = None;
                        self.go_to(Screen::Shop);
                    }
                    _ => self.quit(),
                },
                _ => {}
            },

            Screen::ArenaSelect => match intent {
                Intent::Navigate(dir) => self.move_cursor(dir, CityTheme::ALL.len()),
                Intent::Confirm => {
                    self.theme = CityTheme::ALL[self.cursor];
                    self.start_run();
                }
                Intent::Back => {
                    self.theme = CityTheme::default();
                    self.to_menu();
                }
                _ => {}
            },

            Screen::Shop => match intent {
                Intent::Navigate(dir) => {
                    self.shop_notice = None;
                    self.move_cursor(dir, CharacterKind::ALL.len());
                }
                Intent::Confirm => self.shop_confirm(CharacterKind::ALL[self.cursor]),
                Intent::Back => {
                    self.economy.flush();
                    self.to_menu();
                }
                _ => {}
            },

            Screen::Playing => match intent {
                Intent::Jump => *jump = true,
                Intent::Pause => {
                    if let Some(state) = self.session.as_mut() {
                        state.pause();
                    }
                    self.cursor = 0;
                    self.go_to(Screen::Paused);
                }
                Intent::Back => {
                    log::info!("Run abandoned");
                    self.to_menu();
                }
                _ => {}
            },

            Screen::Paused => match intent {
                Intent::Pause | Intent::Jump => self.resume_run(),
                Intent::Navigate(dir) => self.move_cursor(dir, PAUSE_ITEMS.len()),
                Intent::Confirm if self.cursor == 0 => self.resume_run(),
                Intent::Confirm | Intent::Back => self.to_menu(),
                _ => {}
            },

            Screen::HighScoreCelebration => {
                if matches!(intent, Intent::Confirm | Intent::Jump) {
                    self.cursor = 0;
                    self.go_to(Screen::GameOver);
                }
            }

            Screen::GameOver => match intent {
                Intent::Navigate(dir) => self.move_cursor(dir, GAME_OVER_ITEMS.len()),
                Intent::Jump => self.start_run(),
                Intent::Confirm if self.cursor == 0 => self.start_run(),
                Intent::Confirm | Intent::Back => self.to_menu(),
                _ => {}
            },

            Screen::Quit => {}
        }
    }

    fn go_to(&mut self, screen: Screen) {
        log::debug!("Screen {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }

    fn move_cursor(&mut self, dir: Direction, len: usize) {
        self.cursor = match dir {
            Direction::Down => (self.cursor + 1) % len,
            Direction::Up => (self.cursor + len - 1) % len,
        };
    }

    fn to_menu(&mut self) {
        self.session = None;
        self.cursor = 0;
        self.go_to(Screen::Menu);
    }

    fn start_run(&mut self) {
        let seed = self.rng.random::<u64>();
        let kind = self.economy.equipped();
        log::info!(
            "Starting run as {} in {}, {} (seed {})",
            kind.display_name(),
            self.theme.display_name(),
            self.theme.nation(),
            seed
        );
        self.session = Some(GameState::new(seed, kind, self.theme));
        self.last_result = None;
        self.cursor = 0;
        self.go_to(Screen::Playing);
    }

    fn resume_run(&mut self) {
        if let Some(state) = self.session.as_mut() {
            state.resume();
        }
        self.go_to(Screen::Playing);
    }

    fn shop_confirm(&mut self, kind: CharacterKind) {
        let outcome = if self.economy.owns(kind) {
            self.economy.equip(kind)
        } else {
            let bought = self.economy.purchase(kind);
            if bought.is_ok() {
                self.economy.flush();
            }
            bought.and_then(|()| self.economy.equip(kind))
        };

        self.shop_notice = match outcome {
            Ok(()) => None,
            Err(e) => {
                log::info!("Shop: {}", e);
                Some(e.to_string())
            }
        };
    }

    fn step_run(&mut self, jump: bool) {
        let Some(state) = self.session.as_mut() else {
            self.to_menu();
            return;
        };

        let input = TickInput {
            jump,
            autopilot: self.autopilot,
        };
        let events = tick(state, &input);
        let crashed = state.is_over();

        for event in events {
            match event {
                SimEvent::Jumped => self.audio.play(SoundEffect::Jump),
                SimEvent::CoinCollected { .. } => self.audio.play(SoundEffect::CoinCollect),
                SimEvent::ShieldActivated => self.audio.play(SoundEffect::ShieldUp),
                SimEvent::ObstaclePassed | SimEvent::Crashed { .. } => {}
            }
        }

        if crashed {
            self.finish_run();
        }
    }

    /// Bank the crashed run and move to the post-run screens
    fn finish_run(&mut self) {
        let Some(state) = self.session.as_ref() else {
            return;
        };

        let result = self.economy.record_run(state.score, state.coins_collected);
        self.economy.flush();
        log::info!(
            "Run over: score {}, {} coins (total {}){}",
            result.score,
            result.coins_collected,
            result.total_coins,
            if result.new_high_score { ", new high score" } else { "" }
        );

        self.audio.play(SoundEffect::GameOver);
        self.last_result = Some(result);
        self.cursor = 0;
        if result.new_high_score {
            self.audio.play(SoundEffect::HighScore);
            self.go_to(Screen::HighScoreCelebration);
        } else {
            self.go_to(Screen::GameOver);
        }
    }

    /// Read-only view of the current frame for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        let menu = match self.screen {
            Screen::Menu => Some(MENU_ITEMS.to_vec()),
            Screen::ArenaSelect => Some(CityTheme::ALL.iter().map(|t| t.display_name()).collect()),
            Screen::Paused => Some(PAUSE_ITEMS.to_vec()),
            Screen::GameOver => Some(GAME_OVER_ITEMS.to_vec()),
            _ => None,
        }
        .map(|items| MenuView {
            items,
            cursor: self.cursor,
        });

        let shop = (self.screen == Screen::Shop).then(|| ShopView {
            entries: CharacterKind::ALL
                .iter()
                .map(|&kind| ShopEntry {
                    kind,
                    name: kind.display_name(),
                    description: kind.description(),
                    cost: kind.cost(),
                    owned: self.economy.owns(kind),
                    equipped: self.economy.equipped() == kind,
                })
                .collect(),
            cursor: self.cursor,
            notice: self.shop_notice.clone(),
        });

        let run = self.session.as_ref().map(|state| RunView {
            runner: &state.runner,
            obstacles: &state.obstacles,
            coins: &state.coins,
            clouds: &state.clouds,
            score: state.score,
            coins_collected: state.coins_collected,
            time_ticks: state.time_ticks,
        });

        Snapshot {
            screen: self.screen,
            theme: self.session.as_ref().map_or(self.theme, |s| s.theme),
            high_score: self.economy.high_score(),
            total_coins: self.economy.coins(),
            equipped: self.economy.equipped(),
            menu,
            shop,
            run,
            result: self.last_result,
        }
    }
}
