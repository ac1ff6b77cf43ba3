//! City Runner entry point
//!
//! Headless native driver: loads settings and the save record, then runs the
//! app on a fixed-step clock with a scripted pilot standing in for a player.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::thread;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use city_runner::audio::AudioManager;
    use city_runner::economy::EconomyStore;
    use city_runner::platform::{FixedClock, FrameInput, Intent};
    use city_runner::renderer::{LogRenderer, Renderer};
    use city_runner::settings::{DEFAULT_SETTINGS_PATH, Settings};
    use city_runner::{App, Screen};

    /// Presses the buttons a player would between runs
    struct DemoPilot {
        runs_wanted: u32,
        runs_finished: u32,
        last_screen: Screen,
    }

    impl DemoPilot {
        fn new(runs_wanted: u32) -> Self {
            Self {
                runs_wanted: runs_wanted.max(1),
                runs_finished: 0,
                last_screen: Screen::Menu,
            }
        }

        fn input_for(&mut self, screen: Screen) -> FrameInput {
            if screen != self.last_screen {
                if matches!(screen, Screen::GameOver | Screen::HighScoreCelebration)
                    && self.last_screen == Screen::Playing
                {
                    self.runs_finished += 1;
                    log::info!("Demo run {}/{} finished", self.runs_finished, self.runs_wanted);
                }
                self.last_screen = screen;
            }

            match screen {
                Screen::Menu => Intent::Confirm.into(),
                Screen::HighScoreCelebration => Intent::Confirm.into(),
                Screen::GameOver if self.runs_finished < self.runs_wanted => Intent::Jump.into(),
                Screen::GameOver => Intent::Quit.into(),
                _ => FrameInput::new(),
            }
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("City Runner (native) starting...");

        let settings_path = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        let settings = Settings::load(&settings_path);
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Seed: {}", seed);

        let economy = EconomyStore::load(&settings.save_path);
        let audio = AudioManager::from_settings(&settings);
        let mut app = App::new(economy, audio, seed).with_autopilot(settings.autopilot);

        let mut pilot = DemoPilot::new(settings.demo_runs);
        let mut renderer = LogRenderer::default();
        let mut clock = FixedClock::new(settings.tick_rate_hz);
        let mut frames: u64 = 0;
        let mut last_time = Instant::now();

        while !app.is_finished() {
            let now = Instant::now();
            let due = clock.advance(now - last_time);
            last_time = now;

            for _ in 0..due {
                let input = pilot.input_for(app.screen());
                app.update(&input);
                frames += 1;

                if let Err(e) = renderer.render(&app.snapshot()) {
                    log::warn!("Render failed: {}", e);
                }

                if settings.max_frames.is_some_and(|max| frames >= max) {
                    log::info!("Frame limit reached");
                    app.quit();
                }
                if app.is_finished() {
                    break;
                }
            }

            thread::sleep(clock.until_next());
        }

        let economy = app.economy();
        log::info!(
            "Exiting after {} frames: high score {}, {} coins",
            frames,
            economy.high_score(),
            economy.coins()
        );
        if let Some(path) = economy.path() {
            log::info!("Economy saved to {}", path.display());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build only uses the library
}
