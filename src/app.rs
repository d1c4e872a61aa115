//! Game controller and frame loop
//!
//! Owns the simulation state, the high-score ledger and the texture
//! handles. Resources are acquired in `init` and released in `shutdown`;
//! the ledger is committed exactly once per run, on the observed
//! Playing -> GameOver edge.

use std::path::PathBuf;

use crate::consts::TARGET_FPS;
use crate::highscores::HighScores;
use crate::platform::{Backend, Key, TextureHandle};
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui;

/// Texture handles owned by the controller. A `None` slot means that
/// asset failed to load and the ui draws a primitive fallback instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assets {
    pub floppy: Option<TextureHandle>,
    pub background: Option<TextureHandle>,
    pub title: Option<TextureHandle>,
}

impl Assets {
    /// True when at least one asset is missing (presentation degraded)
    pub fn degraded(&self) -> bool {
        self.floppy.is_none() || self.background.is_none() || self.title.is_none()
    }
}

/// The game controller: sole mutator of all game entities
pub struct Game {
    tuning: Tuning,
    state: GameState,
    scores: HighScores,
    scores_path: PathBuf,
    assets: Assets,
    last_phase: GamePhase,
}

impl Game {
    pub fn new(tuning: Tuning, scores: HighScores, scores_path: PathBuf, seed: u64) -> Self {
        let mut state = GameState::new(seed, &tuning);
        // The historic best starts at the ledger's top entry
        if let Some(top) = scores.top_score() {
            state.score.all_time_high = top;
        }
        let last_phase = state.phase;
        Self {
            tuning,
            state,
            scores,
            scores_path,
            assets: Assets::default(),
            last_phase,
        }
    }

    /// Acquire presentation resources. A failed texture load degrades
    /// drawing to primitive shapes instead of aborting.
    pub fn init<B: Backend>(&mut self, backend: &mut B) {
        backend.set_target_fps(TARGET_FPS);
        self.assets.floppy = backend.load_texture("floppy.png");
        self.assets.background = backend.load_texture("floppy background.png");
        self.assets.title = backend.load_texture("THE ADVENTURE OF FLOPPY.png");
        if self.assets.degraded() {
            log::warn!("some textures failed to load, falling back to primitive shapes");
        }
    }

    /// One frame: gather input, advance the simulation, commit the score
    /// if this tick ended the run, then draw the post-tick state.
    pub fn frame<B: Backend>(&mut self, backend: &mut B) {
        let input = gather_input(backend);
        tick(&mut self.state, &input, &self.tuning);

        if self.last_phase == GamePhase::Playing && self.state.phase == GamePhase::GameOver {
            self.scores.record(self.state.score.current);
            log::info!(
                "run ended at {} points after {} ticks",
                self.state.score.current,
                self.state.tick_count
            );
        }
        self.last_phase = self.state.phase;

        ui::draw(backend, &self.state, &self.scores, &self.assets);
    }

    /// Release presentation resources and flush the ledger
    pub fn shutdown<B: Backend>(&mut self, backend: &mut B) {
        for texture in [
            self.assets.floppy.take(),
            self.assets.background.take(),
            self.assets.title.take(),
        ]
        .into_iter()
        .flatten()
        {
            backend.unload_texture(texture);
        }
        self.scores.save(&self.scores_path);
    }

    /// Drive frames until the window closes, then shut down
    pub fn run<B: Backend>(&mut self, backend: &mut B) {
        self.init(backend);
        while !backend.window_should_close() {
            self.frame(backend);
        }
        self.shutdown(backend);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }
}

fn gather_input<B: Backend>(backend: &B) -> TickInput {
    TickInput {
        up: backend.is_key_down(Key::W),
        down: backend.is_key_down(Key::S),
        left: backend.is_key_down(Key::A),
        right: backend.is_key_down(Key::D),
        start: backend.is_key_pressed(Key::Enter),
        pause: backend.is_key_pressed(Key::P),
    }
}
