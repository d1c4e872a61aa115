//! Floppy entry point
//!
//! The windowed frontend is an external collaborator that plugs in
//! through `platform::Backend`; this binary wires the core to the
//! headless backend and plays a short scripted session so the whole
//! loop - tuning, ledger, simulation, drawing - runs end to end.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use floppy::app::Game;
use floppy::highscores::HighScores;
use floppy::platform::{HeadlessBackend, Key};
use floppy::tuning::Tuning;

/// Ten seconds of simulated frames at the target rate
const DEMO_FRAMES: u64 = 600;

fn main() {
    env_logger::init();
    log::info!("Floppy starting...");
    log::info!("no windowed backend is bundled; a frontend implements platform::Backend");

    let tuning = Tuning::load_or_default(Path::new("tuning.json"));
    let scores_path = PathBuf::from("highscores.txt");
    let scores = HighScores::load(&scores_path);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    log::info!("session seed: {seed}");

    let mut backend = HeadlessBackend::new(DEMO_FRAMES);
    backend.tap(0, Key::Enter);

    let mut game = Game::new(tuning, scores, scores_path, seed);
    game.run(&mut backend);

    let state = game.state();
    log::info!(
        "demo over after {} frames: phase {:?}, score {}, best {}",
        backend.frames_finished,
        state.phase,
        state.score.current,
        state.score.all_time_high,
    );
}
