//! Screen composition
//!
//! A pure projection of the current state into backend draw calls;
//! nothing in this module mutates game state.

use crate::app::Assets;
use crate::consts::*;
use crate::highscores::HighScores;
use crate::platform::{Backend, Color};
use crate::sim::{GamePhase, GameState};

const TUBE_COLOR: Color = Color::GREEN;

/// Draw one frame of the current phase
pub fn draw<B: Backend>(backend: &mut B, state: &GameState, scores: &HighScores, assets: &Assets) {
    backend.begin_frame();
    backend.clear_background(Color::BACKDROP);

    match state.phase {
        GamePhase::Title => draw_title(backend, assets),
        GamePhase::Playing | GamePhase::Paused => {
            draw_background(backend, assets);
            draw_playfield(backend, state, assets);
            if state.phase == GamePhase::Paused {
                draw_centered(backend, "GAME PAUSED", SCREEN_HEIGHT / 2.0 - 40.0, 40, Color::BLACK);
            }
            draw_score(backend, state);
        }
        GamePhase::GameOver => {
            draw_background(backend, assets);
            draw_game_over(backend, state, scores);
            draw_score(backend, state);
        }
    }

    backend.end_frame();
}

fn draw_title<B: Backend>(backend: &mut B, assets: &Assets) {
    let prompt_y = match assets.title {
        Some(title) => {
            backend.draw_texture(
                title,
                SCREEN_WIDTH / 2.0 - title.width as f32 / 2.0,
                SCREEN_HEIGHT / 4.0 - title.height as f32 / 4.0,
                Color::WHITE,
            );
            SCREEN_HEIGHT / 2.0 + title.height as f32 / 2.0
        }
        None => {
            draw_centered(
                backend,
                "THE ADVENTURE OF FLOPPY",
                SCREEN_HEIGHT / 4.0,
                40,
                Color::GRAY,
            );
            SCREEN_HEIGHT / 2.0 + 40.0
        }
    };
    draw_centered(backend, "PRESS [ENTER] TO START", prompt_y, 20, Color::GRAY);
}

fn draw_background<B: Backend>(backend: &mut B, assets: &Assets) {
    match assets.background {
        Some(background) => backend.draw_texture(background, 0.0, 0.0, Color::WHITE),
        None => backend.draw_rectangle(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, Color::SKYBLUE),
    }
}

fn draw_playfield<B: Backend>(backend: &mut B, state: &GameState, assets: &Assets) {
    for pair in &state.field.pairs {
        for rect in [pair.top_rect(), pair.bottom_rect()] {
            backend.draw_rectangle(rect.x, rect.y, rect.width, rect.height, TUBE_COLOR);
        }
    }

    if state.score_flash > 0 {
        backend.draw_rectangle(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, Color::WHITE);
    }

    let player = &state.player;
    match assets.floppy {
        Some(floppy) => backend.draw_texture(
            floppy,
            player.pos.x - player.radius,
            player.pos.y - player.radius,
            Color::WHITE,
        ),
        None => backend.draw_circle(player.pos.x, player.pos.y, player.radius, Color::GOLD),
    }
}

fn draw_score<B: Backend>(backend: &mut B, state: &GameState) {
    backend.draw_text(
        &format!("{:04}", state.score.current),
        10.0,
        10.0,
        30,
        Color::WHITE,
    );
}

fn draw_game_over<B: Backend>(backend: &mut B, state: &GameState, scores: &HighScores) {
    let top = SCREEN_HEIGHT / 2.0 - 100.0;
    draw_centered(backend, "Your Highest Score:", top, 20, Color::BLACK);
    draw_centered(
        backend,
        &state.score.all_time_high.to_string(),
        top + 30.0,
        20,
        Color::BLACK,
    );
    draw_centered(backend, "Your Score:", top + 70.0, 20, Color::BLACK);
    draw_centered(
        backend,
        &state.score.current.to_string(),
        top + 100.0,
        20,
        Color::BLACK,
    );

    if !scores.is_empty() {
        draw_centered(backend, "BEST RUNS", top + 125.0, 16, Color::GRAY);
        for (rank, score) in scores.entries().iter().enumerate() {
            draw_centered(
                backend,
                &format!("{}. {score}", rank + 1),
                top + 145.0 + 18.0 * rank as f32,
                16,
                Color::GRAY,
            );
        }
    }

    draw_centered(
        backend,
        "PRESS [ENTER] TO PLAY AGAIN",
        SCREEN_HEIGHT / 2.0 + 150.0,
        20,
        Color::GRAY,
    );
}

/// Draw text horizontally centered on the screen
fn draw_centered<B: Backend>(backend: &mut B, text: &str, y: f32, size: i32, color: Color) {
    let width = backend.measure_text(text, size) as f32;
    backend.draw_text(text, SCREEN_WIDTH / 2.0 - width / 2.0, y, size, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessBackend;
    use crate::tuning::Tuning;

    fn fixture() -> (GameState, HighScores, Assets, Tuning) {
        let tuning = Tuning::default();
        let state = GameState::new(3, &tuning);
        (state, HighScores::new(), Assets::default(), tuning)
    }

    #[test]
    fn test_playfield_draws_two_rects_per_pair() {
        let (mut state, scores, assets, tuning) = fixture();
        state.phase = GamePhase::Playing;
        let mut backend = HeadlessBackend::new(1);

        draw(&mut backend, &state, &scores, &assets);

        // Two tube rects per pair plus the background fallback rect
        let expected = 2 * tuning.tube_count as u64 + 1;
        assert_eq!(backend.rectangles_drawn, expected);
        // No textures loaded: the player falls back to a circle
        assert_eq!(backend.circles_drawn, 1);
        assert_eq!(backend.frames_finished, 1);
    }

    #[test]
    fn test_score_flash_adds_an_overlay_rect() {
        let (mut state, scores, assets, _) = fixture();
        state.phase = GamePhase::Playing;

        let mut backend = HeadlessBackend::new(1);
        draw(&mut backend, &state, &scores, &assets);
        let without_flash = backend.rectangles_drawn;

        state.score_flash = 1;
        let mut backend = HeadlessBackend::new(1);
        draw(&mut backend, &state, &scores, &assets);
        assert_eq!(backend.rectangles_drawn, without_flash + 1);
    }

    #[test]
    fn test_title_screen_draws_no_tubes() {
        let (state, scores, assets, _) = fixture();
        let mut backend = HeadlessBackend::new(1);

        draw(&mut backend, &state, &scores, &assets);
        assert_eq!(backend.rectangles_drawn, 0);
        assert!(backend.texts_drawn >= 2);
    }

    #[test]
    fn test_game_over_lists_ledger_entries() {
        let (mut state, mut scores, assets, _) = fixture();
        state.phase = GamePhase::GameOver;
        scores.record(3000);
        scores.record(1800);

        let mut backend = HeadlessBackend::new(1);
        draw(&mut backend, &state, &scores, &assets);

        // Four panel lines + header + two entries + prompt + the HUD score
        assert_eq!(backend.texts_drawn, 9);
    }

    #[test]
    fn test_draw_does_not_mutate_state() {
        let (mut state, scores, assets, _) = fixture();
        state.phase = GamePhase::Playing;
        let before = format!("{state:?}");

        let mut backend = HeadlessBackend::new(1);
        draw(&mut backend, &state, &scores, &assets);
        assert_eq!(before, format!("{state:?}"));
    }
}
