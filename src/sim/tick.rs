//! Per-frame simulation tick
//!
//! Advances the whole game by one frame: phase transitions, player
//! movement, tube scrolling, scoring and collision. The phase enum is the
//! single source of truth for what runs; Paused and Title freeze the
//! playfield entirely.

use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held directional movement
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start/restart, true only on the frame the key went down
    pub start: bool,
    /// Pause toggle, true only on the frame the key went down
    pub pause: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    match state.phase {
        GamePhase::Title => {
            if input.start {
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }

            state.tick_count += 1;
            state.score_flash = state.score_flash.saturating_sub(1);

            let speed = state.scroll_speed;
            state.field.advance(speed, &mut state.rng);
            state.player.update(input, tuning);

            if state.field.collides(&state.player) {
                state.phase = GamePhase::GameOver;
                return;
            }

            let passed = state.field.newly_passed(state.player.pos.x);
            for _ in &passed {
                state.score.award(tuning.score_per_tube);
                state.score_flash = 1;
            }
            if !passed.is_empty() {
                let speed = tuning.scroll_speed_for(state.score.current);
                if speed > state.scroll_speed {
                    log::info!(
                        "score {} reached the {speed} px/tick tier",
                        state.score.current
                    );
                }
                state.scroll_speed = speed;
            }
        }

        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
        }

        GamePhase::GameOver => {
            if input.start {
                state.reset_session(tuning);
                state.phase = GamePhase::Playing;
            }
        }
    }
}
