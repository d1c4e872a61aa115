//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Rect, circle_rect_overlap};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    Title,
    /// Active gameplay
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run ended on a collision
    GameOver,
}

/// The player-controlled object
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Bounding circle radius
    pub radius: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FLOPPY_START_X, SCREEN_HEIGHT / 2.0 - FLOPPY_RADIUS),
            radius: FLOPPY_RADIUS,
        }
    }
}

impl Player {
    /// Lowest allowed center y - the floor boundary
    #[inline]
    pub fn floor_y(&self) -> f32 {
        SCREEN_HEIGHT - self.radius
    }

    /// Apply one tick of movement: the constant downward pull plus a fixed
    /// delta per held direction key, composed additively, then the floor
    /// clamp. There is no upper clamp; the player may leave the top of the
    /// visible area.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) {
        self.pos.y += tuning.gravity;

        if input.up {
            self.pos.y -= tuning.move_speed;
        }
        if input.down {
            self.pos.y += tuning.move_speed;
        }
        if input.left {
            self.pos.x -= tuning.move_speed;
        }
        if input.right {
            self.pos.x += tuning.move_speed;
        }

        if self.pos.y > self.floor_y() {
            self.pos.y = self.floor_y();
        }
    }
}

/// One top/bottom tube pair sharing an x coordinate
#[derive(Debug, Clone)]
pub struct ObstaclePair {
    /// Left edge x shared by both rectangles
    pub gap_x: f32,
    /// Vertical offset of the top rectangle, in [-TUBE_OFFSET_RANGE, 0]
    pub top_y: f32,
    /// Whether this spawn has already awarded points
    pub scored: bool,
}

impl ObstaclePair {
    fn spawn(gap_x: f32, rng: &mut Pcg32) -> Self {
        Self {
            gap_x,
            top_y: -rng.random_range(0.0..=TUBE_OFFSET_RANGE),
            scored: false,
        }
    }

    /// Upper rectangle, derived from the gap position
    #[inline]
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.gap_x, self.top_y, TUBE_WIDTH, TUBE_HEIGHT)
    }

    /// Lower rectangle; its y tracks the top rectangle so the gap height
    /// stays constant
    #[inline]
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.gap_x,
            self.top_y + TUBE_SPAN - TUBE_HEIGHT,
            TUBE_WIDTH,
            TUBE_HEIGHT,
        )
    }
}

/// Scrolling collection of evenly spaced tube pairs
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pub pairs: Vec<ObstaclePair>,
    spacing: f32,
}

impl ObstacleField {
    pub fn new(count: usize, spacing: f32, base_x: f32, rng: &mut Pcg32) -> Self {
        let pairs = (0..count)
            .map(|i| ObstaclePair::spawn(base_x + spacing * i as f32, rng))
            .collect();
        Self { pairs, spacing }
    }

    /// Scroll every pair left by `speed`. A pair whose right edge has left
    /// the screen respawns one spacing beyond the rightmost pair with a
    /// fresh offset, so spacing stays even forever.
    pub fn advance(&mut self, speed: f32, rng: &mut Pcg32) {
        let wrap = self.spacing * self.pairs.len() as f32;
        for pair in &mut self.pairs {
            pair.gap_x -= speed;
            if pair.gap_x + TUBE_WIDTH < 0.0 {
                *pair = ObstaclePair::spawn(pair.gap_x + wrap, rng);
            }
        }
    }

    /// True iff the player's circle strictly overlaps any tube rectangle.
    /// Pure query, no mutation.
    pub fn collides(&self, player: &Player) -> bool {
        self.pairs.iter().any(|pair| {
            circle_rect_overlap(player.pos, player.radius, &pair.top_rect())
                || circle_rect_overlap(player.pos, player.radius, &pair.bottom_rect())
        })
    }

    /// Mark pairs whose x just dropped below the player's x and return
    /// their indices. Each spawn scores at most once.
    pub fn newly_passed(&mut self, player_x: f32) -> Vec<usize> {
        let mut passed = Vec::new();
        for (i, pair) in self.pairs.iter_mut().enumerate() {
            if !pair.scored && pair.gap_x < player_x {
                pair.scored = true;
                passed.push(i);
            }
        }
        passed
    }
}

/// Current and historic-best score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub current: u64,
    pub all_time_high: u64,
}

impl ScoreState {
    /// Add an award, keeping the historic best in sync
    pub fn award(&mut self, points: u64) {
        self.current += points;
        if self.current > self.all_time_high {
            self.all_time_high = self.current;
        }
    }
}

/// Complete game state, advanced one frame at a time by
/// [`tick`](super::tick::tick)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG for tube offsets; keeps advancing across restarts so
    /// each run gets a fresh layout
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub field: ObstacleField,
    pub score: ScoreState,
    /// Scroll speed of the active tier
    pub scroll_speed: f32,
    /// Ticks spent in the Playing phase
    pub tick_count: u64,
    /// Frames of full-screen flash left to draw after a score
    pub score_flash: u8,
}

impl GameState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = ObstacleField::new(
            tuning.tube_count,
            tuning.tube_spacing,
            tuning.base_x,
            &mut rng,
        );
        Self {
            seed,
            rng,
            phase: GamePhase::Title,
            player: Player::default(),
            field,
            score: ScoreState::default(),
            scroll_speed: tuning.scroll_speed_for(0),
            tick_count: 0,
            score_flash: 0,
        }
    }

    /// Re-initialize everything a restart resets: player, tube field,
    /// current score, speed tier. The historic best survives.
    pub fn reset_session(&mut self, tuning: &Tuning) {
        self.player = Player::default();
        self.field = ObstacleField::new(
            tuning.tube_count,
            tuning.tube_spacing,
            tuning.base_x,
            &mut self.rng,
        );
        self.score.current = 0;
        self.scroll_speed = tuning.scroll_speed_for(0);
        self.score_flash = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let state = GameState::new(42, &tuning);
        (state, tuning)
    }

    #[test]
    fn test_pair_rects_share_x_and_keep_gap() {
        let (state, _) = test_state();
        for pair in &state.field.pairs {
            let top = pair.top_rect();
            let bottom = pair.bottom_rect();
            assert_eq!(top.x, bottom.x);
            assert_eq!(bottom.y, top.y + TUBE_SPAN - TUBE_HEIGHT);
            assert!(pair.top_y <= 0.0 && pair.top_y >= -TUBE_OFFSET_RANGE);
        }
    }

    #[test]
    fn test_field_spacing_is_even() {
        let (state, tuning) = test_state();
        for window in state.field.pairs.windows(2) {
            let dx = window[1].gap_x - window[0].gap_x;
            assert!((dx - tuning.tube_spacing).abs() < 1e-3);
        }
    }

    #[test]
    fn test_newly_passed_marks_once() {
        let (mut state, _) = test_state();
        state.field.pairs[0].gap_x = 79.9;

        let passed = state.field.newly_passed(80.0);
        assert_eq!(passed, vec![0]);
        assert!(state.field.pairs[0].scored);

        // Second check: already scored, nothing new
        assert!(state.field.newly_passed(80.0).is_empty());
    }

    #[test]
    fn test_newly_passed_requires_strictly_behind() {
        let (mut state, _) = test_state();
        state.field.pairs[0].gap_x = 80.0;
        assert!(state.field.newly_passed(80.0).is_empty());
        assert!(!state.field.pairs[0].scored);
    }

    #[test]
    fn test_recycled_pair_resets_scored_flag() {
        let (mut state, tuning) = test_state();
        state.field.pairs[0].gap_x = -TUBE_WIDTH + 0.5;
        state.field.pairs[0].scored = true;

        state.field.advance(1.0, &mut state.rng);

        let pair = &state.field.pairs[0];
        assert!(!pair.scored);
        // Respawned one spacing beyond where the old rightmost slot was
        let expected = -TUBE_WIDTH - 0.5 + tuning.tube_spacing * tuning.tube_count as f32;
        assert!((pair.gap_x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_floor_clamp() {
        let (mut state, tuning) = test_state();
        state.player.pos.y = state.player.floor_y() - 0.1;

        let input = TickInput {
            down: true,
            ..TickInput::default()
        };
        state.player.update(&input, &tuning);
        assert_eq!(state.player.pos.y, state.player.floor_y());
    }

    #[test]
    fn test_no_upper_clamp() {
        let (mut state, tuning) = test_state();
        state.player.pos.y = 0.0;

        let input = TickInput {
            up: true,
            ..TickInput::default()
        };
        for _ in 0..30 {
            state.player.update(&input, &tuning);
        }
        assert!(state.player.pos.y < 0.0);
    }

    #[test]
    fn test_award_tracks_high_water_mark() {
        let mut score = ScoreState::default();
        score.award(100);
        score.award(100);
        assert_eq!(score.current, 200);
        assert_eq!(score.all_time_high, 200);

        score.current = 0;
        score.award(100);
        assert_eq!(score.all_time_high, 200);
    }

    #[test]
    fn test_reset_session_preserves_high_score_and_reseeds_field() {
        let (mut state, tuning) = test_state();
        state.score.award(700);
        state.player.pos = Vec2::new(300.0, 10.0);
        let first_offsets: Vec<f32> = state.field.pairs.iter().map(|p| p.top_y).collect();

        state.reset_session(&tuning);

        assert_eq!(state.score.current, 0);
        assert_eq!(state.score.all_time_high, 700);
        assert_eq!(state.player.pos.x, FLOPPY_START_X);
        assert_eq!(state.scroll_speed, tuning.scroll_speed_for(0));
        // The RNG moved on, so the layout is a fresh draw
        let second_offsets: Vec<f32> = state.field.pairs.iter().map(|p| p.top_y).collect();
        assert_ne!(first_offsets, second_offsets);
    }
}
