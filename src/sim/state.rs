//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{ball_wall_collision, paddle_deflection};
use super::grid::BlockGrid;
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ball fell out or the wall reached the game-over line
    Lost,
    /// Every block destroyed
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Horizontal pixels per tick
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(PADDLE_SPEED)
    }
}

impl Paddle {
    /// Centered near the bottom of the screen
    pub fn new(speed: f32) -> Self {
        Self {
            rect: Rect::new(
                (SCREEN_WIDTH - PADDLE_WIDTH) / 2.0,
                SCREEN_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            speed,
        }
    }

    /// Move by one tick of input, then clamp to the screen
    pub fn update(&mut self, move_left: bool, move_right: bool) {
        if move_left {
            self.rect.x -= self.speed;
        }
        if move_right {
            self.rect.x += self.speed;
        }

        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }
        if self.rect.right() > SCREEN_WIDTH {
            self.rect.set_right(SCREEN_WIDTH);
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Speed scale for paddle deflection
    pub speed: f32,
}

impl Ball {
    /// Ball centered above the paddle, heading up and to `dir_x` (±1)
    pub fn new(speed: f32, dir_x: f32) -> Self {
        let top = SCREEN_HEIGHT - PADDLE_HEIGHT - BALL_SPAWN_OFFSET;
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, top + BALL_RADIUS),
            vel: Vec2::new(dir_x.signum() * speed, -speed),
            radius: BALL_RADIUS,
            speed,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Advance one tick against the walls, paddle and wall of blocks.
    ///
    /// Checks run in order walls, paddle, blocks, all against the moved
    /// position. At most one block is destroyed per call. Returns true if a
    /// block was hit.
    pub fn update(&mut self, paddle: &Paddle, grid: &mut BlockGrid) -> bool {
        self.pos += self.vel;

        let walls = ball_wall_collision(&mut self.pos, &mut self.vel, self.radius, SCREEN_WIDTH);
        if walls.any() {
            log::trace!("Wall bounce {:?} at {:?}", walls, self.pos);
        }

        if self.bounds().intersects(&paddle.rect) {
            self.vel.y = -self.vel.y;
            self.pos.y = paddle.rect.top() - self.radius;
            self.vel.x = paddle_deflection(self.pos.x, &paddle.rect, self.speed);
            log::trace!("Paddle bounce, vx = {}", self.vel.x);
        }

        // Blocks only flip vertical velocity, whichever face was struck
        if let Some(index) = grid.first_overlap(&self.bounds()) {
            let block = grid.remove_at(index);
            self.vel.y = -self.vel.y;
            log::debug!("Block destroyed at ({}, {})", block.rect.x, block.rect.y);
            return true;
        }

        false
    }

    /// Fully below the visible area
    pub fn is_out_of_bounds(&self) -> bool {
        self.bounds().top() > SCREEN_HEIGHT
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Tuning this game was built with
    pub settings: Settings,
    /// Current phase
    pub phase: GamePhase,
    /// Score
    pub score: u32,
    /// Simulation tick counter (reset on restart)
    pub time_ticks: u64,
    /// Seconds simulated since the game (re)started
    pub elapsed_secs: f32,
    /// Seconds accumulated since the last wall descent
    pub descent_timer: f32,
    /// Number of descents performed this game
    pub descents: u32,
    /// Player paddle
    pub paddle: Paddle,
    /// The ball
    pub ball: Ball,
    /// Wall of blocks
    pub grid: BlockGrid,
    /// Continues across restarts so each restart flips a fresh coin
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    /// Create a new game from settings. A missing seed draws one from the OS.
    pub fn with_settings(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Self::serve_ball(&mut rng, &settings);

        log::info!("New game (seed {})", seed);

        Self {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            elapsed_secs: 0.0,
            descent_timer: 0.0,
            descents: 0,
            paddle: Paddle::new(settings.paddle_speed),
            ball,
            grid: BlockGrid::with_rows(settings.initial_rows),
            settings,
            rng,
        }
    }

    /// Rebuild every entity in place and resume play
    pub fn restart(&mut self) {
        log::info!(
            "Restart from {:?} (score {}, {} blocks left)",
            self.phase,
            self.score,
            self.grid.len()
        );

        self.phase = GamePhase::Playing;
        self.score = 0;
        self.time_ticks = 0;
        self.elapsed_secs = 0.0;
        self.descent_timer = 0.0;
        self.descents = 0;
        self.paddle = Paddle::new(self.settings.paddle_speed);
        self.ball = Self::serve_ball(&mut self.rng, &self.settings);
        self.grid = BlockGrid::with_rows(self.settings.initial_rows);
    }

    /// Fresh ball with a fair-coin horizontal direction
    fn serve_ball(rng: &mut Pcg32, settings: &Settings) -> Ball {
        let dir_x = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Ball::new(settings.ball_speed, dir_x)
    }
}
