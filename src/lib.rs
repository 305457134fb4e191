//! Wall Breaker - a Breakout game with a descending wall of blocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, block grid, game state)
//! - `settings`: Data-driven game tuning loaded from JSON
//! - `hud`: Draw-free presentation data (palette, banners, score text)

pub mod hud;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GamePhase, GameState, Snapshot, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Target frame rate (advisory, the core never paces itself)
    pub const TARGET_FPS: u32 = 60;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle's bottom edge and the screen bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 5.0;
    /// Ball's top edge spawns this far above the paddle's bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 50.0;
    /// Smallest horizontal speed after a paddle bounce
    pub const BALL_MIN_VX: f32 = 1.0;

    /// Block layout
    pub const BLOCK_WIDTH: f32 = 75.0;
    pub const BLOCK_HEIGHT: f32 = 30.0;
    pub const BLOCK_GAP: f32 = 5.0;
    pub const BLOCK_LEFT_MARGIN: f32 = 20.0;
    pub const BLOCKS_PER_ROW: usize = 10;
    pub const INITIAL_ROWS: usize = 4;
    /// Y coordinate of the top row (new rows spawn here)
    pub const TOP_ROW_Y: f32 = 30.0;
    /// Vertical distance between rows, and the distance of one descent
    pub const ROW_PITCH: f32 = BLOCK_HEIGHT + BLOCK_GAP;

    /// Blocks whose bottom edge reaches this line end the game
    pub const GAME_OVER_LINE: f32 = SCREEN_HEIGHT - 150.0;

    /// Seconds between wall descents
    pub const DESCENT_INTERVAL_SECS: f32 = 10.0;

    /// Points per destroyed block
    pub const POINTS_PER_BLOCK: u32 = 10;

    /// Block color (cosmetic, RGB)
    pub const BLOCK_COLOR: [u8; 3] = [255, 255, 255];
}
