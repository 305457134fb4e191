//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick movement, caller-supplied frame time for timers
//! - Seeded RNG only
//! - Stable block order (first match wins)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{WallHits, ball_wall_collision, first_overlap, paddle_deflection};
pub use grid::{Block, BlockGrid, row_y, spawn_row};
pub use rect::Rect;
pub use state::{Ball, GamePhase, GameState, Paddle};
pub use tick::{Snapshot, TickInput, tick};
