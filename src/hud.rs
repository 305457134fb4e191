//! Presentation data for whatever draws the game
//!
//! Nothing here draws. It answers "what color, what text, where" so a
//! renderer only has to paint.

use crate::consts::{GAME_OVER_LINE, SCREEN_WIDTH};
use crate::sim::GamePhase;

/// RGB colors
pub mod palette {
    pub const BACKGROUND: [u8; 3] = [0, 0, 0];
    pub const PADDLE: [u8; 3] = [0, 0, 255];
    pub const BALL: [u8; 3] = [255, 255, 255];
    pub const BLOCK: [u8; 3] = crate::consts::BLOCK_COLOR;
    pub const TEXT: [u8; 3] = [255, 255, 255];
    pub const GAME_OVER_LINE: [u8; 3] = [255, 0, 0];
    pub const LOST: [u8; 3] = [255, 0, 0];
    pub const WON: [u8; 3] = [255, 255, 0];
}

/// Shown under the banner in either terminal phase
pub const RESTART_PROMPT: &str = "Press 'R' to Restart";

/// Dash pattern of the game-over line
pub const DASH_LENGTH: f32 = 15.0;
pub const DASH_GAP: f32 = 10.0;
pub const LINE_THICKNESS: f32 = 2.0;

pub fn score_text(score: u32) -> String {
    format!("SCORE: {}", score)
}

/// Headline and color for a terminal phase
pub fn banner(phase: GamePhase) -> Option<(&'static str, [u8; 3])> {
    match phase {
        GamePhase::Playing => None,
        GamePhase::Lost => Some(("GAME OVER", palette::LOST)),
        GamePhase::Won => Some(("GAME CLEAR!", palette::WON)),
    }
}

/// Dash segments `(x_start, x_end, y)` across the screen at the game-over line
pub fn game_over_line_dashes() -> impl Iterator<Item = (f32, f32, f32)> {
    let pitch = DASH_LENGTH + DASH_GAP;
    let count = (SCREEN_WIDTH / pitch).ceil() as usize;
    (0..count).map(move |i| {
        let x = i as f32 * pitch;
        (x, x + DASH_LENGTH, GAME_OVER_LINE)
    })
}
