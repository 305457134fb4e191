//! Collision detection and response for the ball
//!
//! Walls, paddle and blocks are all axis-aligned boxes, and the ball is tested
//! through its square bounding box. Responses only flip velocity components;
//! the paddle additionally steers the horizontal speed by contact offset.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::BALL_MIN_VX;

/// Which screen walls were touched during a wall check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub top: bool,
    pub side: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.top || self.side
    }
}

/// Bounce a ball off the top, left and right walls of a `width`-wide screen.
///
/// The top and side checks are independent; both may fire in one call. The
/// offending edge is clamped back onto the boundary.
pub fn ball_wall_collision(center: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32) -> WallHits {
    let mut hits = WallHits::default();

    if center.y - radius < 0.0 {
        vel.y = -vel.y;
        center.y = radius;
        hits.top = true;
    }

    let left = center.x - radius;
    let right = center.x + radius;
    if left < 0.0 || right > width {
        vel.x = -vel.x;
        if left < 0.0 {
            center.x = radius;
        }
        if right > width {
            center.x = width - radius;
        }
        hits.side = true;
    }

    hits
}

/// Horizontal speed after a paddle bounce
///
/// Proportional to how far from the paddle center the ball landed, scaled so a
/// hit on either paddle edge gives `±base_speed`. Speeds below `BALL_MIN_VX`
/// are pushed out to it (zero goes right) so the ball never gets stuck
/// bouncing straight up and down.
pub fn paddle_deflection(ball_center_x: f32, paddle: &Rect, base_speed: f32) -> f32 {
    let half_width = paddle.w / 2.0;
    let vx = (ball_center_x - paddle.center_x()) / half_width * base_speed;
    if vx.abs() < BALL_MIN_VX {
        if vx >= 0.0 { BALL_MIN_VX } else { -BALL_MIN_VX }
    } else {
        vx
    }
}

/// Index of the first rect (in iteration order) overlapping `bounds`
///
/// Ties resolve to the earliest entry, not the nearest or deepest overlap.
pub fn first_overlap<'a, I>(bounds: &Rect, rects: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects.into_iter().position(|r| bounds.intersects(r))
}
