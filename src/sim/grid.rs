//! The descending wall of blocks
//!
//! Rows are laid out left to right with a fixed margin and gap. The wall never
//! regenerates on its own; the state machine drives descents on a timer.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// A destructible block. Color is cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub color: [u8; 3],
}

impl Block {
    pub fn new(x: f32, y: f32, color: [u8; 3]) -> Self {
        Self {
            rect: Rect::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT),
            color,
        }
    }
}

/// Build one row of blocks at height `y`
pub fn spawn_row(y: f32) -> Vec<Block> {
    (0..BLOCKS_PER_ROW)
        .map(|col| {
            let x = col as f32 * (BLOCK_WIDTH + BLOCK_GAP) + BLOCK_LEFT_MARGIN;
            Block::new(x, y, BLOCK_COLOR)
        })
        .collect()
}

/// Y coordinate of the `row`-th row counted from the top
#[inline]
pub fn row_y(row: usize) -> f32 {
    row as f32 * ROW_PITCH + TOP_ROW_Y
}

/// Ordered collection of live blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockGrid {
    blocks: Vec<Block>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Grid with `rows` stacked rows starting at the top row
    pub fn with_rows(rows: usize) -> Self {
        let mut grid = Self::new();
        for row in 0..rows {
            grid.extend_row(row_y(row));
        }
        grid
    }

    /// Append a freshly spawned row at height `y`
    pub fn extend_row(&mut self, y: f32) {
        self.blocks.extend(spawn_row(y));
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Shift every block down by one row pitch.
    ///
    /// Returns true when any block's bottom edge now reaches the game-over
    /// line. The whole wall moves before the check so the grid stays
    /// consistent even when the game ends.
    pub fn descend_all(&mut self) -> bool {
        for block in &mut self.blocks {
            block.rect.y += ROW_PITCH;
        }
        self.blocks
            .iter()
            .any(|b| b.rect.bottom() >= GAME_OVER_LINE)
    }

    /// Index of the first block overlapping `bounds`
    pub fn first_overlap(&self, bounds: &Rect) -> Option<usize> {
        super::collision::first_overlap(bounds, self.blocks.iter().map(|b| &b.rect))
    }

    pub fn remove_at(&mut self, index: usize) -> Block {
        self.blocks.remove(index)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_row_layout() {
        let row = spawn_row(30.0);
        assert_eq!(row.len(), BLOCKS_PER_ROW);
        for (i, block) in row.iter().enumerate() {
            assert_eq!(block.rect.x, i as f32 * 80.0 + 20.0);
            assert_eq!(block.rect.y, 30.0);
            assert_eq!(block.rect.w, BLOCK_WIDTH);
            assert_eq!(block.rect.h, BLOCK_HEIGHT);
            assert_eq!(block.color, row[0].color);
        }
        // Last block stays on screen
        assert!(row[BLOCKS_PER_ROW - 1].rect.right() <= SCREEN_WIDTH);
    }

    #[test]
    fn test_spawned_blocks_do_not_overlap() {
        let grid = BlockGrid::with_rows(INITIAL_ROWS);
        let blocks = grid.blocks();
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                assert!(!a.rect.intersects(&b.rect));
            }
        }
    }

    #[test]
    fn test_initial_rows() {
        let grid = BlockGrid::with_rows(4);
        assert_eq!(grid.len(), 40);
        let mut ys: Vec<f32> = grid.iter().map(|b| b.rect.y).collect();
        ys.dedup();
        assert_eq!(ys, vec![30.0, 65.0, 100.0, 135.0]);
    }

    #[test]
    fn test_descend_reports_game_over_line() {
        let mut grid = BlockGrid::new();
        grid.extend_row(350.0);
        // bottom 380 -> 415, still above 450
        assert!(!grid.descend_all());
        // bottom 415 -> 450, touches the line
        assert!(grid.descend_all());
    }

    #[test]
    fn test_descend_moves_every_block_even_on_game_over() {
        let mut grid = BlockGrid::new();
        grid.extend_row(400.0);
        grid.extend_row(30.0);
        assert!(grid.descend_all());
        assert!(grid.iter().filter(|b| b.rect.y == 435.0).count() == BLOCKS_PER_ROW);
        assert!(grid.iter().filter(|b| b.rect.y == 65.0).count() == BLOCKS_PER_ROW);
    }

    #[test]
    fn test_remove_at_and_empty() {
        let mut grid = BlockGrid::new();
        grid.extend_row(30.0);
        let removed = grid.remove_at(3);
        assert_eq!(removed.rect.x, 260.0);
        assert_eq!(grid.len(), BLOCKS_PER_ROW - 1);
        while !grid.is_empty() {
            grid.remove_at(0);
        }
        assert!(grid.is_empty());
    }

    proptest! {
        #[test]
        fn prop_descend_shifts_every_block(rows in proptest::collection::vec(0.0f32..500.0, 0..8)) {
            let mut grid = BlockGrid::new();
            for y in &rows {
                grid.extend_row(*y);
            }
            let before: Vec<f32> = grid.iter().map(|b| b.rect.y).collect();
            let over = grid.descend_all();
            let after: Vec<f32> = grid.iter().map(|b| b.rect.y).collect();
            prop_assert_eq!(before.len(), after.len());
            for (b, a) in before.iter().zip(&after) {
                prop_assert_eq!(*a, *b + ROW_PITCH);
            }
            let expected = after.iter().any(|y| y + BLOCK_HEIGHT >= GAME_OVER_LINE);
            prop_assert_eq!(over, expected);
        }
    }
}
