#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Grid coordinates stay far below i32::MAX, so these casts are lossless
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::Resource;

use crate::game::{COL_COUNT, ROW_COUNT};
use crate::pieces::TileType;

/// Authoritative grid state. Cells are written only by `add_piece` and
/// cleared only by `check_lines` or `clear`.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<TileType>>>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: COL_COUNT,
            height: ROW_COUNT,
            cells: vec![vec![None; ROW_COUNT]; COL_COUNT],
        }
    }

    pub fn clear(&mut self) {
        for column in &mut self.cells {
            for cell in column {
                *cell = None;
            }
        }
    }

    /// True iff every occupied cell of the shape, translated by
    /// (col, row), lies inside the grid and lands on an empty cell.
    #[must_use]
    pub fn is_valid_and_empty(&self, tile: TileType, col: i32, row: i32, rotation: usize) -> bool {
        for &(dx, dy) in tile.cells(rotation) {
            let x = col + dx;
            let y = row + dy;

            if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
                return false;
            }

            if self.cells[x as usize][y as usize].is_some() {
                return false;
            }
        }

        true
    }

    /// Commits the shape's occupied cells into the grid, tagged with the
    /// tile type. The caller must already have validated the position via
    /// `is_valid_and_empty`; this does not re-validate and will overwrite
    /// occupied cells if misused.
    pub fn add_piece(&mut self, tile: TileType, col: i32, row: i32, rotation: usize) {
        for &(dx, dy) in tile.cells(rotation) {
            let x = col + dx;
            let y = row + dy;

            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.cells[x as usize][y as usize] = Some(tile);
            }
        }
    }

    /// Removes every full row and collapses the rows above, all in one
    /// call so simultaneous multi-line clears shift correctly. Returns
    /// the number of rows removed.
    pub fn check_lines(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..self.height)
            .filter(|&y| (0..self.width).all(|x| self.cells[x][y].is_some()))
            .collect();

        // Remove top-to-bottom: collapsing a row only displaces rows
        // above it, so the later (larger) indices stay valid.
        for &y in &full_rows {
            for y2 in (1..=y).rev() {
                for x in 0..self.width {
                    self.cells[x][y2] = self.cells[x][y2 - 1];
                }
            }
            for x in 0..self.width {
                self.cells[x][0] = None;
            }
        }

        full_rows.len()
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<TileType> {
        self.cells[x][y]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
