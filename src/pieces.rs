#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are small enough that usize -> i32 never truncates
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use once_cell::sync::Lazy;
use ratatui::style::Color;

use crate::game::COL_COUNT;

pub const TILE_COUNT: usize = 7;
pub const ROTATION_COUNT: usize = 4;

/// The seven fixed piece variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TileType {
    pub const ALL: [TileType; TILE_COUNT] = [
        TileType::I,
        TileType::J,
        TileType::L,
        TileType::O,
        TileType::S,
        TileType::T,
        TileType::Z,
    ];

    #[must_use]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(0..TILE_COUNT)]
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            TileType::I => Color::Cyan,
            TileType::J => Color::Blue,
            TileType::L => Color::LightYellow,
            TileType::O => Color::Yellow,
            TileType::S => Color::Green,
            TileType::T => Color::Magenta,
            TileType::Z => Color::Red,
        }
    }

    /// Occupied sub-cells of this tile in the given rotation, as
    /// (column, row) offsets into the bounding box.
    #[must_use]
    pub fn cells(self, rotation: usize) -> &'static [(i32, i32); 4] {
        &CATALOG[self.index()].rotations[rotation].cells
    }

    #[must_use]
    pub fn insets(self, rotation: usize) -> Insets {
        CATALOG[self.index()].rotations[rotation].insets
    }

    /// Side length of the square bounding box.
    #[must_use]
    pub fn dimension(self) -> i32 {
        CATALOG[self.index()].dimension
    }

    #[must_use]
    pub fn spawn_column(self) -> i32 {
        CATALOG[self.index()].spawn_col
    }

    #[must_use]
    pub fn spawn_row(self) -> i32 {
        CATALOG[self.index()].spawn_row
    }
}

/// Empty margin between the occupied cells and each side of the
/// bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone)]
pub struct RotationState {
    pub cells: [(i32, i32); 4],
    pub insets: Insets,
}

#[derive(Debug, Clone)]
pub struct TileData {
    pub dimension: i32,
    pub spawn_col: i32,
    pub spawn_row: i32,
    pub rotations: [RotationState; ROTATION_COUNT],
}

/// Immutable geometry table for all tile types, built once on first use
/// and indexed by `TileType::index()`.
pub static CATALOG: Lazy<[TileData; TILE_COUNT]> = Lazy::new(|| {
    [
        tile_data(4, I_CELLS),
        tile_data(3, J_CELLS),
        tile_data(3, L_CELLS),
        tile_data(2, O_CELLS),
        tile_data(3, S_CELLS),
        tile_data(3, T_CELLS),
        tile_data(3, Z_CELLS),
    ]
});

type CellTable = [[(i32, i32); 4]; ROTATION_COUNT];

const I_CELLS: CellTable = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const J_CELLS: CellTable = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_CELLS: CellTable = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const O_CELLS: CellTable = [
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
];

const S_CELLS: CellTable = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const T_CELLS: CellTable = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_CELLS: CellTable = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

fn tile_data(dimension: i32, cells: CellTable) -> TileData {
    let rotations = cells.map(|cells| RotationState {
        cells,
        insets: compute_insets(dimension, &cells),
    });

    // Spawn with the bounding box horizontally centered and the topmost
    // occupied cell of rotation 0 on row 0.
    let spawn_col = (COL_COUNT as i32) / 2 - dimension / 2;
    let spawn_row = -rotations[0].insets.top;

    TileData {
        dimension,
        spawn_col,
        spawn_row,
        rotations,
    }
}

fn compute_insets(dimension: i32, cells: &[(i32, i32); 4]) -> Insets {
    let mut min_x = dimension - 1;
    let mut max_x = 0;
    let mut min_y = dimension - 1;
    let mut max_y = 0;

    for &(x, y) in cells {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    Insets {
        left: min_x,
        right: dimension - 1 - max_x,
        top: min_y,
        bottom: dimension - 1 - max_y,
    }
}
