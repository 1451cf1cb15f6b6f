#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Session state is a handful of distinct flags, not a state soup
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::Resource;

use crate::game::BASE_SPEED;
use crate::pieces::TileType;

/// The currently falling piece, positioned on the grid by the origin of
/// its bounding box. `col`/`row` may be negative as long as every
/// occupied cell stays inside the grid.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub tile: TileType,
    pub col: i32,
    pub row: i32,
    pub rotation: usize,
}

impl ActivePiece {
    /// A fresh piece at the tile's declared spawn position.
    #[must_use]
    pub fn spawn(tile: TileType) -> Self {
        Self {
            tile,
            col: tile.spawn_column(),
            row: tile.spawn_row(),
            rotation: 0,
        }
    }

    /// Occupied grid cells of the piece at its current position.
    #[must_use]
    pub fn blocks(&self) -> [(i32, i32); 4] {
        self.tile
            .cells(self.rotation)
            .map(|(dx, dy)| (self.col + dx, self.row + dy))
    }
}

/// Single-piece lookahead, redrawn uniformly at random on every spawn.
#[derive(Resource, Debug, Clone, Copy)]
pub struct NextPiece(pub TileType);

/// Aggregate session state. Speed only ever grows within a session;
/// a reset is the one exception.
#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub level: u32,
    pub score: u32,
    pub speed: f32,
    pub is_paused: bool,
    pub is_new_game: bool,
    pub is_game_over: bool,
    /// Post-lock grace counter, decremented once per frame. Gates only
    /// the soft-drop start command.
    pub drop_cooldown: u32,
}

impl GameSession {
    /// True while the session accepts movement, rotation and logic ticks.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.is_new_game && !self.is_game_over
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            speed: BASE_SPEED,
            is_paused: false,
            is_new_game: true,
            is_game_over: false,
            drop_cooldown: 0,
        }
    }
}

/// Pending input commands, written by the key handler and drained
/// exactly once per frame by `systems::input_system`. Keeping the drain
/// on the frame tick preserves the single-writer rule over
/// `ActivePiece` and `GameSession`.
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
    pub soft_drop_start: bool,
    pub soft_drop_stop: bool,
    pub pause: bool,
    pub start: bool,
    pub toggle_music: bool,
}
