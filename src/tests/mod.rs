#![warn(clippy::all, clippy::pedantic)]

pub mod board_tests;
pub mod sound_tests;
pub mod time_tests;

// Shared test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::Time;
    use crate::board::Board;
    use crate::clock::LogicClock;
    use crate::components::{ActivePiece, GameSession, Input, NextPiece};
    use crate::game::BASE_SPEED;
    use crate::pieces::TileType;
    use crate::sound::AudioState;

    /// A world with every resource the systems expect, in the NEW state.
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(GameSession::default());
        world.insert_resource(Board::new());
        world.insert_resource(Input::default());
        world.insert_resource(AudioState::new());
        world.insert_resource(ActivePiece::spawn(TileType::T));
        world.insert_resource(NextPiece(TileType::T));
        let mut clock = LogicClock::new(BASE_SPEED);
        clock.set_paused(true);
        world.insert_resource(clock);
        world
    }

    /// A world already in the PLAYING state with an empty board.
    #[must_use]
    pub fn create_playing_world() -> World {
        let mut world = create_test_world();
        crate::systems::reset_game(&mut world);
        world
    }

    /// Fills a whole row except the listed columns.
    pub fn fill_row_except(board: &mut Board, y: usize, holes: &[usize], tile: TileType) {
        for x in 0..board.width {
            if !holes.contains(&x) {
                board.cells[x][y] = Some(tile);
            }
        }
    }
}
