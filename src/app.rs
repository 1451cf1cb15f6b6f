#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;

use crate::Time;
use crate::board::Board;
use crate::clock::LogicClock;
use crate::components::{ActivePiece, GameSession, Input, NextPiece};
use crate::game::BASE_SPEED;
use crate::pieces::TileType;
use crate::sound::AudioState;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// Owns the ECS world holding all game state. The session starts in the
/// NEW state with the clock paused; the first start command brings it to
/// life via `systems::reset_game`.
pub struct App {
    pub world: World,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(GameSession::default());
        world.insert_resource(Board::new());
        world.insert_resource(Input::default());
        world.insert_resource(AudioState::new());
        world.insert_resource(ActivePiece::spawn(TileType::random()));
        world.insert_resource(NextPiece(TileType::random()));

        let mut clock = LogicClock::new(BASE_SPEED);
        clock.set_paused(true);
        world.insert_resource(clock);

        Self {
            world,
            should_quit: false,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
