#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::Time;
use crate::board::Board;
use crate::clock::LogicClock;
use crate::components::{ActivePiece, GameSession, Input, NextPiece};
use crate::game::{
    BASE_SPEED, COL_COUNT, DROP_COOLDOWN_FRAMES, LEVEL_FACTOR, LEVEL_SPEED_STEP, LINE_CLEAR_BASE,
    PLACEMENT_SPEED_STEP, ROW_COUNT, SOFT_DROP_SPEED,
};
use crate::pieces::TileType;
use crate::sound::{AudioState, SoundEffect};

/// Runs one frame of game logic, in the order the frame loop requires:
/// drain pending commands, advance the clock, run at most one logic tick,
/// then age the post-lock cooldown.
pub fn frame_update(world: &mut World) {
    world.resource_mut::<Time>().update();

    input_system(world);

    let cycle_elapsed = {
        let mut clock = world.resource_mut::<LogicClock>();
        clock.update();
        clock.has_elapsed_cycle()
    };

    if cycle_elapsed {
        logic_tick(world);
    }

    let mut session = world.resource_mut::<GameSession>();
    if session.drop_cooldown > 0 {
        session.drop_cooldown -= 1;
    }
}

/// Drains the pending command flags, applying each command under the
/// session-state rules. Commands into invalid positions are silently
/// rejected with no state change.
pub fn input_system(world: &mut World) {
    let input = std::mem::take(&mut *world.resource_mut::<Input>());

    if input.toggle_music {
        world.resource_mut::<AudioState>().toggle_music();
    }

    if input.start {
        let session = world.resource::<GameSession>();
        if session.is_new_game || session.is_game_over {
            reset_game(world);
            return;
        }
    }

    if !world.resource::<GameSession>().is_playing() {
        return;
    }

    if input.pause {
        toggle_pause(world);
    }

    if world.resource::<GameSession>().is_paused {
        return;
    }

    if input.left {
        try_shift(world, -1);
    }

    if input.right {
        try_shift(world, 1);
    }

    if input.rotate {
        rotate_piece(world);
    }

    if input.soft_drop_start && world.resource::<GameSession>().drop_cooldown == 0 {
        world
            .resource_mut::<LogicClock>()
            .set_cycles_per_second(SOFT_DROP_SPEED);
    }

    if input.soft_drop_stop {
        let speed = world.resource::<GameSession>().speed;
        let mut clock = world.resource_mut::<LogicClock>();
        clock.set_cycles_per_second(speed);
        // Drop banked fast cycles so releasing the key does not fire a
        // burst of pending drops.
        clock.reset();
    }
}

/// One logic step: advance the active piece a row, or lock it and run
/// the scoring / speed / spawn sequence.
pub fn logic_tick(world: &mut World) {
    let session = world.resource::<GameSession>();
    if !session.is_playing() || session.is_paused {
        return;
    }

    let piece = *world.resource::<ActivePiece>();
    let can_fall = world.resource::<Board>().is_valid_and_empty(
        piece.tile,
        piece.col,
        piece.row + 1,
        piece.rotation,
    );

    if can_fall {
        world.resource_mut::<ActivePiece>().row += 1;
        return;
    }

    world
        .resource_mut::<Board>()
        .add_piece(piece.tile, piece.col, piece.row, piece.rotation);

    let cleared = world.resource_mut::<Board>().check_lines();

    let new_speed = {
        let mut session = world.resource_mut::<GameSession>();

        if cleared > 0 {
            session.score += LINE_CLEAR_BASE << cleared;
            info!("Cleared {cleared} lines, score {}", session.score);
        }

        session.speed += PLACEMENT_SPEED_STEP;
        let speed = session.speed;
        session.drop_cooldown = DROP_COOLDOWN_FRAMES;
        session.level = (speed * LEVEL_FACTOR) as u32;
        session.speed += LEVEL_SPEED_STEP;
        speed
    };

    {
        let mut clock = world.resource_mut::<LogicClock>();
        clock.set_cycles_per_second(new_speed);
        clock.reset();
    }

    let audio = world.resource::<AudioState>();
    if cleared > 0 {
        audio.play_sound(SoundEffect::LineClear);
    } else {
        audio.play_sound(SoundEffect::PieceLock);
    }

    spawn_piece(world);
}

/// Promotes the lookahead piece to the active piece at its declared
/// spawn position and redraws the lookahead. A blocked spawn ends the
/// session.
pub fn spawn_piece(world: &mut World) {
    let tile = world.resource::<NextPiece>().0;
    let piece = ActivePiece::spawn(tile);

    world.resource_mut::<NextPiece>().0 = TileType::random();
    *world.resource_mut::<ActivePiece>() = piece;

    let blocked = !world.resource::<Board>().is_valid_and_empty(
        piece.tile,
        piece.col,
        piece.row,
        piece.rotation,
    );

    if blocked {
        info!("Spawn blocked, game over");
        world.resource_mut::<GameSession>().is_game_over = true;
        world.resource_mut::<LogicClock>().set_paused(true);
        world.resource::<AudioState>().play_sound(SoundEffect::GameOver);
    }
}

/// Starts (or restarts) a session: fresh score and level, base speed,
/// empty board, unpaused clock, new random lookahead, first spawn.
pub fn reset_game(world: &mut World) {
    debug!("Resetting session");

    {
        let mut session = world.resource_mut::<GameSession>();
        session.level = 1;
        session.score = 0;
        session.speed = BASE_SPEED;
        session.is_paused = false;
        session.is_new_game = false;
        session.is_game_over = false;
        session.drop_cooldown = 0;
    }

    world.resource_mut::<Board>().clear();

    {
        let mut clock = world.resource_mut::<LogicClock>();
        clock.set_cycles_per_second(BASE_SPEED);
        clock.reset();
        clock.set_paused(false);
    }

    world.resource_mut::<NextPiece>().0 = TileType::random();
    spawn_piece(world);
}

/// Pause is a toggle, permitted only while a game is actually running.
pub fn toggle_pause(world: &mut World) {
    let paused = {
        let mut session = world.resource_mut::<GameSession>();
        if !session.is_playing() {
            return;
        }
        session.is_paused = !session.is_paused;
        session.is_paused
    };
    world.resource_mut::<LogicClock>().set_paused(paused);
}

fn try_shift(world: &mut World, dx: i32) {
    let piece = *world.resource::<ActivePiece>();
    let valid = world.resource::<Board>().is_valid_and_empty(
        piece.tile,
        piece.col + dx,
        piece.row,
        piece.rotation,
    );
    if valid {
        world.resource_mut::<ActivePiece>().col += dx;
    }
}

/// Cycles to the next rotation index, clamping the bounding box back
/// inside the grid by exactly the overflow on each axis, then commits
/// rotation, column and row together only if the clamped position is
/// valid. No wall kicks beyond this clamp.
fn rotate_piece(world: &mut World) {
    let piece = *world.resource::<ActivePiece>();
    let new_rotation = (piece.rotation + 1) % 4;

    let insets = piece.tile.insets(new_rotation);
    let dim = piece.tile.dimension();
    let mut new_col = piece.col;
    let mut new_row = piece.row;

    let left_edge = new_col + insets.left;
    if left_edge < 0 {
        new_col -= left_edge;
    }
    let right_edge = new_col + dim - insets.right;
    if right_edge > COL_COUNT as i32 {
        new_col -= right_edge - COL_COUNT as i32;
    }

    let top_edge = new_row + insets.top;
    if top_edge < 0 {
        new_row -= top_edge;
    }
    let bottom_edge = new_row + dim - insets.bottom;
    if bottom_edge > ROW_COUNT as i32 {
        new_row -= bottom_edge - ROW_COUNT as i32;
    }

    let valid = world
        .resource::<Board>()
        .is_valid_and_empty(piece.tile, new_col, new_row, new_rotation);

    if valid {
        let mut piece = world.resource_mut::<ActivePiece>();
        piece.rotation = new_rotation;
        piece.col = new_col;
        piece.row = new_row;
    }
}
