#![warn(clippy::all, clippy::pedantic)]

// Grid dimensions
pub const COL_COUNT: usize = 10;
pub const ROW_COUNT: usize = 20;

// Frame pacing: the loop targets 50 frames per second
pub const FRAME_MILLIS: u64 = 1000 / 50;

// Logic speed, in clock cycles per second
pub const BASE_SPEED: f32 = 1.0;
pub const SOFT_DROP_SPEED: f32 = 25.0;

// Speed gains per locked piece. The placement step is applied before the
// level is recomputed, the level step after, both cumulative.
pub const PLACEMENT_SPEED_STEP: f32 = 0.035;
pub const LEVEL_SPEED_STEP: f32 = 0.010;

// level = floor(speed * LEVEL_FACTOR)
pub const LEVEL_FACTOR: f32 = 1.7;

// Scoring: clearing n lines in one tick is worth LINE_CLEAR_BASE << n
pub const LINE_CLEAR_BASE: u32 = 50;

// Frames of post-lock grace during which the soft-drop command is ignored
pub const DROP_COOLDOWN_FRAMES: u32 = 25;
