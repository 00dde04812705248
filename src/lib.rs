//! Starlane - a lane-based vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game phase)
//! - `session`: Session controller (start/reset, intents in, snapshots out)
//! - `highscores`: Leaderboard behind the score persistence hook
//! - `settings`: Player-facing configuration

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{FileLeaderboard, HighScores, ScoreSink, StoreError};
pub use session::{Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
///
/// All speeds are in pixels per tick; the host drives one tick per frame.
pub mod consts {
    /// Host tick rate (one simulation step per animation frame)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per `Session::advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 960.0;
    pub const WORLD_HEIGHT: f32 = 540.0;

    /// Ship defaults - centered horizontally, 80px above the bottom edge
    pub const SHIP_MARGIN: f32 = 20.0;
    pub const SHIP_Y: f32 = WORLD_HEIGHT - 80.0;
    pub const SHIP_WIDTH: f32 = 44.0;
    pub const SHIP_HEIGHT: f32 = 18.0;
    pub const SHIP_SPEED: f32 = 10.0;

    /// Fire cooldown in ticks (rapid fire halves it)
    pub const FIRE_COOLDOWN: u32 = 12;
    pub const RAPID_FIRE_COOLDOWN: u32 = 6;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 9.0;
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    /// Side angles of the wide shot spread
    pub const WIDE_SHOT_ANGLE: f32 = 0.18;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 36.0;
    pub const ENEMY_HEIGHT: f32 = 24.0;

    /// Score awarded per bullet hit, plus the kill bonus on top
    pub const HIT_SCORE: u64 = 5;
    pub const KILL_SCORE: u64 = 15;

    /// Lives
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
    /// A life is restored every Nth wave
    pub const LIFE_BONUS_WAVES: u32 = 3;

    /// Power-up duration (~15 seconds at 60 Hz)
    pub const POWER_DURATION_TICKS: u32 = 900;
}
