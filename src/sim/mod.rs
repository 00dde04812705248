//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, no wall-clock reads
//! - Seeded RNG only
//! - No rendering, input or storage dependencies

pub mod geometry;
pub mod phase;
pub mod powerup;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{Rect, clamp, intersects, random_between};
pub use phase::{Command, GamePhase, Transition, Trigger};
pub use powerup::{apply_pickup, roll_drop, tick_timers};
pub use spawner::{build_wave, spawn_wave};
pub use state::{
    Bullet, Enemy, EnemyBullet, GameEvent, GameState, MovePattern, Pickup, PickupKind,
    PowerState, Ship,
};
pub use tick::{TickInput, fire, lose_life, tick};
