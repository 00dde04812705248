//! Wave population
//!
//! Enemies drop in from above the playfield, one per randomly chosen lane.
//! Later waves bring more enemies that fall faster.

use glam::Vec2;
use rand::Rng;

use super::geometry::random_between;
use super::state::{Enemy, GameState, MovePattern};
use crate::consts::*;

/// Number of equal-width spawn lanes
pub const LANES: u32 = 10;
/// Enemies per wave: BASE + wave * PER_WAVE
pub const WAVE_BASE_ENEMIES: u32 = 8;
pub const WAVE_ENEMIES_PER_WAVE: u32 = 2;
/// Spawn height range (above the visible area so enemies stagger in)
pub const SPAWN_Y_MIN: f32 = -200.0;
pub const SPAWN_Y_MAX: f32 = -40.0;
/// Chance of a 3 HP enemy
pub const ARMORED_CHANCE: f64 = 0.15;
/// Descent speed range, plus a per-wave bonus
pub const ENEMY_SPEED_MIN: f32 = 1.6;
pub const ENEMY_SPEED_MAX: f32 = 2.8;
pub const ENEMY_SPEED_PER_WAVE: f32 = 0.1;
/// Chance an enemy weaves
pub const SINE_CHANCE: f64 = 0.4;
/// Upper bound of the random starting phase
pub const PHASE_SPREAD: f32 = 1000.0;

/// Number of enemies in a wave
pub fn wave_size(wave: u32) -> usize {
    (WAVE_BASE_ENEMIES + wave * WAVE_ENEMIES_PER_WAVE) as usize
}

/// Build the enemy set for a wave without touching any state
pub fn build_wave<R: Rng + ?Sized>(wave: u32, rng: &mut R) -> Vec<Enemy> {
    let lane_width = WORLD_WIDTH / LANES as f32;
    let speed_bonus = wave as f32 * ENEMY_SPEED_PER_WAVE;

    (0..wave_size(wave))
        .map(|_| {
            let lane = rng.random_range(0..LANES);
            let x = lane as f32 * lane_width + lane_width / 2.0 - ENEMY_WIDTH / 2.0;
            let y = random_between(rng, SPAWN_Y_MIN, SPAWN_Y_MAX);
            let hp = if rng.random_bool(ARMORED_CHANCE) { 3 } else { 2 };
            let vy = random_between(rng, ENEMY_SPEED_MIN, ENEMY_SPEED_MAX) + speed_bonus;
            let pattern = if rng.random_bool(SINE_CHANCE) {
                MovePattern::Sine
            } else {
                MovePattern::Straight
            };

            Enemy {
                pos: Vec2::new(x, y),
                size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
                hp,
                vy,
                pattern,
                phase: random_between(rng, 0.0, PHASE_SPREAD),
            }
        })
        .collect()
}

/// Clear the field and populate `state.wave`
pub fn spawn_wave(state: &mut GameState) {
    state.clear_entities();
    state.enemies = build_wave(state.wave, &mut state.rng);

    let armored = state.enemies.iter().filter(|e| e.hp == 3).count();
    log::info!(
        "Wave {}: {} enemies ({} armored)",
        state.wave,
        state.enemies.len(),
        armored
    );
}
