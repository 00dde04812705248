//! Per-tick simulation step
//!
//! Core game loop that advances the simulation deterministically, one tick per
//! host frame. Order within a tick matters (it decides which collisions win):
//! ship, bullets, enemies, falling objects, bullet hits, ship hits, buff
//! timers, wave clear.

use glam::Vec2;
use rand::Rng;

use super::geometry::intersects;
use super::phase::{GamePhase, Transition, Trigger};
use super::powerup::{apply_pickup, roll_drop, tick_timers};
use super::spawner::spawn_wave;
use super::state::{Bullet, EnemyBullet, GameEvent, GameState, MovePattern};
use crate::consts::*;

/// Bullets spawn this far from the ship center
const MUZZLE_OFFSET: Vec2 = Vec2::new(-2.0, -18.0);
/// Angled bullet drift: x += sin(ticks * FREQ) * angle * SCALE
const DRIFT_FREQUENCY: f32 = 0.05;
const DRIFT_SCALE: f32 = 9.0;

/// Enemy sine weave
const PHASE_STEP: f32 = 0.05;
const SINE_AMPLITUDE: f32 = 1.6;

/// Per-tick enemy fire chance: BASE + wave * PER_WAVE
const ENEMY_FIRE_BASE: f64 = 0.01;
const ENEMY_FIRE_PER_WAVE: f64 = 0.0015;
/// Enemy bullet speed: BASE + wave * PER_WAVE
const ENEMY_BULLET_SPEED: f32 = 4.0;
const ENEMY_BULLET_SPEED_PER_WAVE: f32 = 0.1;

/// Removal thresholds past the playfield edges
const BULLET_EXIT_Y: f32 = -20.0;
const ENEMY_EXIT_MARGIN: f32 = 40.0;
const ENEMY_BULLET_EXIT_MARGIN: f32 = 20.0;
const PICKUP_EXIT_MARGIN: f32 = 30.0;

/// Player intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held left (keyboard)
    pub move_left: bool,
    /// Held right (keyboard)
    pub move_right: bool,
    /// Fire held (space/click/touch)
    pub firing: bool,
    /// Absolute ship x from pointer/drag, in playfield coordinates.
    /// Overrides the held directions when present.
    pub target_x: Option<f32>,
}

/// Advance the game state by one tick
///
/// No-op outside [`GamePhase::Playing`]: entities stay frozen.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.phase.is_running() {
        return;
    }

    state.time_ticks += 1;

    move_ship(state, input);
    if input.firing {
        fire(state);
    }
    state.ship.cooldown = state.ship.cooldown.saturating_sub(1);

    advance_bullets(state);
    advance_enemies(state);
    advance_falling(state);

    resolve_bullet_hits(state);
    resolve_ship_hits(state);

    // The run ended this tick; leave the field as it was at the final hit
    if state.phase == GamePhase::Over {
        return;
    }

    tick_timers(&mut state.power);
    check_wave_clear(state);
}

fn move_ship(state: &mut GameState, input: &TickInput) {
    if let Some(x) = input.target_x {
        state.ship.set_x(x);
        return;
    }
    let dx = input.move_right as i32 - input.move_left as i32;
    let x = state.ship.pos.x + dx as f32 * state.ship.speed;
    state.ship.set_x(x);
}

/// Fire the ship's weapon if it is off cooldown
///
/// One bullet straight up, or a three-way spread with wide shot active.
pub fn fire(state: &mut GameState) {
    if state.ship.cooldown > 0 {
        return;
    }
    state.ship.cooldown = if state.power.rapid_fire {
        RAPID_FIRE_COOLDOWN
    } else {
        FIRE_COOLDOWN
    };

    let origin = state.ship.pos + MUZZLE_OFFSET;
    let spread: &[f32] = if state.power.wide_shot {
        &[-WIDE_SHOT_ANGLE, 0.0, WIDE_SHOT_ANGLE]
    } else {
        &[0.0]
    };
    state.bullets.extend(spread.iter().map(|&angle| Bullet {
        pos: origin,
        vy: -BULLET_SPEED,
        angle,
    }));
}

fn advance_bullets(state: &mut GameState) {
    let drift = (state.time_ticks as f32 * DRIFT_FREQUENCY).sin() * DRIFT_SCALE;
    state.bullets.retain_mut(|bullet| {
        bullet.pos.y += bullet.vy;
        if bullet.angle != 0.0 {
            bullet.pos.x += drift * bullet.angle;
        }
        bullet.pos.y >= BULLET_EXIT_Y
    });
}

/// Per-enemy, per-tick chance to fire on `wave`
fn enemy_fire_chance(wave: u32) -> f64 {
    (ENEMY_FIRE_BASE + wave as f64 * ENEMY_FIRE_PER_WAVE).min(1.0)
}

fn enemy_shot_speed(wave: u32) -> f32 {
    ENEMY_BULLET_SPEED + wave as f32 * ENEMY_BULLET_SPEED_PER_WAVE
}

fn advance_enemies(state: &mut GameState) {
    let GameState {
        enemies,
        enemy_bullets,
        rng,
        events,
        escapes,
        wave,
        ..
    } = state;

    let fire_chance = enemy_fire_chance(*wave);
    let shot_speed = enemy_shot_speed(*wave);

    enemies.retain_mut(|enemy| {
        enemy.phase += PHASE_STEP;
        if enemy.pattern == MovePattern::Sine {
            enemy.pos.x += enemy.phase.sin() * SINE_AMPLITUDE;
        }
        enemy.pos.y += enemy.vy;

        if rng.random_bool(fire_chance) {
            enemy_bullets.push(EnemyBullet {
                pos: Vec2::new(enemy.pos.x + enemy.size.x / 2.0 - 2.0, enemy.pos.y + enemy.size.y),
                vy: shot_speed,
            });
        }

        if enemy.pos.y > WORLD_HEIGHT + ENEMY_EXIT_MARGIN {
            *escapes += 1;
            events.push(GameEvent::EnemyEscaped);
            false
        } else {
            true
        }
    });
}

fn advance_falling(state: &mut GameState) {
    state.enemy_bullets.retain_mut(|bullet| {
        bullet.pos.y += bullet.vy;
        bullet.pos.y <= WORLD_HEIGHT + ENEMY_BULLET_EXIT_MARGIN
    });
    state.pickups.retain_mut(|pickup| {
        pickup.pos.y += pickup.vy;
        pickup.pos.y <= WORLD_HEIGHT + PICKUP_EXIT_MARGIN
    });
}

/// Player bullets vs enemies
///
/// Each enemy absorbs at most one bullet per tick: the newest intersecting
/// bullet is consumed and the search for that enemy stops. A hit scores
/// `HIT_SCORE`; the killing hit adds `KILL_SCORE` on top.
fn resolve_bullet_hits(state: &mut GameState) {
    let GameState {
        enemies,
        bullets,
        pickups,
        rng,
        events,
        score,
        kills,
        ..
    } = state;

    enemies.retain_mut(|enemy| {
        let bounds = enemy.bounds();
        let Some(hit) = bullets
            .iter()
            .rposition(|b| intersects(&b.bounds(), &bounds))
        else {
            return true;
        };

        bullets.remove(hit);
        enemy.hp = enemy.hp.saturating_sub(1);
        *score += HIT_SCORE;
        let center = enemy.center();
        events.push(GameEvent::EnemyHit { pos: center });

        if enemy.hp > 0 {
            return true;
        }

        if let Some(pickup) = roll_drop(rng, center) {
            events.push(GameEvent::PickupDropped { kind: pickup.kind });
            pickups.push(pickup);
        }
        *score += KILL_SCORE;
        *kills += 1;
        events.push(GameEvent::EnemyDestroyed { pos: center });
        false
    });
}

/// Ship vs enemy bullets, enemies and pickups
///
/// The ship's hit box is taken once, before any hit recenters it.
fn resolve_ship_hits(state: &mut GameState) {
    let ship_box = state.ship.bounds();

    let before = state.enemy_bullets.len();
    state
        .enemy_bullets
        .retain(|b| !intersects(&ship_box, &b.bounds()));
    let shot = before - state.enemy_bullets.len();

    let before = state.enemies.len();
    state.enemies.retain(|e| !intersects(&ship_box, &e.bounds()));
    let rammed = before - state.enemies.len();

    for _ in 0..shot + rammed {
        lose_life(state);
    }

    let mut collected = Vec::new();
    state.pickups.retain(|pickup| {
        if intersects(&ship_box, &pickup.bounds()) {
            collected.push(pickup.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        log::debug!("Picked up {:?}", kind);
        apply_pickup(state, kind);
    }
}

/// Life-loss event
///
/// Losing the last life ends the run and raises [`GameEvent::GameOver`]
/// exactly once; otherwise the ship is recentered. Ignored unless playing.
pub fn lose_life(state: &mut GameState) {
    if !state.phase.is_running() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost { lives: state.lives });
    log::debug!("Life lost, {} remaining", state.lives);

    if state.lives > 0 {
        state.ship.recenter();
        return;
    }

    if let Transition::To(next) = state.phase.transition(Trigger::OutOfLives) {
        state.phase = next;
    }
    log::info!(
        "Game over: score {} on wave {} ({} kills)",
        state.score,
        state.wave,
        state.kills
    );
    state.events.push(GameEvent::GameOver { score: state.score });
}

fn check_wave_clear(state: &mut GameState) {
    if !state.enemies.is_empty() {
        return;
    }

    state.wave += 1;
    state.events.push(GameEvent::WaveCleared {
        next_wave: state.wave,
    });
    spawn_wave(state);

    if state.wave % LIFE_BONUS_WAVES == 0 {
        state.lives = (state.lives + 1).min(MAX_LIVES);
    }
}
