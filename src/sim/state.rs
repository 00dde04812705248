//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]. Renderers only read it,
//! input layers never touch it directly (they write a `TickInput`).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp};
use super::phase::GamePhase;
use super::spawner::spawn_wave;
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Center of the ship
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed per tick while a direction is held
    pub speed: f32,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(WORLD_WIDTH / 2.0, SHIP_Y),
            size: Vec2::new(SHIP_WIDTH, SHIP_HEIGHT),
            speed: SHIP_SPEED,
            cooldown: 0,
        }
    }
}

impl Ship {
    /// Hit box (centered on the ship)
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Move to `x`, bounded to the playfield
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = clamp(x, SHIP_MARGIN, WORLD_WIDTH - SHIP_MARGIN);
    }

    /// Snap back to the horizontal center (soft reset after a hit)
    pub fn recenter(&mut self) {
        self.pos.x = WORLD_WIDTH / 2.0;
    }
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Vertical velocity (negative = upward)
    pub vy: f32,
    /// Spread angle; non-zero bullets drift sideways over their lifetime
    pub angle: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// A bullet fired by an enemy (always falls)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vy: f32,
}

impl EnemyBullet {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// Enemy horizontal movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePattern {
    Straight,
    /// Weaves left and right driven by the enemy's phase counter
    Sine,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Hit points (2, or 3 for armored enemies)
    pub hp: u8,
    /// Descent per tick
    pub vy: f32,
    pub pattern: MovePattern,
    /// Sine phase, advanced every tick
    pub phase: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Three-way spread shot
    Wide,
    /// Halved fire cooldown
    Rapid,
    /// Clears every enemy bullet on the field
    Bomb,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Wide, PickupKind::Rapid, PickupKind::Bomb];
}

/// Pickup hit box edge length
pub const PICKUP_SIZE: f32 = 18.0;

/// A falling power-up dropped by a destroyed enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    /// Center of the pickup
    pub pos: Vec2,
    pub vy: f32,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(PICKUP_SIZE))
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerState {
    pub wide_shot: bool,
    pub rapid_fire: bool,
    pub wide_ticks: u32,
    pub rapid_ticks: u32,
}

/// Things that happened during a tick, for audio/FX and the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    EnemyHit { pos: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    /// Enemy left through the bottom edge without being destroyed
    EnemyEscaped,
    PickupDropped { kind: PickupKind },
    PickupCollected { kind: PickupKind },
    LifeLost { lives: u8 },
    WaveCleared { next_wave: u32 },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives every spawn, drop and enemy-fire roll
    #[serde(skip)]
    pub rng: Pcg32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Player lives (0..=MAX_LIVES)
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub power: PowerState,
    /// Enemies destroyed by the player this session
    pub kills: u32,
    /// Enemies that left through the bottom edge this session
    pub escapes: u32,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the `Ready` phase with wave 1 already on the field
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            wave: 1,
            lives: START_LIVES,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Ready,
            ship: Ship::default(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            power: PowerState::default(),
            kills: 0,
            escapes: 0,
            events: Vec::new(),
        };

        spawn_wave(&mut state);

        state
    }

    /// Drop every transient entity (bullets, enemies, pickups)
    pub fn clear_entities(&mut self) {
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.pickups.clear();
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
