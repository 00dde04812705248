//! Session controller
//!
//! Owns the [`GameState`] and sits between the simulation and the host:
//! input layers call the intent/command handlers, the render loop calls
//! [`Session::frame`] (or [`Session::advance`]) and reads [`Session::snapshot`].

use rand::Rng;
use serde::Serialize;

use crate::consts::*;
use crate::highscores::ScoreSink;
use crate::settings::Settings;
use crate::sim::{
    Bullet, Command, Enemy, EnemyBullet, GameEvent, GamePhase, GameState, Pickup, Ship,
    TickInput, Transition, Trigger, tick,
};

/// Reset `state` to a fresh run on wave 1 and start playing
pub fn start_game(state: &mut GameState, seed: u64) {
    *state = GameState::new(seed);
    state.phase = GamePhase::Playing;
    log::info!("Session started (seed {})", seed);
}

/// Read-only view of everything a renderer draws
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    pub wide_shot: bool,
    pub rapid_fire: bool,
    pub ship: &'a Ship,
    pub bullets: &'a [Bullet],
    pub enemy_bullets: &'a [EnemyBullet],
    pub enemies: &'a [Enemy],
    pub pickups: &'a [Pickup],
}

impl Snapshot<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One play session with its score hook
pub struct Session<S: ScoreSink> {
    state: GameState,
    input: TickInput,
    player_name: String,
    sink: S,
    accumulator: f32,
}

impl<S: ScoreSink> Session<S> {
    /// New session in `Ready`, wave 1 already on the field
    pub fn new(settings: &Settings, sink: S) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            player_name: settings.display_name(),
            sink,
            accumulator: 0.0,
        }
    }

    /// Fresh run, reseeded from the current run's generator
    pub fn start_game(&mut self) {
        let seed = self.state.rng.random();
        start_game(&mut self.state, seed);
        self.input.target_x = None;
        self.accumulator = 0.0;
    }

    /// Feed a control command through the phase state machine
    pub fn command(&mut self, command: Command) {
        match self.state.phase.transition(command) {
            Transition::Stay => {}
            Transition::To(phase) => {
                log::debug!("{:?} -> {:?}", self.state.phase, phase);
                self.state.phase = phase;
            }
            Transition::Restart => self.start_game(),
        }
    }

    pub fn set_move_left(&mut self, held: bool) {
        self.input.move_left = held;
        if held {
            self.wake();
        }
    }

    pub fn set_move_right(&mut self, held: bool) {
        self.input.move_right = held;
        if held {
            self.wake();
        }
    }

    pub fn set_firing(&mut self, held: bool) {
        self.input.firing = held;
        if held {
            self.wake();
        }
    }

    /// Pointer/drag position in playfield coordinates, applied on the next tick
    pub fn point_at(&mut self, x: f32) {
        self.input.target_x = Some(x);
        self.wake();
    }

    /// First intent leaves `Ready`
    fn wake(&mut self) {
        if let Transition::To(phase) = self.state.phase.transition(Trigger::Intent) {
            self.state.phase = phase;
        }
    }

    /// Run one tick if playing; returns the tick's events
    pub fn frame(&mut self) -> Vec<GameEvent> {
        if !self.state.phase.is_running() {
            return Vec::new();
        }

        tick(&mut self.state, &self.input);
        self.input.target_x = None;

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { score } = *event {
                self.persist(score);
            }
        }
        events
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        if !self.state.phase.is_running() {
            self.accumulator = 0.0;
            return Vec::new();
        }

        if dt.is_finite() {
            self.accumulator += dt.clamp(0.0, 0.1);
        }

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.frame());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        events
    }

    fn persist(&mut self, score: u64) {
        if let Err(e) = self.sink.record(&self.player_name, score) {
            log::warn!("Could not save score {}: {}", score, e);
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            wave: state.wave,
            wide_shot: state.power.wide_shot,
            rapid_fire: state.power.rapid_fire,
            ship: &state.ship,
            bullets: &state.bullets,
            enemy_bullets: &state.enemy_bullets,
            enemies: &state.enemies,
            pickups: &state.pickups,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
