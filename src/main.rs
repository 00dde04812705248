//! Starlane headless host
//!
//! Drives a session without a window: an autopilot supplies the intents a
//! keyboard would, the loop runs one tick per frame until the run ends or the
//! frame cap is hit, and the final HUD values are printed.
//!
//! Usage: `starlane [seed] [max_frames]`

use starlane::consts::*;
use starlane::sim::{Command, GameEvent, GamePhase, GameState};
use starlane::{FileLeaderboard, HighScores, ScoreSink, Session, Settings, StoreError};

const SETTINGS_PATH: &str = "starlane.json";
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;

/// Leaderboard on disk, or in memory if the file can't be opened
enum Board {
    File(FileLeaderboard),
    Memory(HighScores),
}

impl Board {
    fn scores(&self) -> &HighScores {
        match self {
            Board::File(board) => board.scores(),
            Board::Memory(scores) => scores,
        }
    }
}

impl ScoreSink for Board {
    fn record(&mut self, name: &str, score: u64) -> Result<(), StoreError> {
        match self {
            Board::File(board) => board.record(name, score),
            Board::Memory(scores) => scores.record(name, score),
        }
    }
}

/// Steer toward the lowest enemy's lane and keep firing
fn autopilot<S: ScoreSink>(session: &mut Session<S>) {
    let state: &GameState = session.state();
    let ship_x = state.ship.pos.x;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.center().x);

    let (left, right) = match target {
        Some(x) if x < ship_x - SHIP_SPEED => (true, false),
        Some(x) if x > ship_x + SHIP_SPEED => (false, true),
        _ => (false, false),
    };
    session.set_move_left(left);
    session.set_move_right(right);
    session.set_firing(true);
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut settings = Settings::load_or_default(SETTINGS_PATH);
    if let Some(seed) = args.next().and_then(|s| s.parse().ok()) {
        settings.seed = Some(seed);
    }
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    let board = match FileLeaderboard::open(&settings.leaderboard_path, settings.leaderboard_capacity) {
        Ok(board) => {
            log::info!("Leaderboard at {}", board.path().display());
            Board::File(board)
        }
        Err(e) => {
            log::warn!("Leaderboard unavailable ({}), scores kept in memory", e);
            Board::Memory(HighScores::with_capacity(settings.leaderboard_capacity))
        }
    };

    let mut session = Session::new(&settings, board);
    session.command(Command::Start);

    let mut frames = 0;
    while frames < max_frames && session.phase() != GamePhase::Over {
        autopilot(&mut session);
        for event in session.frame() {
            if let GameEvent::WaveCleared { next_wave } = event {
                println!("wave {} cleared at frame {}", next_wave - 1, frames);
            }
        }
        frames += 1;
    }

    let snap = session.snapshot();
    let state = session.state();
    println!(
        "{:?} after {} frames: score {}, wave {}, lives {}, kills {}, escapes {}",
        snap.phase, frames, snap.score, snap.wave, snap.lives, state.kills, state.escapes
    );
    if let Some(top) = session.sink().scores().top_score() {
        println!("best on record: {}", top);
    }
}
