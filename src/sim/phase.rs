//! Game phase state machine
//!
//! Every phase change goes through [`GamePhase::transition`]. A trigger that
//! makes no sense in the current phase (e.g. `Resume` while `Ready`) resolves
//! to [`Transition::Stay`].

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Wave on the field, waiting for the first input
    #[default]
    Ready,
    /// Active gameplay (the only phase that ticks)
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    Over,
}

/// Discrete control commands from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    /// Pause button / "P" key: flips playing and paused, starts from ready,
    /// restarts after game over
    TogglePause,
}

/// Anything that can move the game between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Command(Command),
    /// A fire/movement/pointer intent
    Intent,
    /// A life-loss event emptied the lives counter
    OutOfLives,
}

impl From<Command> for Trigger {
    fn from(command: Command) -> Self {
        Trigger::Command(command)
    }
}

/// Outcome of feeding a trigger to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Ignore the trigger
    Stay,
    /// Switch phase, keeping all session and entity data
    To(GamePhase),
    /// Throw away the session and start a fresh one in `Playing`
    Restart,
}

impl GamePhase {
    /// The single transition table
    pub fn transition(self, trigger: impl Into<Trigger>) -> Transition {
        use GamePhase::*;
        use Trigger::{Intent, OutOfLives};

        match (self, trigger.into()) {
            (_, Trigger::Command(Command::Restart)) => Transition::Restart,
            (Ready, Trigger::Command(Command::Start | Command::TogglePause)) => {
                Transition::To(Playing)
            }
            (Playing, Trigger::Command(Command::Pause | Command::TogglePause)) => {
                Transition::To(Paused)
            }
            (Paused, Trigger::Command(Command::Resume | Command::TogglePause)) => {
                Transition::To(Playing)
            }
            (Over, Trigger::Command(Command::TogglePause)) => Transition::Restart,
            (Ready, Intent) => Transition::To(Playing),
            (Playing, OutOfLives) => Transition::To(Over),
            _ => Transition::Stay,
        }
    }

    /// Whether the simulation advances in this phase
    pub fn is_running(self) -> bool {
        self == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [GamePhase; 4] = [
        GamePhase::Ready,
        GamePhase::Playing,
        GamePhase::Paused,
        GamePhase::Over,
    ];

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            GamePhase::Ready.transition(Command::Start),
            Transition::To(GamePhase::Playing)
        );
        assert_eq!(
            GamePhase::Playing.transition(Command::Pause),
            Transition::To(GamePhase::Paused)
        );
        assert_eq!(
            GamePhase::Paused.transition(Command::Resume),
            Transition::To(GamePhase::Playing)
        );
    }

    #[test]
    fn test_restart_from_any_phase() {
        for phase in ALL_PHASES {
            assert_eq!(phase.transition(Command::Restart), Transition::Restart);
        }
    }

    #[test]
    fn test_invalid_commands_are_ignored() {
        assert_eq!(GamePhase::Ready.transition(Command::Resume), Transition::Stay);
        assert_eq!(GamePhase::Ready.transition(Command::Pause), Transition::Stay);
        assert_eq!(GamePhase::Paused.transition(Command::Pause), Transition::Stay);
        assert_eq!(GamePhase::Paused.transition(Command::Start), Transition::Stay);
        assert_eq!(GamePhase::Playing.transition(Command::Start), Transition::Stay);
        assert_eq!(GamePhase::Playing.transition(Command::Resume), Transition::Stay);
        assert_eq!(GamePhase::Over.transition(Command::Start), Transition::Stay);
        assert_eq!(GamePhase::Over.transition(Command::Resume), Transition::Stay);
    }

    #[test]
    fn test_toggle_pause() {
        assert_eq!(
            GamePhase::Playing.transition(Command::TogglePause),
            Transition::To(GamePhase::Paused)
        );
        assert_eq!(
            GamePhase::Paused.transition(Command::TogglePause),
            Transition::To(GamePhase::Playing)
        );
        assert_eq!(
            GamePhase::Ready.transition(Command::TogglePause),
            Transition::To(GamePhase::Playing)
        );
        assert_eq!(GamePhase::Over.transition(Command::TogglePause), Transition::Restart);
    }

    #[test]
    fn test_intents_only_start_from_ready() {
        assert_eq!(
            GamePhase::Ready.transition(Trigger::Intent),
            Transition::To(GamePhase::Playing)
        );
        assert_eq!(GamePhase::Paused.transition(Trigger::Intent), Transition::Stay);
        assert_eq!(GamePhase::Over.transition(Trigger::Intent), Transition::Stay);
        assert_eq!(GamePhase::Playing.transition(Trigger::Intent), Transition::Stay);
    }

    #[test]
    fn test_out_of_lives_ends_only_a_running_game() {
        assert_eq!(
            GamePhase::Playing.transition(Trigger::OutOfLives),
            Transition::To(GamePhase::Over)
        );
        for phase in [GamePhase::Ready, GamePhase::Paused, GamePhase::Over] {
            assert_eq!(phase.transition(Trigger::OutOfLives), Transition::Stay);
        }
    }

    #[test]
    fn test_only_playing_runs() {
        for phase in ALL_PHASES {
            assert_eq!(phase.is_running(), phase == GamePhase::Playing);
        }
    }
}
