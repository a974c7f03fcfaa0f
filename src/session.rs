//! Host-facing session
//!
//! Buffers input between frames, drives one tick per frame while Playing,
//! and publishes HUD values and game-over results to the UI layer.

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::sim::{Command, GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Values the HUD shows after every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub distance: u32,
    pub lives: u8,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            distance: state.display_distance(),
            lives: state.player.lives,
        }
    }
}

/// Output of one scheduled frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub hud: Hud,
    pub events: Vec<GameEvent>,
    /// Leaderboard rank if this frame ended a qualifying run
    pub rank: Option<usize>,
}

pub struct Session {
    state: GameState,
    /// Commands captured since the last frame
    pending: TickInput,
    high_scores: HighScores,
    runs: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            pending: TickInput::default(),
            high_scores: HighScores::new(),
            runs: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Enter Playing from the menu or after a game over
    pub fn start(&mut self) {
        self.pending.commands.clear();
        self.runs += 1;
        self.state.start();
    }

    /// Back to the menu with a clean run
    pub fn reset(&mut self) {
        self.pending.commands.clear();
        self.state.reset();
        self.state.phase = GamePhase::Menu;
    }

    /// Queue an action for the next frame. Ignored unless Playing.
    pub fn request(&mut self, command: Command) {
        if !self.state.is_playing() {
            log::debug!("Ignoring {:?} outside of play", command);
            return;
        }
        self.pending.commands.push(command);
    }

    pub fn jump(&mut self) {
        self.request(Command::Jump);
    }

    /// Shoot from any control surface (keyboard, touch button, remote "fire")
    pub fn fire(&mut self) {
        self.request(Command::Shoot);
    }

    /// Run one frame. Returns None without doing anything unless Playing,
    /// which is how the host knows to stop scheduling frames.
    pub fn frame(&mut self) -> Option<FrameReport> {
        if !self.state.is_playing() {
            return None;
        }

        let input = std::mem::take(&mut self.pending);
        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        let mut rank = None;
        for event in &events {
            if let GameEvent::GameOver {
                final_score,
                distance,
            } = *event
            {
                rank = self.high_scores.add_score(final_score, distance, self.runs);
                if let Some(rank) = rank {
                    log::info!("Run {} placed #{} with {}", self.runs, rank, final_score);
                }
            }
        }

        Some(FrameReport {
            hud: self.hud(),
            events,
            rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Body, Pit};
    use glam::Vec2;

    #[test]
    fn test_menu_frames_do_nothing() {
        let mut session = Session::new(1);
        assert_eq!(session.phase(), GamePhase::Menu);
        session.fire();
        session.jump();
        assert!(session.frame().is_none());
        assert_eq!(session.state().time_ticks, 0);
        assert!(session.state().projectiles.is_empty());
    }

    #[test]
    fn test_reset_from_menu_is_idempotent() {
        let mut session = Session::new(1);
        for _ in 0..5 {
            session.reset();
        }
        assert_eq!(
            session.hud(),
            Hud {
                score: 0,
                distance: 0,
                lives: INITIAL_LIVES
            }
        );
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_commands_apply_on_next_frame() {
        let mut session = Session::new(2);
        session.start();
        session.fire();
        assert!(session.state().projectiles.is_empty());
        let report = session.frame().unwrap();
        assert_eq!(session.state().projectiles.len(), 1);
        assert_eq!(report.hud.lives, INITIAL_LIVES);

        // Buffer was consumed
        session.frame();
        assert_eq!(session.state().projectiles.len(), 1);
    }

    #[test]
    fn test_game_over_halts_and_records_score() {
        let mut session = Session::new(3);
        session.start();
        session.state.add_score(60);
        let id = session.state.next_entity_id();
        session.state.pits.push(Pit {
            body: Body::new(
                id,
                Vec2::new(0.0, GROUND_Y),
                Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT - GROUND_Y),
            ),
        });
        session.state.speed = 0.0;

        let mut last = None;
        while let Some(report) = session.frame() {
            last = Some(report);
        }
        let last = last.unwrap();
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(last.hud.lives, 0);
        assert_eq!(last.rank, Some(1));
        assert!(last.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                final_score: 60,
                ..
            }
        )));
        assert_eq!(session.high_scores().top_score(), Some(60));

        // Input after the run is dropped
        session.fire();
        assert!(session.frame().is_none());

        // Restart clears the run but keeps the leaderboard
        session.start();
        assert_eq!(session.hud().score, 0);
        assert_eq!(session.high_scores().entries.len(), 1);
    }
}
