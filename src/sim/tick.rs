//! Frame driver
//!
//! One call to `tick` is one host frame. There is no fixed-timestep
//! decoupling: simulation speed follows the host's refresh rate.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::movement::advance_entities;
use super::physics::{Footing, advance_world, integrate_player};
use super::spawn::run_spawner;
use super::state::{GamePhase, GameState, ParticleColor};
use crate::consts::*;

/// Discrete player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    Shoot,
}

/// Input commands for a single tick, applied in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            commands: vec![Command::Jump],
        }
    }

    pub fn shoot() -> Self {
        Self {
            commands: vec![Command::Shoot],
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    for command in &input.commands {
        apply_command(state, *command);
    }

    advance_world(state);

    if integrate_player(state) == Footing::Void {
        // Falling out of the world ignores lives and shield
        state.player.lives = 0;
        state.publish_lives();
        state.game_over();
        return;
    }

    run_spawner(state);
    advance_entities(state);
    resolve_collisions(state);
    state.compact_pools();
}

fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::Jump => {
            if state.player.jump() {
                let feet = state.player.body.pos
                    + glam::Vec2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT);
                state.emit_particles(feet, ParticleColor::Dust, 5);
            }
        }
        Command::Shoot => state.spawn_projectile(),
    }
}
