//! Player state machine
//!
//! Grounded/airborne, jump budget, lives, and the two timed statuses
//! (post-hit invincibility and the shield power-up).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Body;
use crate::consts::*;

/// What an enemy contact did to the player (stomps are resolved before this)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Shield took the hit; the enemy is destroyed
    Absorbed,
    /// Inside the invincibility window; nothing happens
    Ignored,
    /// Lost a life and survived
    Damaged,
    /// Lost the last life
    Killed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    /// Left the ground since the last landing
    pub airborne: bool,
    /// Jumps used since the last landing
    pub jump_count: u8,
    pub lives: u8,
    pub invincible: bool,
    pub invincibility_ticks: u32,
    pub shield_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body::new(
                0,
                Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT),
                Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            ),
            vel_y: 0.0,
            airborne: false,
            jump_count: 0,
            lives: INITIAL_LIVES,
            invincible: false,
            invincibility_ticks: 0,
            shield_ticks: 0,
        }
    }
}

impl Player {
    pub fn is_shielded(&self) -> bool {
        self.shield_ticks > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Standing on the ground line
    pub fn is_grounded(&self) -> bool {
        !self.airborne && (self.body.bottom() - GROUND_Y).abs() < f32::EPSILON
    }

    /// Try to jump. Returns false when the jump budget is spent.
    pub fn jump(&mut self) -> bool {
        if self.airborne && self.jump_count >= MAX_JUMPS {
            return false;
        }
        self.vel_y = JUMP_FORCE;
        self.airborne = true;
        self.jump_count = (self.jump_count + 1).min(MAX_JUMPS);
        true
    }

    /// Snap onto the ground line
    pub fn land(&mut self) {
        self.body.pos.y = GROUND_Y - self.body.size.y;
        self.vel_y = 0.0;
        self.airborne = false;
        self.jump_count = 0;
    }

    /// Bounce off a stomped enemy with one jump left in the budget
    pub fn stomp_bounce(&mut self) {
        self.vel_y = JUMP_FORCE * STOMP_BOUNCE;
        self.airborne = true;
        self.jump_count = 1;
    }

    /// Falling onto the upper part of `enemy`
    pub fn is_stomping(&self, enemy: &Body) -> bool {
        self.vel_y > 0.0 && self.body.bottom() < enemy.top() + enemy.size.y * 0.7
    }

    pub fn pickup_shield(&mut self) {
        self.shield_ticks = SHIELD_TICKS;
    }

    /// Resolve a non-stomp enemy contact
    pub fn take_hit(&mut self) -> HitOutcome {
        if self.is_shielded() {
            return HitOutcome::Absorbed;
        }
        if self.invincible {
            return HitOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return HitOutcome::Killed;
        }

        self.invincible = true;
        self.invincibility_ticks = INVINCIBILITY_TICKS;
        self.vel_y = HIT_KNOCKBACK;
        HitOutcome::Damaged
    }

    /// Count down status timers by one tick
    pub fn tick_timers(&mut self) {
        if self.invincibility_ticks > 0 {
            self.invincibility_ticks -= 1;
            if self.invincibility_ticks == 0 {
                self.invincible = false;
            }
        }
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
    }
}
