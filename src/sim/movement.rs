//! Per-tick entity movement and off-screen retirement

use glam::Vec2;

use super::pool::{Entity, Pool};
use super::state::{
    Cloud, Coin, Enemy, GameState, PARTICLE_DECAY, Particle, Pit, Projectile, ShieldPickup,
};
use crate::consts::*;

/// How a pool member travels each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Fixed to the ground; moves left with the world scroll
    Scroll,
    /// Moves left at its own speed
    Advance(f32),
    /// Flies right at its own speed (player shots)
    Launched(f32),
    /// Free drift in both axes
    Drift(Vec2),
    /// Background layer at a fraction of the scroll speed; wraps around
    Parallax(f32),
}

/// What to do with an entity after it moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Stay,
    Retire,
    Wrap,
}

/// Clouds wrap once this far past the left edge
const CLOUD_WRAP_MARGIN: f32 = 50.0;

pub trait Moves: Entity {
    fn motion(&self) -> Motion;

    /// Per-tick aging. Returns true when the entity has expired.
    fn age(&mut self) -> bool {
        false
    }
}

impl Moves for Pit {
    fn motion(&self) -> Motion {
        Motion::Scroll
    }
}

impl Moves for Coin {
    fn motion(&self) -> Motion {
        Motion::Scroll
    }
}

impl Moves for ShieldPickup {
    fn motion(&self) -> Motion {
        Motion::Scroll
    }
}

impl Moves for Enemy {
    fn motion(&self) -> Motion {
        Motion::Advance(self.speed)
    }
}

impl Moves for Projectile {
    fn motion(&self) -> Motion {
        Motion::Launched(self.speed)
    }
}

impl Moves for Particle {
    fn motion(&self) -> Motion {
        Motion::Drift(self.vel)
    }

    fn age(&mut self) -> bool {
        self.life = (self.life - PARTICLE_DECAY).max(0.0);
        self.life <= 0.0
    }
}

impl Moves for Cloud {
    fn motion(&self) -> Motion {
        Motion::Parallax(self.speed_factor)
    }
}

fn leave_if(gone: bool, exit: Exit) -> Exit {
    if gone { exit } else { Exit::Stay }
}

/// Move one entity and decide whether it leaves the field
pub fn step<T: Moves>(entity: &mut T, scroll_speed: f32) -> Exit {
    let motion = entity.motion();
    let body = entity.body_mut();
    let exit = match motion {
        Motion::Scroll => {
            body.pos.x -= scroll_speed;
            leave_if(body.is_left_of_view(), Exit::Retire)
        }
        Motion::Advance(speed) => {
            body.pos.x -= speed;
            leave_if(body.is_left_of_view(), Exit::Retire)
        }
        Motion::Launched(speed) => {
            body.pos.x += speed;
            leave_if(body.left() > CANVAS_WIDTH, Exit::Retire)
        }
        Motion::Drift(vel) => {
            body.pos += vel;
            Exit::Stay
        }
        Motion::Parallax(factor) => {
            body.pos.x -= scroll_speed * factor;
            leave_if(body.right() + CLOUD_WRAP_MARGIN < 0.0, Exit::Wrap)
        }
    };

    if exit == Exit::Stay && entity.age() {
        Exit::Retire
    } else {
        exit
    }
}

/// Advance every live member of a pool, retiring leavers and handing
/// wrapping members to `on_wrap`
pub fn advance_pool<T: Moves>(
    pool: &mut Pool<T>,
    scroll_speed: f32,
    mut on_wrap: impl FnMut(&mut T),
) {
    for entity in pool.live_mut() {
        match step(entity, scroll_speed) {
            Exit::Stay => {}
            Exit::Retire => entity.retire(),
            Exit::Wrap => on_wrap(entity),
        }
    }
}

/// Move everything except the player
pub fn advance_entities(state: &mut GameState) {
    let speed = state.speed;

    advance_pool(&mut state.pits, speed, |_| {});
    advance_pool(&mut state.projectiles, speed, |_| {});
    advance_pool(&mut state.enemies, speed, |_| {});
    advance_pool(&mut state.coins, speed, |_| {});
    advance_pool(&mut state.shields, speed, |_| {});
    advance_pool(&mut state.particles, speed, |_| {});

    // Bob before wrapping so a wrapped cloud re-enters on its baseline
    let t = state.time_ticks as f32 / FRAMES_PER_SECOND;
    for cloud in state.clouds.live_mut() {
        cloud.body.pos.y = cloud.base_y + (t + cloud.body.id as f32).sin() * 5.0;
    }

    let rng = &mut state.rng;
    advance_pool(&mut state.clouds, speed, |cloud| {
        cloud.body.pos.x = CANVAS_WIDTH + CLOUD_WRAP_MARGIN;
        cloud.base_y = GameState::random_cloud_y(rng);
        cloud.body.pos.y = cloud.base_y;
    });
}
