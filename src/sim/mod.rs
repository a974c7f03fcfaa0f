//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each pool)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod movement;
pub mod physics;
pub mod player;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geom::{Body, overlaps};
pub use player::{HitOutcome, Player};
pub use pool::{Entity, Pool};
pub use state::{
    Cloud, Coin, Enemy, EnemyKind, ExpenseLabel, GameEvent, GamePhase, GameState, Particle,
    ParticleColor, Pit, PlayerView, Projectile, ShieldPickup, Snapshot, SpawnCounters,
};
pub use tick::{Command, TickInput, tick};
