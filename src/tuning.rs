//! Spawn balance tunables
//!
//! Gameplay feel hangs on these numbers, so they live in one place and can be
//! overridden from JSON without recompiling.

use serde::{Deserialize, Serialize};

/// Cooldown-then-roll spawn rule shared by pits, coins and shields.
///
/// Each tick the class counter grows by one. Once it exceeds `cooldown_ticks`
/// a roll in `[0, 1)` greater than `roll_above` triggers a spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub cooldown_ticks: u32,
    pub roll_above: f32,
}

impl SpawnRule {
    pub const fn new(cooldown_ticks: u32, roll_above: f32) -> Self {
        Self {
            cooldown_ticks,
            roll_above,
        }
    }

    /// Counter is past the cooldown
    #[inline]
    pub fn ready(&self, counter: u32) -> bool {
        counter > self.cooldown_ticks
    }

    /// Roll in [0, 1) passes the threshold
    #[inline]
    pub fn passes(&self, roll: f32) -> bool {
        roll > self.roll_above
    }
}

/// Enemy cadence: threshold starts at `base_cooldown_ticks` and shrinks by one
/// tick per distance unit, never below `min_cooldown_ticks`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyRule {
    pub base_cooldown_ticks: u32,
    pub min_cooldown_ticks: u32,
    /// Chance roll above which the enemy flies
    pub flying_roll_above: f32,
    /// No enemy while the newest pit is closer than this to the right edge
    pub pit_clearance: f32,
}

impl EnemyRule {
    /// Cooldown for the current distance
    pub fn cooldown_at(&self, distance: f32) -> u32 {
        let shrink = distance.max(0.0) as u32;
        self.base_cooldown_ticks
            .saturating_sub(shrink)
            .max(self.min_cooldown_ticks)
    }
}

/// Full spawn configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance before pits and enemies appear
    pub safe_zone_distance: f32,
    pub pit: SpawnRule,
    pub pit_width_min: f32,
    pub pit_width_max: f32,
    pub enemy: EnemyRule,
    pub coin: SpawnRule,
    pub shield: SpawnRule,
    /// After a failed shield roll the counter restarts this far below the
    /// cooldown instead of at zero
    pub shield_retry_backoff: u32,
    /// Particle pool cap
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            safe_zone_distance: 25.0,
            pit: SpawnRule::new(200, 0.98),
            pit_width_min: 80.0,
            pit_width_max: 120.0,
            enemy: EnemyRule {
                base_cooldown_ticks: 120,
                min_cooldown_ticks: 60,
                flying_roll_above: 0.7,
                pit_clearance: 150.0,
            },
            coin: SpawnRule::new(40, 0.6),
            shield: SpawnRule::new(600, 0.7),
            shield_retry_backoff: 60,
            max_particles: 256,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fix inverted ranges so spawn math never sees an empty interval
    fn sanitized(mut self) -> Self {
        if self.pit_width_max < self.pit_width_min {
            std::mem::swap(&mut self.pit_width_min, &mut self.pit_width_max);
        }
        if self.enemy.min_cooldown_ticks > self.enemy.base_cooldown_ticks {
            self.enemy.min_cooldown_ticks = self.enemy.base_cooldown_ticks;
        }
        self.shield_retry_backoff = self.shield_retry_backoff.min(self.shield.cooldown_ticks);
        self
    }
}
