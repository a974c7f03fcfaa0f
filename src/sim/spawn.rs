//! Procedural spawner
//!
//! Each class keeps its own frame counter. Pits and enemies wait for the safe
//! zone; coins and shields spawn from the first tick.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::geom::Body;
use super::state::{Coin, Enemy, EnemyKind, ExpenseLabel, GameState, Pit, ShieldPickup};
use crate::consts::*;

/// Coin heights: high band needs a jump, low band is picked up running
const COIN_HIGH_Y: f32 = GROUND_Y - 150.0;
const COIN_LOW_Y: f32 = GROUND_Y - 40.0;
const SHIELD_Y: f32 = GROUND_Y - 120.0;

/// Run every spawn decision for this tick
pub fn run_spawner(state: &mut GameState) {
    if state.distance > state.tuning.safe_zone_distance {
        spawn_pits(state);
        spawn_enemies(state);
    }
    spawn_coins(state);
    spawn_shields(state);
}

fn spawn_pits(state: &mut GameState) {
    state.counters.pit += 1;
    let rule = state.tuning.pit;
    if !rule.ready(state.counters.pit) || !rule.passes(state.rng.random()) {
        return;
    }
    state.counters.pit = 0;

    let (min, max) = (state.tuning.pit_width_min, state.tuning.pit_width_max);
    let width = if max > min {
        state.rng.random_range(min..max)
    } else {
        min
    };
    let id = state.next_entity_id();
    state.pits.push(Pit {
        body: Body::new(
            id,
            Vec2::new(CANVAS_WIDTH, GROUND_Y),
            Vec2::new(width, CANVAS_HEIGHT - GROUND_Y),
        ),
    });
    log::debug!("Pit {} spawned, width {:.0}", id, width);
}

/// Newest pit has scrolled far enough from the right edge
fn clear_of_fresh_pit(state: &GameState) -> bool {
    state
        .pits
        .last()
        .is_none_or(|pit| pit.body.pos.x < CANVAS_WIDTH - state.tuning.enemy.pit_clearance)
}

fn spawn_enemies(state: &mut GameState) {
    state.counters.enemy += 1;
    let rule = state.tuning.enemy;
    if !clear_of_fresh_pit(state) || state.counters.enemy <= rule.cooldown_at(state.distance) {
        return;
    }
    state.counters.enemy = 0;

    let label = *ExpenseLabel::ALL
        .choose(&mut state.rng)
        .unwrap_or(&ExpenseLabel::Tax);
    let kind = if state.rng.random::<f32>() > rule.flying_roll_above {
        EnemyKind::Flying
    } else {
        EnemyKind::Ground
    };
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        body: Body::new(
            id,
            Vec2::new(CANVAS_WIDTH, kind.spawn_y()),
            Vec2::splat(ENEMY_SIZE),
        ),
        speed: state.speed,
        label,
        kind,
    });
    log::debug!("Enemy {} spawned: {:?} {:?}", id, kind, label);
}

fn spawn_coins(state: &mut GameState) {
    state.counters.coin += 1;
    let rule = state.tuning.coin;
    if !rule.ready(state.counters.coin) || !rule.passes(state.rng.random()) {
        return;
    }
    state.counters.coin = 0;

    let y = if state.rng.random_bool(0.5) {
        COIN_HIGH_Y
    } else {
        COIN_LOW_Y
    };
    let phase = state.rng.random_range(0.0..std::f32::consts::TAU);
    let id = state.next_entity_id();
    state.coins.push(Coin {
        body: Body::new(id, Vec2::new(CANVAS_WIDTH, y), Vec2::splat(COIN_SIZE)),
        value: COIN_VALUE,
        phase,
    });
}

fn spawn_shields(state: &mut GameState) {
    state.counters.shield += 1;
    let rule = state.tuning.shield;
    if !rule.ready(state.counters.shield) {
        return;
    }
    if !rule.passes(state.rng.random()) {
        // Retry soon, but off the cooldown's beat
        state.counters.shield = rule
            .cooldown_ticks
            .saturating_sub(state.tuning.shield_retry_backoff);
        return;
    }
    state.counters.shield = 0;

    let phase = state.rng.random_range(0.0..std::f32::consts::TAU);
    let id = state.next_entity_id();
    state.shields.push(ShieldPickup {
        body: Body::new(id, Vec2::new(CANVAS_WIDTH, SHIELD_Y), Vec2::splat(SHIELD_SIZE)),
        phase,
    });
    log::debug!("Shield {} spawned", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::SpawnRule;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_nothing_hostile_inside_safe_zone() {
        let mut state = playing(1);
        for _ in 0..2000 {
            run_spawner(&mut state);
        }
        assert!(state.pits.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.counters.pit, 0);
        assert_eq!(state.counters.enemy, 0);
        assert!(!state.coins.is_empty());
    }

    #[test]
    fn test_coin_respects_cooldown_and_bands() {
        let mut state = playing(2);
        for _ in 0..40 {
            run_spawner(&mut state);
        }
        assert!(state.coins.is_empty());
        for _ in 0..500 {
            run_spawner(&mut state);
        }
        assert!(!state.coins.is_empty());
        for coin in &state.coins {
            assert!(coin.body.pos.y == COIN_HIGH_Y || coin.body.pos.y == COIN_LOW_Y);
            assert_eq!(coin.value, COIN_VALUE);
            assert_eq!(coin.body.pos.x, CANVAS_WIDTH);
        }
    }

    #[test]
    fn test_enemy_spawns_after_cooldown() {
        let mut state = playing(3);
        state.distance = 30.0;
        let cooldown = state.tuning.enemy.cooldown_at(30.0);
        for _ in 0..cooldown {
            spawn_enemies(&mut state);
        }
        assert!(state.enemies.is_empty());
        spawn_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.counters.enemy, 0);

        let enemy = state.enemies.last().unwrap();
        assert_eq!(enemy.body.pos.y, enemy.kind.spawn_y());
        assert_eq!(enemy.speed, state.speed);
    }

    #[test]
    fn test_fresh_pit_suppresses_enemy() {
        let mut state = playing(4);
        state.distance = 100.0;
        let id = state.next_entity_id();
        state.pits.push(Pit {
            body: Body::new(id, Vec2::new(CANVAS_WIDTH - 100.0, GROUND_Y), Vec2::new(90.0, 60.0)),
        });
        for _ in 0..500 {
            spawn_enemies(&mut state);
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.counters.enemy, 500);

        // Pit scrolls clear: the overdue enemy appears immediately
        state.pits.iter_mut().next().unwrap().body.pos.x = CANVAS_WIDTH - 200.0;
        spawn_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_pit_width_within_range() {
        let mut state = playing(5);
        state.tuning.pit = SpawnRule::new(0, -1.0);
        for _ in 0..50 {
            spawn_pits(&mut state);
        }
        assert_eq!(state.pits.len(), 50);
        for pit in &state.pits {
            assert!(pit.body.size.x >= 80.0 && pit.body.size.x < 120.0);
            assert_eq!(pit.body.pos, Vec2::new(CANVAS_WIDTH, GROUND_Y));
        }
    }

    #[test]
    fn test_failed_shield_roll_desyncs_counter() {
        let mut state = playing(6);
        // Roll can never pass
        state.tuning.shield = SpawnRule::new(600, 1.0);
        state.counters.shield = 600;
        spawn_shields(&mut state);
        assert!(state.shields.is_empty());
        assert_eq!(state.counters.shield, 540);

        // Always passes
        state.tuning.shield = SpawnRule::new(600, -1.0);
        state.counters.shield = 600;
        spawn_shields(&mut state);
        assert_eq!(state.shields.len(), 1);
        assert_eq!(state.counters.shield, 0);
    }

    #[test]
    fn test_same_seed_same_course() {
        let mut a = playing(77);
        let mut b = playing(77);
        a.distance = 50.0;
        b.distance = 50.0;
        for _ in 0..3000 {
            run_spawner(&mut a);
            run_spawner(&mut b);
        }
        let xs = |s: &GameState| -> Vec<f32> { s.pits.iter().map(|p| p.body.size.x).collect() };
        assert_eq!(xs(&a), xs(&b));
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.coins.len(), b.coins.len());
    }
}
