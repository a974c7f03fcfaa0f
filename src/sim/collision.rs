//! Collision resolution
//!
//! Fixed order each tick: shield pickups, enemies, coins, then shots against
//! enemies. Retired entities never interact again in the same tick.

use glam::Vec2;

use super::geom::overlaps;
use super::player::HitOutcome;
use super::state::{GamePhase, GameState, ParticleColor};
use crate::consts::*;

/// Run every interaction for this tick
pub fn resolve_collisions(state: &mut GameState) {
    collect_shields(state);
    resolve_enemy_contacts(state);
    if state.phase != GamePhase::Playing {
        return;
    }
    collect_coins(state);
    resolve_projectile_hits(state);
}

fn collect_shields(state: &mut GameState) {
    let player = state.player.body;
    let mut picked = None;
    for shield in state.shields.live_mut() {
        if overlaps(&player, &shield.body) {
            shield.body.retire();
            picked = Some(shield.body.center());
        }
    }
    if let Some(at) = picked {
        state.player.pickup_shield();
        state.emit_particles(at, ParticleColor::Shield, 8);
        log::debug!("Shield picked up");
    }
}

fn resolve_enemy_contacts(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        let enemy = state.enemies.as_slice()[i].body;
        if enemy.retired || !overlaps(&state.player.body, &enemy) {
            continue;
        }

        if state.player.is_stomping(&enemy) {
            retire_enemy(state, i);
            state.player.stomp_bounce();
            state.add_score(STOMP_SCORE);
            state.emit_particles(enemy.center(), ParticleColor::Enemy, 15);
            log::debug!("Stomped enemy {}", enemy.id);
            continue;
        }

        let player_pos = state.player.body.pos;
        match state.player.take_hit() {
            HitOutcome::Absorbed => {
                retire_enemy(state, i);
                state.emit_particles(enemy.center(), ParticleColor::Shield, 10);
                log::debug!("Shield absorbed enemy {}", enemy.id);
            }
            HitOutcome::Ignored => {}
            HitOutcome::Damaged => {
                state.publish_lives();
                state.emit_particles(player_pos, ParticleColor::Enemy, 10);
                log::debug!("Hit by enemy {}, {} lives left", enemy.id, state.player.lives);
            }
            HitOutcome::Killed => {
                state.publish_lives();
                state.emit_particles(player_pos, ParticleColor::Player, 20);
                state.game_over();
                return;
            }
        }
    }
}

fn retire_enemy(state: &mut GameState, index: usize) {
    if let Some(enemy) = state.enemies.iter_mut().nth(index) {
        enemy.body.retire();
    }
}

fn collect_coins(state: &mut GameState) {
    let player = state.player.body;
    let mut collected: Vec<(Vec2, u64)> = Vec::new();
    for coin in state.coins.live_mut() {
        if overlaps(&player, &coin.body) {
            coin.body.retire();
            collected.push((coin.body.pos, coin.value));
        }
    }
    // One score event per coin
    for (at, value) in collected {
        state.add_score(value);
        state.emit_particles(at, ParticleColor::Coin, 5);
    }
}

fn resolve_projectile_hits(state: &mut GameState) {
    // (enemy centre) per kill, deferred so particles can borrow state
    let mut kills: Vec<Vec2> = Vec::new();
    for shot in state.projectiles.live_mut() {
        for enemy in state.enemies.live_mut() {
            if overlaps(&shot.body, &enemy.body) {
                shot.body.retire();
                enemy.body.retire();
                kills.push(enemy.body.center());
                break;
            }
        }
    }
    for at in kills {
        state.add_score(PROJECTILE_KILL_SCORE);
        state.emit_particles(at, ParticleColor::Enemy, 10);
    }
}
