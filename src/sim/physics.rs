//! World scroll and player physics

use super::state::GameState;
use crate::consts::*;

/// Result of integrating the player for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footing {
    /// Resting on (or snapped back onto) the ground
    Landed,
    /// In the air or dropping through a pit
    Falling,
    /// Below the playfield: the run is over
    Void,
}

/// Accumulate distance and ramp the scroll speed
pub fn advance_world(state: &mut GameState) {
    state.distance += state.speed * DISTANCE_PER_PIXEL;

    if state.time_ticks > 0
        && state.time_ticks % SPEED_RAMP_INTERVAL == 0
        && state.speed < GAME_SPEED_MAX
    {
        state.speed = (state.speed + SPEED_STEP).min(GAME_SPEED_MAX);
        log::info!(
            "Speed up to {:.1} at distance {}",
            state.speed,
            state.display_distance()
        );
    }
}

/// Is any pit open under horizontal position `x`
pub fn over_pit(state: &GameState, x: f32) -> bool {
    state.pits.iter().any(|pit| pit.spans(x))
}

/// Gravity, timers and ground resolution for the player
pub fn integrate_player(state: &mut GameState) -> Footing {
    let player = &mut state.player;
    player.vel_y += GRAVITY;
    player.body.pos.y += player.vel_y;
    player.tick_timers();

    let foot_y = state.player.body.bottom();
    let center_x = state.player.body.center().x;
    let over_pit = over_pit(state, center_x);
    let deep_in_hole = foot_y > GROUND_Y + GROUND_TOLERANCE;

    let player = &mut state.player;
    if foot_y > GROUND_Y && !over_pit && !deep_in_hole {
        player.land();
    }

    if player.body.top() > CANVAS_HEIGHT {
        Footing::Void
    } else if player.airborne || player.body.bottom() > GROUND_Y {
        Footing::Falling
    } else {
        Footing::Landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Body;
    use crate::sim::state::Pit;
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        state
    }

    fn open_pit_under_player(state: &mut GameState) {
        let id = state.next_entity_id();
        state.pits.push(Pit {
            body: Body::new(
                id,
                Vec2::new(PLAYER_START_X - 20.0, GROUND_Y),
                Vec2::new(100.0, CANVAS_HEIGHT - GROUND_Y),
            ),
        });
    }

    #[test]
    fn test_distance_accumulates() {
        let mut state = playing();
        for _ in 0..30 {
            state.time_ticks += 1;
            advance_world(&mut state);
        }
        // 30 ticks * 5 px * 0.01
        assert!((state.distance - 1.5).abs() < 1e-4);
        assert_eq!(state.display_distance(), 1);
    }

    #[test]
    fn test_speed_ramps_and_caps() {
        let mut state = playing();
        state.time_ticks = SPEED_RAMP_INTERVAL;
        advance_world(&mut state);
        assert_eq!(state.speed, GAME_SPEED_START + SPEED_STEP);

        state.time_ticks += 1;
        advance_world(&mut state);
        assert_eq!(state.speed, GAME_SPEED_START + SPEED_STEP);

        state.speed = GAME_SPEED_MAX - 0.1;
        state.time_ticks = SPEED_RAMP_INTERVAL * 9;
        advance_world(&mut state);
        assert_eq!(state.speed, GAME_SPEED_MAX);
        state.time_ticks = SPEED_RAMP_INTERVAL * 10;
        advance_world(&mut state);
        assert_eq!(state.speed, GAME_SPEED_MAX);
    }

    #[test]
    fn test_resting_player_stays_grounded() {
        let mut state = playing();
        for _ in 0..10 {
            assert_eq!(integrate_player(&mut state), Footing::Landed);
        }
        assert!(state.player.is_grounded());
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_landing_resets_jumps() {
        let mut state = playing();
        state.player.jump();
        state.player.jump();
        let mut landed = false;
        for _ in 0..200 {
            if integrate_player(&mut state) == Footing::Landed {
                landed = true;
                break;
            }
            assert!(state.player.jump_count <= MAX_JUMPS);
        }
        assert!(landed);
        assert_eq!(state.player.jump_count, 0);
        assert!(!state.player.airborne);
    }

    #[test]
    fn test_pit_swallows_player_into_void() {
        let mut state = playing();
        open_pit_under_player(&mut state);
        let mut outcome = Footing::Landed;
        for _ in 0..200 {
            outcome = integrate_player(&mut state);
            if outcome == Footing::Void {
                break;
            }
            assert_eq!(outcome, Footing::Falling);
        }
        assert_eq!(outcome, Footing::Void);
    }

    #[test]
    fn test_deep_fall_is_not_snapped_back() {
        let mut state = playing();
        // Past the tolerance with no pit underneath any more
        state.player.body.pos.y = GROUND_Y + GROUND_TOLERANCE + 5.0 - PLAYER_HEIGHT;
        state.player.airborne = true;
        state.player.vel_y = 4.0;
        assert_eq!(integrate_player(&mut state), Footing::Falling);
        assert!(state.player.body.bottom() > GROUND_Y + GROUND_TOLERANCE);
    }

    #[test]
    fn test_shallow_sink_snaps_to_ground() {
        let mut state = playing();
        state.player.body.pos.y = GROUND_Y + 5.0 - PLAYER_HEIGHT;
        state.player.airborne = true;
        state.player.vel_y = 2.0;
        assert_eq!(integrate_player(&mut state), Footing::Landed);
        assert_eq!(state.player.body.bottom(), GROUND_Y);
    }
}
