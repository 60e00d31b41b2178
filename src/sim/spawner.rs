//! Warn-then-spawn obstacle scheduling
//!
//! A wave picks a random lane and starts its warning flasher. After
//! `FLASH_COUNT` toggles, `FLASH_INTERVAL_MS` apart, the lane releases one
//! missile. Lanes flash independently of each other.

use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle};
use crate::consts::*;

/// Advance every active warning by `dt_ms`
///
/// Warnings that finish their last flash go inactive and release an obstacle.
/// Returns the lanes that spawned this tick, in lane order.
pub fn update_warnings(state: &mut GameState, dt_ms: f64) -> Vec<usize> {
    let mut released = Vec::new();

    for warning in state.warnings.iter_mut().filter(|w| w.active) {
        warning.timer_ms += dt_ms;
        if warning.timer_ms < FLASH_INTERVAL_MS {
            continue;
        }

        // One toggle per tick; overshoot is dropped
        warning.timer_ms = 0.0;
        warning.visible = !warning.visible;
        warning.flashes_left = warning.flashes_left.saturating_sub(1);
        if warning.flashes_left == 0 {
            warning.active = false;
            warning.visible = false;
            released.push(warning.lane);
        }
    }

    for &lane in &released {
        spawn_obstacle(state, lane);
    }
    released
}

/// Start a wave if its deadline has passed
///
/// The lane is picked uniformly at random. If that lane is already flashing
/// the whole wave is skipped. Either way the next wave is scheduled.
/// Returns the lane that started flashing.
pub fn maybe_start_wave(state: &mut GameState) -> Option<usize> {
    if state.clock_ms <= state.next_wave_ms {
        return None;
    }

    let lanes = state.layout.lanes;
    let lane = state.rng().random_range(0..lanes);
    let started = trigger_warning(state, lane);
    if !started {
        log::trace!("Wave skipped, lane {lane} busy");
    }

    let wait = WAVE_MIN_MS + state.rng().random_range(0.0..WAVE_JITTER_MS);
    state.next_wave_ms = state.clock_ms + wait;
    started.then_some(lane)
}

/// Start the warning in `lane` unless one is already running there
pub fn trigger_warning(state: &mut GameState, lane: usize) -> bool {
    let Some(warning) = state.warnings.get_mut(lane) else {
        return false;
    };
    if warning.active {
        return false;
    }

    warning.trigger();
    state.events.push(GameEvent::WarningStarted { lane });
    log::debug!("Warning started in lane {lane}");
    true
}

/// Release a missile at the top of `lane` with randomized size and speed
pub fn spawn_obstacle(state: &mut GameState, lane: usize) {
    let base_speed = state.tuning.base_speed;
    let rng = state.rng();
    let radius = MISSILE_RADIUS_MIN + rng.random_range(0.0..MISSILE_RADIUS_JITTER);
    let speed = base_speed + rng.random_range(0.0..MISSILE_SPEED_JITTER);

    state.obstacles.push(Obstacle {
        lane,
        y: MISSILE_SPAWN_Y,
        radius,
        speed,
    });
    state.events.push(GameEvent::ObstacleSpawned { lane });
    log::debug!("Missile released in lane {lane} (r={radius:.1}, v={speed:.2})");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_cycle_releases_one_obstacle() {
        let mut state = GameState::new(42);
        assert!(trigger_warning(&mut state, 2));

        let mut visibility = vec![state.warnings[2].visible];
        for i in 0..FLASH_COUNT {
            // Just short of a toggle: nothing changes
            update_warnings(&mut state, FLASH_INTERVAL_MS - 1.0);
            assert_eq!(state.warnings[2].flashes_left, FLASH_COUNT - i);

            let released = update_warnings(&mut state, 1.0);
            visibility.push(state.warnings[2].visible);
            if i + 1 < FLASH_COUNT {
                assert!(released.is_empty());
                assert!(state.warnings[2].active);
            } else {
                assert_eq!(released, vec![2]);
            }
        }

        assert_eq!(
            visibility[..FLASH_COUNT as usize],
            [true, false, true, false, true, false]
        );
        assert!(!state.warnings[2].active);
        assert!(!state.warnings[2].visible);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].lane, 2);
        assert_eq!(state.obstacles[0].y, MISSILE_SPAWN_Y);
    }

    #[test]
    fn test_active_lane_not_retriggered() {
        let mut state = GameState::new(42);
        assert!(trigger_warning(&mut state, 0));
        update_warnings(&mut state, FLASH_INTERVAL_MS);
        assert!(!trigger_warning(&mut state, 0));
        // Cycle was not restarted
        assert_eq!(state.warnings[0].flashes_left, FLASH_COUNT - 1);
        assert!(!trigger_warning(&mut state, 99));
    }

    #[test]
    fn test_spawn_bounds() {
        let mut state = GameState::new(3);
        for lane in 0..200 {
            spawn_obstacle(&mut state, lane % 8);
        }
        for o in &state.obstacles {
            assert!((22.0..30.0).contains(&o.radius));
            assert!((3.2..3.2 + 1.4).contains(&o.speed));
        }
    }

    #[test]
    fn test_wave_waits_for_deadline() {
        let mut state = GameState::new(9);
        state.clock_ms = 0.0;
        assert_eq!(maybe_start_wave(&mut state), None);

        state.clock_ms = 1.0;
        let lane = maybe_start_wave(&mut state).expect("wave should fire");
        assert!(state.warnings[lane].active);
        let wait = state.next_wave_ms - state.clock_ms;
        assert!((900.0..1800.0).contains(&wait));

        // Not due yet
        state.clock_ms += wait - 1.0;
        assert_eq!(maybe_start_wave(&mut state), None);
    }

    #[test]
    fn test_busy_lane_drops_wave() {
        let mut state = GameState::with_tuning(
            5,
            crate::Tuning {
                lanes: 1,
                start_lane: 0,
                ..crate::Tuning::default()
            },
        );
        state.clock_ms = 10.0;
        assert_eq!(maybe_start_wave(&mut state), Some(0));

        // Only lane is busy: the due wave is dropped, not retried
        state.clock_ms = state.next_wave_ms + 1.0;
        assert_eq!(maybe_start_wave(&mut state), None);
        assert_eq!(state.warnings[0].flashes_left, FLASH_COUNT);
        assert!(state.next_wave_ms > state.clock_ms);
        assert_eq!(maybe_start_wave(&mut state), None);
    }
}
