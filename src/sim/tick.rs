//! Per-frame simulation tick
//!
//! Core game loop step; advances the state by an injected delta so runs are
//! reproducible for a given seed and input sequence.

use super::collision::{advance_obstacles, fall_distance, find_collision, prune_obstacles};
use super::spawner::{maybe_start_wave, update_warnings};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Pending input signals
///
/// The driver sets these on key press. A tick clears a signal only when it
/// acts on it, so a lane shift happens once per press rather than once per
/// frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Shift one lane left
    pub move_left: bool,
    /// Shift one lane right
    pub move_right: bool,
    /// Start a new run (only honored once crashed)
    pub restart: bool,
}

impl TickInput {
    /// Ask for a new run; accepted only once the current run has ended
    pub fn request_restart(&mut self, phase: GamePhase) -> bool {
        if phase != GamePhase::Ended {
            return false;
        }
        self.restart = true;
        true
    }
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &mut TickInput, dt_ms: f64) {
    let dt_ms = dt_ms.max(0.0);

    if state.phase == GamePhase::Ended {
        if !input.restart {
            return;
        }
        input.restart = false;
        state.restart();
    } else {
        input.restart = false;
    }

    state.clock_ms += dt_ms;

    update_player(state, input);
    update_track(state, dt_ms as f32);
    update_warnings(state, dt_ms);

    advance_obstacles(&mut state.obstacles, dt_ms as f32);
    prune_obstacles(&mut state.obstacles, state.tuning.height);

    if let Some(index) = find_collision(&state.player, &state.obstacles, &state.layout) {
        crash(state, index);
        return;
    }

    state.score += dt_ms * SCORE_PER_MS;

    maybe_start_wave(state);
}

/// Apply pending lane shifts, left before right
pub fn update_player(state: &mut GameState, input: &mut TickInput) {
    let player = &mut state.player;
    if input.move_left && player.lane > 0 {
        player.lane -= 1;
        input.move_left = false;
    }
    if input.move_right && player.lane < state.layout.last_lane() {
        player.lane += 1;
        input.move_right = false;
    }
}

/// Scroll the lane-divider dashes with the base speed
fn update_track(state: &mut GameState, dt_ms: f32) {
    let scrolled = state.track_offset + fall_distance(state.tuning.base_speed, dt_ms);
    state.track_offset = scrolled % TRACK_DASH_PERIOD;
}

/// End the run; the score stays frozen at its current value
fn crash(state: &mut GameState, index: usize) {
    state.phase = GamePhase::Ended;
    let score = state.display_score();
    state.events.push(GameEvent::Crashed { score });
    log::info!(
        "Crashed into missile in lane {} with score {}",
        state.obstacles[index].lane,
        score
    );
}
