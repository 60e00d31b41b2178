//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::lanes::LaneLayout;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Crashed; waiting for a restart
    Ended,
}

impl GamePhase {
    /// Status line shown under the score
    pub fn status_message(&self) -> &'static str {
        match self {
            GamePhase::Running => "Avoid the missiles!",
            GamePhase::Ended => "Crashed! Press Space to restart.",
        }
    }
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A lane started flashing
    WarningStarted { lane: usize },
    /// A lane finished flashing and released an obstacle
    ObstacleSpawned { lane: usize },
    /// The ship hit an obstacle; score is the floored final score
    Crashed { score: u64 },
    /// A new run began
    Restarted,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Current lane (0..lanes)
    pub lane: usize,
    /// Nominal ship width
    pub width: f32,
    /// Nominal ship height
    pub height: f32,
    /// Fixed vertical center
    pub y: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane: tuning.start_lane,
            width: tuning.player_width,
            height: tuning.player_height,
            y: tuning.height - PLAYER_BOTTOM_OFFSET,
        }
    }

    /// Collision half-extents
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(
            self.width * PLAYER_HALF_WIDTH_SCALE,
            self.height * PLAYER_HALF_HEIGHT_SCALE,
        )
    }

    /// Collision box at the current lane
    pub fn bounds(&self, layout: &LaneLayout) -> Aabb {
        Aabb::new(
            Vec2::new(layout.lane_center(self.lane), self.y),
            self.half_extents(),
        )
    }
}

/// A falling missile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: usize,
    /// Vertical center (grows downward)
    pub y: f32,
    pub radius: f32,
    /// Fall speed in speed units (see `consts::TIME_SCALE`)
    pub speed: f32,
}

impl Obstacle {
    /// Missile body size (width, height)
    pub fn body_size(&self) -> Vec2 {
        Vec2::new(
            self.radius * MISSILE_BODY_WIDTH_SCALE,
            self.radius * MISSILE_BODY_HEIGHT_SCALE,
        )
    }

    /// Collision half-extents
    pub fn half_extents(&self) -> Vec2 {
        self.body_size() * MISSILE_HALF_SCALE
    }

    /// Collision box in its lane
    pub fn bounds(&self, layout: &LaneLayout) -> Aabb {
        Aabb::new(
            Vec2::new(layout.lane_center(self.lane), self.y),
            self.half_extents(),
        )
    }
}

/// Per-lane warning flasher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    /// Flashing; guards against a second cycle in the same lane
    pub active: bool,
    /// Toggles left before the obstacle is released
    pub flashes_left: u32,
    /// Time since the last toggle (ms)
    pub timer_ms: f64,
    /// Currently drawn
    pub visible: bool,
    pub lane: usize,
}

impl Warning {
    /// Inactive warning for a lane
    pub fn idle(lane: usize) -> Self {
        Self {
            active: false,
            flashes_left: 0,
            timer_ms: 0.0,
            visible: false,
            lane,
        }
    }

    /// Start a flash cycle
    pub fn trigger(&mut self) {
        self.active = true;
        self.flashes_left = FLASH_COUNT;
        self.timer_ms = 0.0;
        self.visible = true;
    }

    /// Return to inactive
    pub fn reset(&mut self) {
        *self = Self::idle(self.lane);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Layout and balance
    pub tuning: Tuning,
    /// Lane geometry derived from `tuning`
    pub layout: LaneLayout,
    /// Current phase
    pub phase: GamePhase,
    /// Score (fractional; shown floored)
    pub score: f64,
    /// Simulation clock (ms), sum of all tick deltas
    pub clock_ms: f64,
    /// Clock time after which the next wave fires
    pub next_wave_ms: f64,
    /// Scroll offset of the lane-divider dashes
    pub track_offset: f32,
    /// Player ship
    pub player: Player,
    /// Falling obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// One warning per lane, indexed by lane
    pub warnings: Vec<Warning>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with explicit tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let layout = LaneLayout::from_tuning(&tuning);
        Self {
            seed,
            player: Player::new(&tuning),
            warnings: (0..layout.lanes).map(Warning::idle).collect(),
            layout,
            tuning,
            phase: GamePhase::Running,
            score: 0.0,
            clock_ms: 0.0,
            next_wave_ms: 0.0,
            track_offset: 0.0,
            obstacles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Score as displayed and recorded
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Seeded RNG for spawning
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a new run
    ///
    /// Score, obstacles and warnings are cleared and the next wave is due
    /// immediately. The ship keeps its lane and the RNG keeps its stream.
    pub fn restart(&mut self) {
        self.score = 0.0;
        self.obstacles.clear();
        for warning in &mut self.warnings {
            warning.reset();
        }
        self.next_wave_ms = 0.0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!("Run restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.warnings.len(), 8);
        assert!(state.warnings.iter().enumerate().all(|(i, w)| w.lane == i && !w.active));
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.player.y, 800.0 - 90.0);
    }

    #[test]
    fn test_extents() {
        let state = GameState::new(7);
        let half = state.player.half_extents();
        assert!((half.x - 38.0 * 0.35).abs() < 1e-5);
        assert!((half.y - 58.0 * 0.45).abs() < 1e-5);

        let obstacle = Obstacle {
            lane: 0,
            y: 0.0,
            radius: 20.0,
            speed: 3.0,
        };
        let half = obstacle.half_extents();
        assert!((half.x - 0.45 * 18.0).abs() < 1e-5);
        assert!((half.y - 0.45 * 48.0).abs() < 1e-5);
    }

    #[test]
    fn test_warning_trigger_and_reset() {
        let mut warning = Warning::idle(3);
        warning.trigger();
        assert!(warning.active && warning.visible);
        assert_eq!(warning.flashes_left, FLASH_COUNT);

        warning.reset();
        assert_eq!(warning, Warning::idle(3));
    }

    #[test]
    fn test_display_score_floors() {
        let mut state = GameState::new(1);
        state.score = 41.99;
        assert_eq!(state.display_score(), 41);
    }
}
