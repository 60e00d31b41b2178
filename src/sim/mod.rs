//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is injected, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (lane order, spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod lanes;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, advance_obstacles, find_collision, prune_obstacles};
pub use lanes::LaneLayout;
pub use spawner::{maybe_start_wave, spawn_obstacle, trigger_warning, update_warnings};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Player, Warning};
pub use tick::{TickInput, tick, update_player};
