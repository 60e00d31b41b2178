//! Data-driven layout and game balance
//!
//! Everything here may be overridden from JSON; missing fields fall back to
//! the defaults, and `validated()` clamps values into a playable range.

use serde::{Deserialize, Serialize};

/// World layout and balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
    /// Number of lanes
    pub lanes: usize,
    /// Empty margin left and right of the track
    pub lane_padding: f32,
    /// Base missile speed (scaled by `consts::TIME_SCALE`)
    pub base_speed: f32,
    /// Nominal ship width
    pub player_width: f32,
    /// Nominal ship height
    pub player_height: f32,
    /// Lane the ship starts in
    pub start_lane: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            lanes: 8,
            lane_padding: 44.0,
            base_speed: 3.2,
            player_width: 38.0,
            player_height: 58.0,
            start_lane: 1,
        }
    }
}

impl Tuning {
    /// Parse a JSON override, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.validated(),
            Err(e) => {
                log::warn!("Invalid tuning override ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Tuning for a canvas of the given size, other values default
    pub fn for_canvas(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
        .validated()
    }

    /// Clamp values so the layout stays usable
    pub fn validated(mut self) -> Self {
        self.lanes = self.lanes.max(1);
        self.lane_padding = self.lane_padding.max(0.0);
        // Track must keep some width after padding
        let min_width = self.lane_padding * 2.0 + self.lanes as f32;
        if !(self.width >= min_width) {
            log::warn!("Canvas width {} too small, widening to {}", self.width, min_width);
            self.width = min_width;
        }
        if !(self.height > 0.0) {
            self.height = Self::default().height;
        }
        if !(self.base_speed > 0.0) {
            self.base_speed = Self::default().base_speed;
        }
        self.start_lane = self.start_lane.min(self.lanes - 1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LaneLayout;

    #[test]
    fn test_default_lane_width() {
        let layout = LaneLayout::from_tuning(&Tuning::default());
        assert_eq!(layout.lane_width, (600.0 - 88.0) / 8.0);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"lanes": 5, "base_speed": 4.0}"#);
        assert_eq!(tuning.lanes, 5);
        assert_eq!(tuning.base_speed, 4.0);
        assert_eq!(tuning.lane_padding, 44.0);
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(Tuning::from_json("not json"), Tuning::default());
    }

    #[test]
    fn test_validated_clamps() {
        let tuning = Tuning {
            lanes: 0,
            start_lane: 9,
            base_speed: -1.0,
            ..Tuning::default()
        }
        .validated();
        assert_eq!(tuning.lanes, 1);
        assert_eq!(tuning.start_lane, 0);
        assert_eq!(tuning.base_speed, 3.2);
    }
}
