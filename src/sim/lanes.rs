//! Lane geometry
//!
//! Lanes are equal-width vertical strips between the left and right padding.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Horizontal lane layout in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    /// Number of lanes
    pub lanes: usize,
    /// Width of one lane
    pub lane_width: f32,
    /// Margin left of lane 0
    pub padding: f32,
}

impl LaneLayout {
    pub fn new(width: f32, lanes: usize, padding: f32) -> Self {
        Self {
            lanes,
            lane_width: (width - padding * 2.0) / lanes as f32,
            padding,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.width, tuning.lanes, tuning.lane_padding)
    }

    /// X coordinate of a lane's left edge
    #[inline]
    pub fn lane_left(&self, index: usize) -> f32 {
        self.padding + self.lane_width * index as f32
    }

    /// X coordinate of a lane's center
    ///
    /// No bounds check; callers keep `index` in `0..lanes`.
    #[inline]
    pub fn lane_center(&self, index: usize) -> f32 {
        self.lane_left(index) + self.lane_width / 2.0
    }

    /// Index of the last lane
    #[inline]
    pub fn last_lane(&self) -> usize {
        self.lanes.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_center() {
        let layout = LaneLayout::new(600.0, 8, 44.0);
        assert_eq!(layout.lane_width, 64.0);
        assert_eq!(layout.lane_center(0), 44.0 + 32.0);
        assert_eq!(layout.lane_center(3), 44.0 + 64.0 * 3.0 + 32.0);
        assert_eq!(layout.lane_center(7), 600.0 - 44.0 - 32.0);
    }

    #[test]
    fn test_centers_evenly_spaced() {
        let layout = LaneLayout::new(500.0, 5, 10.0);
        for i in 1..layout.lanes {
            let gap = layout.lane_center(i) - layout.lane_center(i - 1);
            assert!((gap - layout.lane_width).abs() < 1e-4);
        }
        assert_eq!(layout.last_lane(), 4);
    }
}
