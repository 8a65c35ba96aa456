use serde::{Deserialize, Serialize};

use crate::config::RacerConfig;

/// Direction of travel across the finish segment along the Y axis.
/// Y grows downward (canvas convention), so `Up` means Y decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingDir {
    Up,
    Down,
}

/// The finish segment: a horizontal line at fixed Y with an X extent and a
/// preferred crossing direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishLine {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub preferred: CrossingDir,
}

impl FinishLine {
    pub fn from_config(config: &RacerConfig) -> Self {
        Self {
            x1: config.finish_x1,
            x2: config.finish_x2,
            y: config.finish_y,
            preferred: config.finish_preferred,
        }
    }

    /// Detect a crossing of the segment's Y between the previous and
    /// current pose, confirming the swept X range overlaps the segment
    /// extent. Returns the crossing direction, or None.
    ///
    /// The caller reconstructs the previous position from the last
    /// velocity delta rather than storing the true prior pose; at high
    /// `dt` or speed a crossing landing exactly between samples can be
    /// missed. That approximation is intentional.
    pub fn crossing(&self, prev_x: f32, prev_y: f32, x: f32, y: f32) -> Option<CrossingDir> {
        let (seg_lo, seg_hi) = (self.x1.min(self.x2), self.x1.max(self.x2));
        let (swept_lo, swept_hi) = (prev_x.min(x), prev_x.max(x));
        if swept_hi < seg_lo || swept_lo > seg_hi {
            return None;
        }

        if prev_y > self.y && y <= self.y {
            Some(CrossingDir::Up)
        } else if prev_y < self.y && y >= self.y {
            Some(CrossingDir::Down)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> FinishLine {
        FinishLine {
            x1: 100.0,
            x2: 200.0,
            y: 50.0,
            preferred: CrossingDir::Up,
        }
    }

    #[test]
    fn upward_crossing_detected() {
        assert_eq!(
            line().crossing(150.0, 51.0, 150.0, 49.0),
            Some(CrossingDir::Up)
        );
    }

    #[test]
    fn downward_crossing_detected() {
        assert_eq!(
            line().crossing(150.0, 49.0, 150.0, 51.0),
            Some(CrossingDir::Down)
        );
    }

    #[test]
    fn no_crossing_when_y_does_not_change_sides() {
        assert_eq!(line().crossing(150.0, 60.0, 150.0, 55.0), None);
        assert_eq!(line().crossing(150.0, 40.0, 150.0, 45.0), None);
    }

    #[test]
    fn no_crossing_outside_x_extent() {
        assert_eq!(line().crossing(50.0, 51.0, 50.0, 49.0), None);
        assert_eq!(line().crossing(250.0, 51.0, 250.0, 49.0), None);
    }

    #[test]
    fn swept_x_range_counts_as_overlap() {
        // The car moves from left of the segment to over it in one step.
        assert_eq!(
            line().crossing(80.0, 51.0, 120.0, 49.0),
            Some(CrossingDir::Up)
        );
    }

    #[test]
    fn landing_exactly_on_line_counts() {
        assert_eq!(
            line().crossing(150.0, 51.0, 150.0, 50.0),
            Some(CrossingDir::Up)
        );
    }
}
