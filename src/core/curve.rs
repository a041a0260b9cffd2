use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// One band of a curve. Inside `[threshold, next threshold)` the score runs
/// linearly from `floor` up to `ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub threshold: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Breakpoint {
    pub const fn new(threshold: f64, floor: f64, ceiling: f64) -> Self {
        Self {
            threshold,
            floor,
            ceiling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringCurve {
    /// Score for values below the first threshold.
    pub below_min: f64,
    /// Ascending by threshold.
    pub breakpoints: Vec<Breakpoint>,
    /// Values at or above this score 100.
    pub saturation: f64,
}

/// Profit factor and average win/loss ratio share this shape.
const RATIO_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new(1.8, 50.0, 60.0),
    Breakpoint::new(1.9, 60.0, 70.0),
    Breakpoint::new(2.0, 70.0, 80.0),
    Breakpoint::new(2.2, 80.0, 90.0),
    Breakpoint::new(2.4, 90.0, 100.0),
];

const RECOVERY_BREAKPOINTS: &[Breakpoint] = &[
    Breakpoint::new(1.0, 1.0, 30.0),
    Breakpoint::new(1.5, 30.0, 50.0),
    Breakpoint::new(2.0, 50.0, 60.0),
    Breakpoint::new(2.5, 60.0, 70.0),
    Breakpoint::new(3.0, 70.0, 90.0),
];

impl ScoringCurve {
    pub fn profit_factor() -> Self {
        Self {
            below_min: 20.0,
            breakpoints: RATIO_BREAKPOINTS.to_vec(),
            saturation: 2.6,
        }
    }

    pub fn avg_win_loss() -> Self {
        Self::profit_factor()
    }

    pub fn recovery_factor() -> Self {
        Self {
            below_min: 0.0,
            breakpoints: RECOVERY_BREAKPOINTS.to_vec(),
            saturation: 3.5,
        }
    }

    pub fn score(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.below_min;
        }
        if value >= self.saturation {
            return 100.0;
        }
        let idx = self.breakpoints.partition_point(|b| b.threshold <= value);
        if idx == 0 {
            return self.below_min;
        }
        let band = self.breakpoints[idx - 1];
        let upper = self
            .breakpoints
            .get(idx)
            .map_or(self.saturation, |b| b.threshold);
        let span = upper - band.threshold;
        let t = if span > 0.0 {
            (value - band.threshold) / span
        } else {
            0.0
        };
        (band.floor + t * (band.ceiling - band.floor)).clamp(0.0, 100.0)
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        let invalid = |reason: String| AnalyticsError::InvalidCurve {
            curve: name.to_string(),
            reason,
        };

        if self.breakpoints.is_empty() {
            return Err(invalid("no breakpoints".to_string()));
        }
        if !in_score_range(self.below_min) {
            return Err(invalid(format!("below_min {} outside [0, 100]", self.below_min)));
        }
        for pair in self.breakpoints.windows(2) {
            if !(pair[0].threshold < pair[1].threshold) {
                return Err(invalid(format!(
                    "thresholds not ascending at {} -> {}",
                    pair[0].threshold, pair[1].threshold
                )));
            }
        }
        for b in &self.breakpoints {
            if !b.threshold.is_finite() {
                return Err(invalid("non-finite threshold".to_string()));
            }
            if !in_score_range(b.floor) || !in_score_range(b.ceiling) {
                return Err(invalid(format!(
                    "scores at threshold {} outside [0, 100]",
                    b.threshold
                )));
            }
        }
        // the score may never fall as the value rises
        if self.below_min > self.breakpoints[0].floor {
            return Err(invalid(format!(
                "below_min {} exceeds first floor {}",
                self.below_min, self.breakpoints[0].floor
            )));
        }
        for b in &self.breakpoints {
            if b.floor > b.ceiling {
                return Err(invalid(format!(
                    "floor {} above ceiling {} at threshold {}",
                    b.floor, b.ceiling, b.threshold
                )));
            }
        }
        for pair in self.breakpoints.windows(2) {
            if pair[0].ceiling > pair[1].floor {
                return Err(invalid(format!(
                    "score drops from {} to {} at threshold {}",
                    pair[0].ceiling, pair[1].floor, pair[1].threshold
                )));
            }
        }

        let last = self.breakpoints[self.breakpoints.len() - 1].threshold;
        if !(self.saturation > last) {
            return Err(invalid(format!(
                "saturation {} must exceed last threshold {}",
                self.saturation, last
            )));
        }
        Ok(())
    }
}

fn in_score_range(x: f64) -> bool {
    (0.0..=100.0).contains(&x)
}
