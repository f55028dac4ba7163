//! Scroll speed as a function of score

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub base_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub min_score_for_speed: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,
            min_score_for_speed: MIN_SCORE_FOR_SPEED,
        }
    }
}

impl Difficulty {
    /// Flat at `base_speed` below the threshold, then a linear ramp capped at `max_speed`.
    pub fn speed(&self, score: u32) -> f32 {
        if score < self.min_score_for_speed {
            return self.base_speed;
        }
        let over = (score - self.min_score_for_speed) as f32;
        (self.base_speed + over * self.speed_increment).min(self.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_below_threshold() {
        let d = Difficulty::default();
        for score in 0..10 {
            assert_eq!(d.speed(score), 2.0);
        }
    }

    #[test]
    fn ramp_starts_at_threshold() {
        let d = Difficulty::default();
        assert_eq!(d.speed(10), 2.0);
        assert!((d.speed(11) - 2.05).abs() < 1e-5);
        assert!((d.speed(30) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn capped_at_max() {
        let d = Difficulty::default();
        // 2 + 80 * 0.05 = 6
        assert!((d.speed(90) - 6.0).abs() < 1e-5);
        assert_eq!(d.speed(500), 6.0);
        assert_eq!(d.speed(u32::MAX), 6.0);
    }
}
