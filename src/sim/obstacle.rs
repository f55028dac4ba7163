//! Obstacle pairs and the scrolling stream that spawns, scores and recycles them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleParams {
    pub width: f32,
    pub gap_height: f32,
    /// Horizontal distance between consecutive obstacles
    pub pitch: f32,
    /// The stream is topped up to this many live obstacles every tick
    pub min_live: usize,
    /// Inclusive range the top edge of each gap is drawn from
    pub gap_top_min: i32,
    pub gap_top_max: i32,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        Self {
            width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            pitch: PITCH,
            min_live: MIN_LIVE_OBSTACLES,
            gap_top_min: GAP_TOP_MIN,
            gap_top_max: GAP_TOP_MAX,
        }
    }
}

/// One pipe pair: a solid segment above the gap and one below it
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub gap_top: f32,
    pub gap_height: f32,
    pub width: f32,
    /// The actor has already passed this one
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32, params: &ObstacleParams) -> Self {
        Self {
            x,
            gap_top,
            gap_height: params.gap_height,
            width: params.width,
            scored: false,
        }
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// From the top of the field down to the gap
    pub fn upper_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// From the gap down to the bottom of the field
    pub fn lower_rect(&self, field_height: f32) -> Rect {
        let top = self.gap_bottom();
        Rect::new(self.x, top, self.width, (field_height - top).max(0.0))
    }

    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() <= 0.0
    }
}

/// Live obstacles ordered by `x`, leftmost first
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    params: ObstacleParams,
    obstacles: Vec<Obstacle>,
}

impl ObstacleStream {
    pub fn new(params: ObstacleParams) -> Self {
        Self {
            params,
            obstacles: Vec::with_capacity(params.min_live + 1),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Replace the stream with the initial batch, starting at the right edge of the field
    pub fn seed<R: Rng>(&mut self, field_width: f32, rng: &mut R) {
        self.obstacles.clear();
        for i in 0..self.params.min_live {
            let x = field_width + i as f32 * self.params.pitch;
            let gap_top = self.draw_gap_top(rng);
            self.obstacles.push(Obstacle::new(x, gap_top, &self.params));
        }
    }

    /// Scroll every obstacle left by `speed`, score crossings of `actor_x`,
    /// drop expired obstacles and top the stream back up.
    ///
    /// Returns the number of obstacles scored this tick.
    pub fn advance<R: Rng>(
        &mut self,
        speed: f32,
        actor_x: f32,
        field_width: f32,
        rng: &mut R,
    ) -> u32 {
        let mut scored = 0;
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
            if !obstacle.scored && obstacle.trailing_edge() < actor_x {
                obstacle.scored = true;
                scored += 1;
            }
        }

        self.obstacles.retain(|o| !o.is_off_screen());

        while self.obstacles.len() < self.params.min_live {
            let x = self
                .obstacles
                .last()
                .map(|o| o.x + self.params.pitch)
                .unwrap_or(field_width);
            let gap_top = self.draw_gap_top(rng);
            self.obstacles.push(Obstacle::new(x, gap_top, &self.params));
        }

        scored
    }

    fn draw_gap_top<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.params.gap_top_min..=self.params.gap_top_max) as f32
    }
}
