//! The bird: gravity, jump impulse and the play-field boundary

use serde::{Deserialize, Serialize};

use super::geom::{Point, Rect, Size};
use crate::consts::*;

/// What happens when the actor leaves `[0, field_height - height]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Leaving the field ends the round
    #[default]
    Lose,
    /// Pin the actor to the edge, kill its velocity and keep playing
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Fixed horizontal position of the actor
    pub spawn_x: f32,
    pub boundary: BoundaryPolicy,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            spawn_x: SPAWN_X,
            boundary: BoundaryPolicy::Lose,
        }
    }
}

/// Result of one actor tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActorStep {
    /// Set only under [`BoundaryPolicy::Lose`]
    pub out_of_bounds: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vel_y: f32,
    pub size: Size,
    spawn: Point,
    params: PhysicsParams,
}

impl Actor {
    pub fn new(spawn: Point, size: Size, params: PhysicsParams) -> Self {
        Self {
            x: spawn.x,
            y: spawn.y,
            vel_y: 0.0,
            size,
            spawn,
            params,
        }
    }

    /// Spawned at `params.spawn_x`, vertically centered in the field
    pub fn spawn_in(field: Size, size: Size, params: PhysicsParams) -> Self {
        Self::new(Point::new(params.spawn_x, field.height / 2.0), size, params)
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(Point::new(self.x, self.y), self.size)
    }

    /// Upward impulse. No cooldown: it also fires mid-air.
    pub fn jump(&mut self) {
        self.vel_y = self.params.jump_velocity;
    }

    /// Integrate one tick of gravity and apply the boundary policy.
    pub fn tick(&mut self, field_height: f32) -> ActorStep {
        self.vel_y += self.params.gravity;
        self.y += self.vel_y;

        let floor = field_height - self.size.height;
        if self.y >= 0.0 && self.y <= floor {
            return ActorStep::default();
        }

        match self.params.boundary {
            BoundaryPolicy::Lose => ActorStep {
                out_of_bounds: true,
            },
            BoundaryPolicy::Clamp => {
                self.y = self.y.clamp(0.0, floor.max(0.0));
                self.vel_y = 0.0;
                ActorStep::default()
            }
        }
    }

    pub fn reset(&mut self) {
        self.x = self.spawn.x;
        self.y = self.spawn.y;
        self.vel_y = 0.0;
    }
}
