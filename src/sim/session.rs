//! One round of play: the actor, the obstacle stream and the score
//!
//! The driver calls [`Session::tick`] once per frame while playing. A tick
//! never fails; hitting something is reported as a [`Crash`] and stops the
//! session.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, PhysicsParams};
use super::collision::any_collision;
use super::difficulty::Difficulty;
use super::geom::Size;
use super::obstacle::{ObstacleParams, ObstacleStream};

/// Every tunable that shapes a round
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub physics: PhysicsParams,
    pub obstacles: ObstacleParams,
    pub difficulty: Difficulty,
}

/// Player commands gathered for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    /// Left the play field under the `Lose` boundary policy
    OutOfBounds,
    Obstacle,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub jumped: bool,
    pub scored: u32,
    pub crash: Option<Crash>,
}

#[derive(Debug, Clone)]
pub struct Session {
    rules: GameRules,
    field: Size,
    actor: Actor,
    stream: ObstacleStream,
    score: u32,
    running: bool,
    ticks: u64,
    /// Total scroll, for parallax
    distance: f32,
    rng: StdRng,
}

impl Session {
    pub fn new(rules: GameRules, field: Size, actor_size: Size, rng: StdRng) -> Self {
        let actor = Actor::spawn_in(field, actor_size, rules.physics);
        let mut session = Self {
            rules,
            field,
            actor,
            stream: ObstacleStream::new(rules.obstacles),
            score: 0,
            running: true,
            ticks: 0,
            distance: 0.0,
            rng,
        };
        session.reset();
        session
    }

    /// Seeded sessions place gaps reproducibly; `None` draws from OS entropy.
    pub fn with_seed(rules: GameRules, field: Size, actor_size: Size, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rules, field, actor_size, rng)
    }

    /// Back to the spawn point with a fresh obstacle batch and zero score.
    pub fn reset(&mut self) {
        self.actor.reset();
        self.stream.seed(self.field.width, &mut self.rng);
        self.score = 0;
        self.running = true;
        self.ticks = 0;
        self.distance = 0.0;
    }

    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        let mut report = TickReport::default();
        if !self.running {
            return report;
        }

        if input.jump {
            self.actor.jump();
            report.jumped = true;
        }

        self.ticks += 1;

        if self.actor.tick(self.field.height).out_of_bounds {
            self.running = false;
            report.crash = Some(Crash::OutOfBounds);
            return report;
        }

        let speed = self.speed();
        report.scored = self
            .stream
            .advance(speed, self.actor.x, self.field.width, &mut self.rng);
        self.score += report.scored;
        self.distance += speed;

        if any_collision(&self.actor.bounds(), self.stream.obstacles(), self.field.height) {
            self.running = false;
            report.crash = Some(Crash::Obstacle);
        }

        report
    }

    /// Current scroll speed, derived from the score
    pub fn speed(&self) -> f32 {
        self.rules.difficulty.speed(self.score)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    pub fn field(&self) -> Size {
        self.field
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[cfg(test)]
    pub(crate) fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
