//! Game simulation
//!
//! Everything that decides what happens in a round lives here. No terminal,
//! audio or clock dependencies: one call to [`Session::tick`] is one frame.

pub mod actor;
pub mod collision;
pub mod difficulty;
pub mod geom;
pub mod obstacle;
pub mod session;

pub use actor::{Actor, ActorStep, BoundaryPolicy, PhysicsParams};
pub use collision::{any_collision, collides};
pub use difficulty::Difficulty;
pub use geom::{Point, Rect, Size};
pub use obstacle::{Obstacle, ObstacleParams, ObstacleStream};
pub use session::{Crash, GameRules, Session, TickInput, TickReport};
