//! Actor vs obstacle collision
//!
//! Each obstacle is two solid rectangles framing its gap. Touching an edge is
//! not a hit.

use super::geom::Rect;
use super::obstacle::Obstacle;

pub fn collides(actor: &Rect, obstacle: &Obstacle, field_height: f32) -> bool {
    actor.overlaps(&obstacle.upper_rect()) || actor.overlaps(&obstacle.lower_rect(field_height))
}

/// True as soon as any obstacle is hit
pub fn any_collision<'a, I>(actor: &Rect, obstacles: I, field_height: f32) -> bool
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles
        .into_iter()
        .any(|o| collides(actor, o, field_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleParams;

    fn pipe() -> Obstacle {
        // Gap spans y = 200..350, x = 100..180
        Obstacle::new(100.0, 200.0, &ObstacleParams::default())
    }

    #[test]
    fn inside_the_gap_is_safe() {
        let actor = Rect::new(120.0, 250.0, 30.0, 30.0);
        assert!(!collides(&actor, &pipe(), 600.0));
    }

    #[test]
    fn inside_the_upper_segment_hits() {
        let actor = Rect::new(120.0, 50.0, 30.0, 30.0);
        assert!(collides(&actor, &pipe(), 600.0));
    }

    #[test]
    fn inside_the_lower_segment_hits() {
        let actor = Rect::new(120.0, 450.0, 30.0, 30.0);
        assert!(collides(&actor, &pipe(), 600.0));
    }

    #[test]
    fn clipping_the_gap_edge_hits() {
        let actor = Rect::new(120.0, 190.0, 30.0, 30.0);
        assert!(collides(&actor, &pipe(), 600.0));
        let actor = Rect::new(120.0, 330.0, 30.0, 30.0);
        assert!(collides(&actor, &pipe(), 600.0));
    }

    #[test]
    fn flush_with_the_gap_edges_is_safe() {
        // Top at gap_top, bottom at gap_bottom
        let actor = Rect::new(120.0, 200.0, 30.0, 150.0);
        assert!(!collides(&actor, &pipe(), 600.0));
    }

    #[test]
    fn outside_the_x_range_is_safe() {
        let actor = Rect::new(70.0, 50.0, 30.0, 30.0);
        assert!(!collides(&actor, &pipe(), 600.0));
        let actor = Rect::new(180.0, 50.0, 30.0, 30.0);
        assert!(!collides(&actor, &pipe(), 600.0));
    }

    #[test]
    fn any_collision_checks_every_obstacle() {
        let params = ObstacleParams::default();
        let pipes = vec![
            Obstacle::new(400.0, 200.0, &params),
            Obstacle::new(100.0, 300.0, &params),
        ];
        let actor = Rect::new(120.0, 250.0, 30.0, 30.0);
        assert!(any_collision(&actor, &pipes, 600.0));
        assert!(!any_collision(&actor, &pipes[..1], 600.0));
    }
}
