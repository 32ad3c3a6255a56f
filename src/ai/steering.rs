//! Steering along planned routes
//!
//! The core only produces a unit direction each tick; the shell turns it
//! into physical movement under the current speed cap.

use glam::Vec3;

use crate::nav::Route;

/// Seek behavior - head straight for a target
#[derive(Debug, Clone, Copy)]
pub struct Seek {
    /// Target position
    pub target: Vec3,
}

impl Seek {
    /// Create a new seek behavior
    #[must_use]
    pub const fn new(target: Vec3) -> Self {
        Self { target }
    }

    /// Unit direction from `position` toward the target (zero when on it)
    #[must_use]
    pub fn direction(&self, position: Vec3) -> Vec3 {
        (self.target - position).normalize_or_zero()
    }

    /// Whether `position` is within `radius` of the target
    #[must_use]
    pub fn arrived(&self, position: Vec3, radius: f32) -> bool {
        position.distance(self.target) < radius
    }
}

/// Advance along a route by one tick.
///
/// Returns the direction toward the next waypoint, or `None` when the route
/// is empty. The waypoint is popped once `position` is within
/// `arrival_threshold` of it.
pub fn follow_route(route: &mut Route, position: Vec3, arrival_threshold: f32) -> Option<Vec3> {
    let seek = Seek::new(route.next_waypoint()?);
    let direction = seek.direction(position);

    if seek.arrived(position, arrival_threshold) {
        route.pop();
    }

    Some(direction)
}
