//! Routes produced by the planner

use glam::Vec3;

/// An ordered list of waypoint positions, stored goal first.
///
/// The next waypoint to visit is always the *last* element, so an agent
/// walks the route start-to-goal by popping from the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    waypoints: Vec<Vec3>,
}

impl Route {
    /// Create an empty route
    #[must_use]
    pub const fn new() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Wrap positions already in goal-to-start order
    #[must_use]
    pub fn from_goal_to_start(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints }
    }

    /// A route with a single destination
    #[must_use]
    pub fn single(point: Vec3) -> Self {
        Self {
            waypoints: vec![point],
        }
    }

    /// The waypoint to head for next
    #[must_use]
    pub fn next_waypoint(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }

    /// The final destination
    #[must_use]
    pub fn destination(&self) -> Option<Vec3> {
        self.waypoints.first().copied()
    }

    /// Remove the waypoint that was just reached
    pub fn pop(&mut self) -> Option<Vec3> {
        self.waypoints.pop()
    }

    /// Discard the whole route
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Waypoints in storage (goal-to-start) order
    #[must_use]
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Number of remaining waypoints
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Check if there is nothing left to walk
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Sum of the segment lengths between consecutive waypoints
    #[must_use]
    pub fn length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_walks_start_to_goal() {
        let mut route = Route::from_goal_to_start(vec![
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::ZERO,
        ]);

        assert_eq!(route.next_waypoint(), Some(Vec3::ZERO));
        assert_eq!(route.destination(), Some(Vec3::new(10.0, 0.0, 0.0)));
        assert!((route.length() - 10.0).abs() < 1e-5);

        route.pop();
        assert_eq!(route.next_waypoint(), Some(Vec3::new(5.0, 0.0, 0.0)));
        route.pop();
        route.pop();
        assert!(route.is_empty());
        assert_eq!(route.pop(), None);
    }

    #[test]
    fn test_single_point_route() {
        let route = Route::single(Vec3::ONE);
        assert_eq!(route.len(), 1);
        assert_eq!(route.next_waypoint(), route.destination());
        assert_eq!(route.length(), 0.0);
    }
}
