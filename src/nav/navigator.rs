//! Navigation queries used by agent behaviors
//!
//! [`Navigator`] bundles the waypoint graph with the escape polyline and
//! turns "where do I want to go" questions into routes. Both are read-only
//! after construction, so one navigator can be shared by every agent.

use glam::Vec3;
use rand::{Rng, RngCore};

use super::error::NavError;
use super::graph::{NodeId, WaypointGraph};
use super::pathfinding::try_find_path;
use super::route::Route;
use super::spatial;

/// Read-only navigation data for a session
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    graph: WaypointGraph,
    escape_route: Vec<Vec3>,
}

impl Navigator {
    /// Create a navigator from a populated graph and the escape polyline.
    ///
    /// Missing level collaborators are reported once here; the queries that
    /// need them quietly return empty routes afterwards.
    #[must_use]
    pub fn new(graph: WaypointGraph, escape_route: Vec<Vec3>) -> Self {
        if graph.is_empty() {
            log::error!("Navigator created with an empty waypoint graph");
        } else {
            if graph.spawn_node().is_none() {
                log::warn!("No spawn node placed, return-to-spawn routes are disabled");
            }
            if graph.escape_node().is_none() {
                log::warn!("No escape node placed, exit routes are disabled");
            }
            if graph.cover_nodes().is_empty() {
                log::warn!("No cover nodes placed, cover routes are disabled");
            }
        }
        if escape_route.is_empty() {
            log::warn!("Escape route has no points");
        }

        Self {
            graph,
            escape_route,
        }
    }

    /// The waypoint graph
    #[must_use]
    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    /// Escape polyline control points
    #[must_use]
    pub fn escape_route(&self) -> &[Vec3] {
        &self.escape_route
    }

    /// Node of the general pool closest to `point`
    #[must_use]
    pub fn nearest_node(&self, point: Vec3) -> Option<NodeId> {
        spatial::nearest(&self.graph, self.graph.node_ids(), point)
    }

    /// Node of the general pool furthest from `point`
    #[must_use]
    pub fn furthest_node(&self, point: Vec3) -> Option<NodeId> {
        spatial::furthest(&self.graph, self.graph.node_ids(), point)
    }

    /// Uniformly random node of the general pool
    pub fn random_node(&self, rng: &mut dyn RngCore) -> Option<NodeId> {
        if self.graph.is_empty() {
            return None;
        }
        Some(NodeId(rng.gen_range(0..self.graph.len()) as u32))
    }

    /// Escape polyline point furthest from `from`
    #[must_use]
    pub fn furthest_escape_point(&self, from: Vec3) -> Option<Vec3> {
        spatial::furthest_point(&self.escape_route, from)
    }

    /// Escape polyline point closest to `from`
    #[must_use]
    pub fn nearest_escape_point(&self, from: Vec3) -> Option<Vec3> {
        spatial::nearest_point(&self.escape_route, from)
    }

    /// Route from `start` to a random node
    pub fn random_path(&self, start: Vec3, rng: &mut dyn RngCore) -> Route {
        degrade("random", self.try_random_path(start, rng))
    }

    /// Route from `start` to the node nearest `target`
    #[must_use]
    pub fn path_toward(&self, start: Vec3, target: Vec3) -> Route {
        degrade("toward", self.try_path_toward(start, target))
    }

    /// Route from `start` to the node furthest from `threat`
    #[must_use]
    pub fn path_away(&self, start: Vec3, threat: Vec3) -> Route {
        degrade("away", self.try_path_away(start, threat))
    }

    /// Route from `start` to the escape node
    #[must_use]
    pub fn exit_path(&self, start: Vec3) -> Route {
        degrade("exit", self.try_exit_path(start))
    }

    /// Route from `start` to the spawn node
    #[must_use]
    pub fn spawn_path(&self, start: Vec3) -> Route {
        degrade("spawn", self.try_spawn_path(start))
    }

    /// Route from `start` to the cover node closest to `near`
    #[must_use]
    pub fn nearest_cover_path(&self, start: Vec3, near: Vec3) -> Route {
        degrade("cover", self.try_nearest_cover_path(start, near))
    }

    /// Fallible form of [`Navigator::random_path`]
    ///
    /// # Errors
    ///
    /// Propagates any [`NavError`] from node resolution or the search.
    pub fn try_random_path(&self, start: Vec3, rng: &mut dyn RngCore) -> Result<Route, NavError> {
        let goal = self.random_node(rng);
        try_find_path(&self.graph, self.nearest_node(start), goal)
    }

    /// Fallible form of [`Navigator::path_toward`]
    ///
    /// # Errors
    ///
    /// Propagates any [`NavError`] from node resolution or the search.
    pub fn try_path_toward(&self, start: Vec3, target: Vec3) -> Result<Route, NavError> {
        try_find_path(
            &self.graph,
            self.nearest_node(start),
            self.nearest_node(target),
        )
    }

    /// Fallible form of [`Navigator::path_away`]
    ///
    /// # Errors
    ///
    /// Propagates any [`NavError`] from node resolution or the search.
    pub fn try_path_away(&self, start: Vec3, threat: Vec3) -> Result<Route, NavError> {
        try_find_path(
            &self.graph,
            self.nearest_node(start),
            self.furthest_node(threat),
        )
    }

    /// Fallible form of [`Navigator::exit_path`]
    ///
    /// # Errors
    ///
    /// [`NavError::MissingCollaborator`] if no escape node was placed, or
    /// any error from the search.
    pub fn try_exit_path(&self, start: Vec3) -> Result<Route, NavError> {
        let goal = self
            .graph
            .escape_node()
            .ok_or(NavError::MissingCollaborator("escape node"))?;
        try_find_path(&self.graph, self.nearest_node(start), Some(goal))
    }

    /// Fallible form of [`Navigator::spawn_path`]
    ///
    /// # Errors
    ///
    /// [`NavError::MissingCollaborator`] if no spawn node was placed, or
    /// any error from the search.
    pub fn try_spawn_path(&self, start: Vec3) -> Result<Route, NavError> {
        let goal = self
            .graph
            .spawn_node()
            .ok_or(NavError::MissingCollaborator("spawn node"))?;
        try_find_path(&self.graph, self.nearest_node(start), Some(goal))
    }

    /// Fallible form of [`Navigator::nearest_cover_path`]
    ///
    /// # Errors
    ///
    /// [`NavError::MissingCollaborator`] if no cover nodes were placed, or
    /// any error from the search.
    pub fn try_nearest_cover_path(&self, start: Vec3, near: Vec3) -> Result<Route, NavError> {
        let goal = spatial::nearest(&self.graph, self.graph.cover_nodes().iter().copied(), near)
            .ok_or(NavError::MissingCollaborator("cover node"))?;
        try_find_path(&self.graph, self.nearest_node(start), Some(goal))
    }
}

/// Log a failed query and fall back to an empty route
fn degrade(query: &str, result: Result<Route, NavError>) -> Route {
    match result {
        Ok(route) => route,
        // Already reported when the navigator was built
        Err(e @ (NavError::EmptyGraph | NavError::MissingCollaborator(_))) => {
            log::trace!("{query} route unavailable: {e}");
            Route::new()
        }
        Err(e @ NavError::PathNotFound) => {
            log::debug!("{query} route unavailable: {e}");
            Route::new()
        }
        Err(e @ NavError::UnresolvedNode) => {
            log::warn!("{query} route unavailable: {e}");
            Route::new()
        }
    }
}
