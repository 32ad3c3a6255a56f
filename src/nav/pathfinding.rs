//! A* pathfinding over the waypoint graph
//!
//! Edge cost is the Euclidean distance between connected nodes and the
//! heuristic is the straight-line distance to the goal, so the first time
//! the goal is popped the route is optimal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::error::NavError;
use super::graph::{NodeId, WaypointGraph};
use super::route::Route;

/// Scores for a node, created the first time the node is discovered
#[derive(Debug, Clone, Copy)]
struct Score {
    g_cost: f32,
    h_cost: f32,
    came_from: Option<NodeId>,
}

/// Frontier entry for the priority queue.
///
/// `order` is the position at which the node joined the frontier. Equal
/// f-costs pop in that order, which matches a linear scan over an
/// insertion-ordered open list.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    node: NodeId,
    f_cost: f32,
    order: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a route between two nodes, degrading to an empty route.
///
/// The route is in goal-to-start order. `start == goal` yields a single
/// waypoint. Failures are logged and produce an empty route.
#[must_use]
pub fn find_path(graph: &WaypointGraph, start: Option<NodeId>, goal: Option<NodeId>) -> Route {
    match try_find_path(graph, start, goal) {
        Ok(route) => route,
        Err(NavError::PathNotFound) => {
            log::debug!("No path from {start:?} to {goal:?}");
            Route::new()
        }
        Err(e) => {
            log::warn!("Pathfinding failed: {e}");
            Route::new()
        }
    }
}

/// Find a route between two nodes using A*
///
/// # Errors
///
/// - [`NavError::EmptyGraph`] if the graph has no nodes
/// - [`NavError::UnresolvedNode`] if either endpoint is absent or unknown
/// - [`NavError::PathNotFound`] if the goal is unreachable from the start
pub fn try_find_path(
    graph: &WaypointGraph,
    start: Option<NodeId>,
    goal: Option<NodeId>,
) -> Result<Route, NavError> {
    if graph.is_empty() {
        return Err(NavError::EmptyGraph);
    }
    let (Some(start), Some(goal)) = (start, goal) else {
        return Err(NavError::UnresolvedNode);
    };
    let (Some(start_pos), Some(goal_pos)) = (graph.position(start), graph.position(goal)) else {
        return Err(NavError::UnresolvedNode);
    };

    let mut scores: FxHashMap<NodeId, Score> = FxHashMap::default();
    // Frontier membership, mapped to the order each node joined it
    let mut open: FxHashMap<NodeId, u64> = FxHashMap::default();
    let mut open_set = BinaryHeap::new();
    let mut next_order: u64 = 0;

    let start_h = start_pos.distance(goal_pos);
    scores.insert(
        start,
        Score {
            g_cost: 0.0,
            h_cost: start_h,
            came_from: None,
        },
    );
    open.insert(start, next_order);
    open_set.push(OpenEntry {
        node: start,
        f_cost: start_h,
        order: next_order,
    });
    next_order += 1;

    while let Some(entry) = open_set.pop() {
        // Superseded entries stay in the heap until popped
        if open.get(&entry.node) != Some(&entry.order) {
            continue;
        }
        open.remove(&entry.node);

        let current = entry.node;
        if current == goal {
            log::debug!("Path found from {start:?} to {goal:?}");
            return Ok(reconstruct_path(graph, &scores, goal));
        }

        let Some(current_pos) = graph.position(current) else {
            continue;
        };
        let current_g = scores.get(&current).map_or(f32::MAX, |s| s.g_cost);

        for &neighbor in graph.neighbors(current) {
            let Some(neighbor_pos) = graph.position(neighbor) else {
                continue;
            };
            let tentative_g = current_g + current_pos.distance(neighbor_pos);

            let score = scores.entry(neighbor).or_insert_with(|| Score {
                g_cost: f32::MAX,
                h_cost: neighbor_pos.distance(goal_pos),
                came_from: None,
            });

            if tentative_g < score.g_cost {
                score.g_cost = tentative_g;
                score.came_from = Some(current);

                let order = *open.entry(neighbor).or_insert_with(|| {
                    let order = next_order;
                    next_order += 1;
                    order
                });
                open_set.push(OpenEntry {
                    node: neighbor,
                    f_cost: tentative_g + score.h_cost,
                    order,
                });
            }
        }
    }

    Err(NavError::PathNotFound)
}

/// Walk predecessor links from the goal back to the start
fn reconstruct_path(
    graph: &WaypointGraph,
    scores: &FxHashMap<NodeId, Score>,
    goal: NodeId,
) -> Route {
    let mut waypoints: Vec<Vec3> = Vec::new();
    let mut next = Some(goal);

    while let Some(node) = next {
        // Predecessor chains are acyclic; the bound only guards corrupt input
        if waypoints.len() > scores.len() {
            break;
        }
        if let Some(position) = graph.position(node) {
            waypoints.push(position);
        }
        next = scores.get(&node).and_then(|s| s.came_from);
    }

    Route::from_goal_to_start(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::graph::NodeRole;

    /// A(0,0,0) - B(5,0,0) - C(10,0,0) with no A-C edge
    fn chain() -> (WaypointGraph, [NodeId; 3]) {
        let mut graph = WaypointGraph::new();
        let a = graph.add_node(Vec3::ZERO, NodeRole::Normal);
        let b = graph.add_node(Vec3::new(5.0, 0.0, 0.0), NodeRole::Normal);
        let c = graph.add_node(Vec3::new(10.0, 0.0, 0.0), NodeRole::Normal);
        graph.connect(a, b);
        graph.connect(b, c);
        (graph, [a, b, c])
    }

    #[test]
    fn test_chain_path_is_goal_to_start() {
        let (graph, [a, _, c]) = chain();

        let route = find_path(&graph, Some(a), Some(c));

        assert_eq!(
            route.waypoints(),
            &[
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(5.0, 0.0, 0.0),
                Vec3::ZERO
            ]
        );
        assert!((route.length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_start_is_goal() {
        let (graph, [_, b, _]) = chain();

        let route = find_path(&graph, Some(b), Some(b));

        assert_eq!(route.waypoints(), &[Vec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_disconnected_nodes() {
        let (mut graph, [a, _, _]) = chain();
        let island = graph.add_node(Vec3::new(0.0, 50.0, 0.0), NodeRole::Normal);

        assert_eq!(
            try_find_path(&graph, Some(a), Some(island)),
            Err(NavError::PathNotFound)
        );
        assert!(find_path(&graph, Some(a), Some(island)).is_empty());
    }

    #[test]
    fn test_one_way_edges() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_node(Vec3::ZERO, NodeRole::Normal);
        let b = graph.add_node(Vec3::X, NodeRole::Normal);
        graph.connect_one_way(a, b);

        assert_eq!(find_path(&graph, Some(a), Some(b)).len(), 2);
        assert!(find_path(&graph, Some(b), Some(a)).is_empty());
    }

    #[test]
    fn test_unresolved_endpoints() {
        let (graph, [a, _, _]) = chain();

        assert_eq!(
            try_find_path(&graph, None, Some(a)),
            Err(NavError::UnresolvedNode)
        );
        assert_eq!(
            try_find_path(&graph, Some(a), Some(NodeId(99))),
            Err(NavError::UnresolvedNode)
        );
        assert_eq!(
            try_find_path(&WaypointGraph::new(), Some(a), Some(a)),
            Err(NavError::EmptyGraph)
        );
    }

    #[test]
    fn test_prefers_shorter_detour() {
        let mut graph = WaypointGraph::new();
        let start = graph.add_node(Vec3::ZERO, NodeRole::Normal);
        let goal = graph.add_node(Vec3::new(10.0, 0.0, 0.0), NodeRole::Normal);
        // Long way round, listed first
        let far = graph.add_node(Vec3::new(5.0, 20.0, 0.0), NodeRole::Normal);
        let near = graph.add_node(Vec3::new(5.0, 1.0, 0.0), NodeRole::Normal);
        graph.connect(start, far);
        graph.connect(far, goal);
        graph.connect(start, near);
        graph.connect(near, goal);

        let route = find_path(&graph, Some(start), Some(goal));

        assert_eq!(route.len(), 3);
        assert_eq!(route.waypoints()[1], Vec3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_equal_cost_ties_resolve_by_discovery_order() {
        let mut graph = WaypointGraph::new();
        let start = graph.add_node(Vec3::ZERO, NodeRole::Normal);
        let upper = graph.add_node(Vec3::new(5.0, 5.0, 0.0), NodeRole::Normal);
        let lower = graph.add_node(Vec3::new(5.0, -5.0, 0.0), NodeRole::Normal);
        let goal = graph.add_node(Vec3::new(10.0, 0.0, 0.0), NodeRole::Normal);
        graph.connect(start, upper);
        graph.connect(start, lower);
        graph.connect(upper, goal);
        graph.connect(lower, goal);

        let route = find_path(&graph, Some(start), Some(goal));
        assert_eq!(route.waypoints()[1], Vec3::new(5.0, 5.0, 0.0));
    }

    /// All-pairs shortest distances for checking optimality
    fn floyd_warshall(graph: &WaypointGraph) -> Vec<Vec<f32>> {
        let n = graph.len();
        let mut dist = vec![vec![f32::INFINITY; n]; n];
        for node in graph.nodes() {
            let i = node.id().index();
            dist[i][i] = 0.0;
            for &neighbor in node.neighbors() {
                let d = node.position().distance(graph.nodes()[neighbor.index()].position());
                dist[i][neighbor.index()] = dist[i][neighbor.index()].min(d);
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn test_routes_are_optimal() {
        // 5x5 lattice with a few diagonals and a partial wall
        let mut graph = WaypointGraph::new();
        let mut ids = Vec::new();
        for y in 0..5 {
            for x in 0..5 {
                let height = ((x * 7 + y * 3) % 4) as f32;
                ids.push(graph.add_node(
                    Vec3::new(x as f32 * 4.0, y as f32 * 4.0, height),
                    NodeRole::Normal,
                ));
            }
        }
        let at = |x: usize, y: usize| ids[y * 5 + x];
        for y in 0..5 {
            for x in 0..5 {
                if x + 1 < 5 && !(x == 2 && y < 4) {
                    graph.connect(at(x, y), at(x + 1, y));
                }
                if y + 1 < 5 {
                    graph.connect(at(x, y), at(x, y + 1));
                }
                if x + 1 < 5 && y + 1 < 5 && (x + y) % 3 == 0 {
                    graph.connect(at(x, y), at(x + 1, y + 1));
                }
            }
        }

        let best = floyd_warshall(&graph);
        for &from in &ids {
            for &to in &ids {
                let route = find_path(&graph, Some(from), Some(to));
                let expected = best[from.index()][to.index()];
                assert!(expected.is_finite());
                assert_eq!(route.destination(), graph.position(to));
                assert_eq!(route.next_waypoint(), graph.position(from));
                assert!(
                    (route.length() - expected).abs() < 1e-3,
                    "{from:?} -> {to:?}: {} vs {expected}",
                    route.length()
                );
            }
        }
    }
}
