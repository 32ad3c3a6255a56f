//! Nearest / furthest spatial queries
//!
//! Every query is a linear scan over its candidates. Waypoint counts are
//! small enough that this is fine; a spatial index would be the next step
//! for large levels. The first candidate reaching the minimum (or maximum)
//! distance wins.

use glam::Vec3;

use super::graph::{NodeId, WaypointGraph};

/// Node among `candidates` closest to `point`.
///
/// Returns `None` when there are no candidates. Ids unknown to the graph
/// are skipped.
#[must_use]
pub fn nearest(
    graph: &WaypointGraph,
    candidates: impl IntoIterator<Item = NodeId>,
    point: Vec3,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, f32)> = None;
    for id in candidates {
        let Some(position) = graph.position(id) else {
            continue;
        };
        let distance = position.distance(point);
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Node among `candidates` furthest from `point`.
///
/// Same empty-input contract as [`nearest`].
#[must_use]
pub fn furthest(
    graph: &WaypointGraph,
    candidates: impl IntoIterator<Item = NodeId>,
    point: Vec3,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, f32)> = None;
    for id in candidates {
        let Some(position) = graph.position(id) else {
            continue;
        };
        let distance = position.distance(point);
        if best.is_none_or(|(_, max)| distance > max) {
            best = Some((id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Point of a polyline closest to `point`
#[must_use]
pub fn nearest_point(points: &[Vec3], point: Vec3) -> Option<Vec3> {
    let mut best: Option<(Vec3, f32)> = None;
    for &candidate in points {
        let distance = candidate.distance(point);
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Point of a polyline furthest from `point`
#[must_use]
pub fn furthest_point(points: &[Vec3], point: Vec3) -> Option<Vec3> {
    let mut best: Option<(Vec3, f32)> = None;
    for &candidate in points {
        let distance = candidate.distance(point);
        if best.is_none_or(|(_, max)| distance > max) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::graph::NodeRole;

    fn line_graph() -> WaypointGraph {
        let mut graph = WaypointGraph::new();
        for x in [0.0, 5.0, 10.0, 20.0] {
            graph.add_node(Vec3::new(x, 0.0, 0.0), NodeRole::Normal);
        }
        graph
    }

    #[test]
    fn test_nearest() {
        let graph = line_graph();
        let found = nearest(&graph, graph.node_ids(), Vec3::new(6.0, 0.0, 0.0));
        assert_eq!(found, Some(NodeId(1)));
    }

    #[test]
    fn test_furthest() {
        let graph = line_graph();
        let found = furthest(&graph, graph.node_ids(), Vec3::new(6.0, 0.0, 0.0));
        assert_eq!(found, Some(NodeId(3)));
    }

    #[test]
    fn test_empty_candidates() {
        let graph = line_graph();
        assert_eq!(nearest(&graph, [], Vec3::ZERO), None);
        assert_eq!(furthest(&graph, [], Vec3::ZERO), None);
        assert_eq!(nearest(&WaypointGraph::new(), [NodeId(0)], Vec3::ZERO), None);
        assert_eq!(nearest_point(&[], Vec3::ZERO), None);
        assert_eq!(furthest_point(&[], Vec3::ZERO), None);
    }

    #[test]
    fn test_first_encountered_wins_ties() {
        let graph = line_graph();
        // Nodes 0 and 2 are both 5 units from node 1's position
        let point = Vec3::new(5.0, 0.0, 0.0);
        assert_eq!(nearest(&graph, [NodeId(0), NodeId(2)], point), Some(NodeId(0)));
        assert_eq!(nearest(&graph, [NodeId(2), NodeId(0)], point), Some(NodeId(2)));
        assert_eq!(furthest(&graph, [NodeId(2), NodeId(0)], point), Some(NodeId(2)));
    }

    #[test]
    fn test_uses_full_3d_distance() {
        let mut graph = WaypointGraph::new();
        let low = graph.add_node(Vec3::new(3.0, 0.0, 0.0), NodeRole::Normal);
        let high = graph.add_node(Vec3::new(0.0, 0.0, 4.0), NodeRole::Normal);

        let point = Vec3::new(0.0, 0.0, 2.0);
        assert_eq!(nearest(&graph, graph.node_ids(), point), Some(high));
        assert_eq!(furthest(&graph, graph.node_ids(), point), Some(low));
    }

    #[test]
    fn test_nearest_and_furthest_bound_every_candidate() {
        let graph = line_graph();
        for point in [Vec3::ZERO, Vec3::new(12.0, 3.0, -1.0), Vec3::splat(100.0)] {
            let near = nearest(&graph, graph.node_ids(), point)
                .and_then(|id| graph.position(id))
                .unwrap();
            let far = furthest(&graph, graph.node_ids(), point)
                .and_then(|id| graph.position(id))
                .unwrap();
            for node in graph.nodes() {
                assert!(near.distance(point) <= node.position().distance(point));
                assert!(far.distance(point) >= node.position().distance(point));
            }
        }
    }

    #[test]
    fn test_polyline_points() {
        let route = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
        ];
        let from = Vec3::new(1.0, 1.0, 0.0);

        assert_eq!(nearest_point(&route, from), Some(route[0]));
        assert_eq!(furthest_point(&route, from), Some(route[2]));
    }
}
