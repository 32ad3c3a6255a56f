//! Waypoint graph store
//!
//! All navigation nodes live in a single arena indexed by [`NodeId`].
//! Adjacency is stored per node as a list of ids, so the graph never holds
//! references into itself.

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of a node inside a [`WaypointGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Arena slot of this node
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Gameplay role of a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeRole {
    /// Plain navigation point
    #[default]
    Normal,
    /// Point an agent can hide at
    Cover,
    /// Where agents return to when in control
    SpawnPoint,
    /// Entrance of the escape route
    EscapePoint,
}

/// A single navigation node
#[derive(Debug, Clone)]
pub struct NavNode {
    id: NodeId,
    position: Vec3,
    role: NodeRole,
    neighbors: SmallVec<[NodeId; 4]>,
}

impl NavNode {
    /// Node id
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// World position
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Gameplay role
    #[must_use]
    pub const fn role(&self) -> NodeRole {
        self.role
    }

    /// Outgoing connections, in insertion order
    #[must_use]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// A placed node as enumerated from the level.
///
/// Connections refer to other descriptors by name and are resolved to
/// [`NodeId`]s when the graph is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Unique name within the level
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Gameplay role
    #[serde(default)]
    pub role: NodeRole,
    /// Names of the nodes this one connects to
    #[serde(default)]
    pub connections: Vec<String>,
}

impl NodeDescriptor {
    /// Create a normal node with no connections
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            role: NodeRole::Normal,
            connections: Vec::new(),
        }
    }

    /// Set the node role
    #[must_use]
    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.role = role;
        self
    }

    /// Add a connection by name
    #[must_use]
    pub fn connected_to(mut self, name: impl Into<String>) -> Self {
        self.connections.push(name.into());
        self
    }
}

/// The static navigation graph for a session.
///
/// Besides the general node pool, the store keeps the role indexes the
/// behavior layer asks for: one spawn node, one escape node and any number
/// of cover nodes.
#[derive(Debug, Clone, Default)]
pub struct WaypointGraph {
    nodes: Vec<NavNode>,
    cover: Vec<NodeId>,
    spawn: Option<NodeId>,
    escape: Option<NodeId>,
}

impl WaypointGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from the level's node enumeration.
    ///
    /// Connections naming an unknown node are skipped with a warning. If more
    /// than one spawn or escape node is placed, the last one wins.
    #[must_use]
    pub fn populate(descriptors: &[NodeDescriptor]) -> Self {
        let mut graph = Self::new();
        let mut by_name: FxHashMap<&str, NodeId> = FxHashMap::default();

        for descriptor in descriptors {
            let id = graph.add_node(descriptor.position, descriptor.role);
            log::trace!("Node {}: {}", descriptor.name, descriptor.position);
            if by_name.insert(descriptor.name.as_str(), id).is_some() {
                log::warn!(
                    "Duplicate node name '{}', connections resolve to the last one",
                    descriptor.name
                );
            }
        }

        for (index, descriptor) in descriptors.iter().enumerate() {
            let from = NodeId(index as u32);
            for name in &descriptor.connections {
                match by_name.get(name.as_str()) {
                    Some(&to) => {
                        graph.connect_one_way(from, to);
                    }
                    None => log::warn!(
                        "Node '{}' connects to unknown node '{}', skipping",
                        descriptor.name,
                        name
                    ),
                }
            }
        }

        if graph.is_empty() {
            log::warn!("Waypoint graph populated with no nodes");
        } else {
            log::info!(
                "Waypoint graph populated: {} nodes, {} cover, spawn: {}, escape: {}",
                graph.len(),
                graph.cover.len(),
                graph.spawn.is_some(),
                graph.escape.is_some()
            );
        }

        graph
    }

    /// Add a node and classify it by role
    pub fn add_node(&mut self, position: Vec3, role: NodeRole) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NavNode {
            id,
            position,
            role,
            neighbors: SmallVec::new(),
        });

        match role {
            NodeRole::Normal => {}
            NodeRole::Cover => self.cover.push(id),
            NodeRole::SpawnPoint => {
                if let Some(previous) = self.spawn.replace(id) {
                    log::warn!("Multiple spawn nodes placed, {previous:?} replaced by {id:?}");
                }
            }
            NodeRole::EscapePoint => {
                if let Some(previous) = self.escape.replace(id) {
                    log::warn!("Multiple escape nodes placed, {previous:?} replaced by {id:?}");
                }
            }
        }

        id
    }

    /// Connect two nodes in both directions
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        let forward = self.connect_one_way(a, b);
        let backward = self.connect_one_way(b, a);
        forward && backward
    }

    /// Add a directed edge. Returns false if either node is unknown.
    pub fn connect_one_way(&mut self, from: NodeId, to: NodeId) -> bool {
        if to.index() >= self.nodes.len() {
            log::warn!("Cannot connect {from:?} to unknown node {to:?}");
            return false;
        }
        let Some(node) = self.nodes.get_mut(from.index()) else {
            log::warn!("Cannot connect unknown node {from:?} to {to:?}");
            return false;
        };
        if !node.neighbors.contains(&to) {
            node.neighbors.push(to);
        }
        true
    }

    /// Look up a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id.index())
    }

    /// Position of a node
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(NavNode::position)
    }

    /// Outgoing connections of a node (empty for unknown ids)
    #[must_use]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(NavNode::neighbors).unwrap_or_default()
    }

    /// All nodes in arena order
    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    /// Ids of every node, the general pool
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(NavNode::id)
    }

    /// Cover nodes in placement order
    #[must_use]
    pub fn cover_nodes(&self) -> &[NodeId] {
        &self.cover
    }

    /// The spawn node, if one was placed
    #[must_use]
    pub const fn spawn_node(&self) -> Option<NodeId> {
        self.spawn
    }

    /// The escape node, if one was placed
    #[must_use]
    pub const fn escape_node(&self) -> Option<NodeId> {
        self.escape
    }

    /// Number of nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Vec<NodeDescriptor> {
        vec![
            NodeDescriptor::new("a", Vec3::ZERO).connected_to("b"),
            NodeDescriptor::new("b", Vec3::new(5.0, 0.0, 0.0))
                .with_role(NodeRole::Cover)
                .connected_to("a")
                .connected_to("c"),
            NodeDescriptor::new("c", Vec3::new(10.0, 0.0, 0.0))
                .with_role(NodeRole::SpawnPoint)
                .connected_to("b")
                .connected_to("missing"),
            NodeDescriptor::new("d", Vec3::new(10.0, 5.0, 0.0)).with_role(NodeRole::EscapePoint),
        ]
    }

    #[test]
    fn test_populate_classifies_roles() {
        let graph = WaypointGraph::populate(&level());

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.cover_nodes(), &[NodeId(1)]);
        assert_eq!(graph.spawn_node(), Some(NodeId(2)));
        assert_eq!(graph.escape_node(), Some(NodeId(3)));
        assert_eq!(graph.node(NodeId(3)).map(NavNode::role), Some(NodeRole::EscapePoint));
    }

    #[test]
    fn test_populate_resolves_connections() {
        let graph = WaypointGraph::populate(&level());

        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(1)]);
        assert_eq!(graph.neighbors(NodeId(1)), &[NodeId(0), NodeId(2)]);
        // The dangling "missing" connection is dropped
        assert_eq!(graph.neighbors(NodeId(2)), &[NodeId(1)]);
        assert!(graph.neighbors(NodeId(3)).is_empty());
    }

    #[test]
    fn test_populate_empty() {
        let graph = WaypointGraph::populate(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.spawn_node(), None);
        assert_eq!(graph.escape_node(), None);
    }

    #[test]
    fn test_last_spawn_wins() {
        let mut graph = WaypointGraph::new();
        graph.add_node(Vec3::ZERO, NodeRole::SpawnPoint);
        let second = graph.add_node(Vec3::X, NodeRole::SpawnPoint);

        assert_eq!(graph.spawn_node(), Some(second));
    }

    #[test]
    fn test_connect_is_bidirectional_and_deduplicated() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_node(Vec3::ZERO, NodeRole::Normal);
        let b = graph.add_node(Vec3::X, NodeRole::Normal);

        assert!(graph.connect(a, b));
        assert!(graph.connect(b, a));

        assert_eq!(graph.neighbors(a), &[b]);
        assert_eq!(graph.neighbors(b), &[a]);
    }

    #[test]
    fn test_connect_unknown_node() {
        let mut graph = WaypointGraph::new();
        let a = graph.add_node(Vec3::ZERO, NodeRole::Normal);

        assert!(!graph.connect_one_way(a, NodeId(7)));
        assert!(!graph.connect_one_way(NodeId(7), a));
        assert!(graph.neighbors(a).is_empty());
        assert!(graph.neighbors(NodeId(7)).is_empty());
    }
}
