//! Waypoint navigation
//!
//! A static graph of placed waypoints, nearest/furthest spatial queries
//! over it and A* route planning between nodes.

mod error;
mod graph;
mod navigator;
mod pathfinding;
mod route;
pub mod spatial;

pub use error::NavError;
pub use graph::{NavNode, NodeDescriptor, NodeId, NodeRole, WaypointGraph};
pub use navigator::Navigator;
pub use pathfinding::{find_path, try_find_path};
pub use route::Route;
