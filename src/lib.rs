//! Waypoint navigation and agent behavior for NPCs
//!
//! This crate provides:
//! - A static waypoint graph with A* route planning
//! - Nearest/furthest spatial queries over nodes and the escape route
//! - A per-agent behavior state machine driving those queries
//! - Level layouts in RON/JSON and a headless hecs simulation shell

pub mod ai;
pub mod config;
pub mod level;
pub mod nav;
pub mod sim;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{
        Behavior, BehaviorController, EntityKind, SensedEntity, Sensing, TargetId, TickContext,
        TickOutput,
    };
    pub use crate::config::BehaviorConfig;
    pub use crate::level::LevelLayout;
    pub use crate::nav::{NavError, Navigator, NodeDescriptor, NodeId, NodeRole, Route, WaypointGraph};
    pub use crate::sim::{SimConfig, SimEvent, Simulation};
    pub use glam::Vec3;
}
