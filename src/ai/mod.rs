//! Agent behavior
//!
//! Provides threat perception, route steering and the per-agent behavior
//! state machine that drives navigation queries.

mod behavior;
mod controller;
mod perception;
mod steering;

pub use behavior::{Behavior, next_behavior};
pub use controller::{BehaviorController, TickContext, TickOutput};
pub use perception::{EntityKind, Perception, SensedEntity, Sensing, TargetId, TrackedTarget};
pub use steering::{Seek, follow_route};
