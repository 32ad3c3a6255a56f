//! Components for the headless simulation

use glam::Vec3;

use crate::ai::{BehaviorController, EntityKind};

/// World placement of an entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
}

impl Transform {
    /// Create a transform at a position
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// Hit points of an entity
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    /// Full health
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Current health as a fraction of maximum
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Apply damage, never dropping below zero
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Restore health, never exceeding maximum
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Current movement speed cap, as requested by the behavior controller
#[derive(Debug, Clone, Copy)]
pub struct MoveSpeed(pub f32);

/// Something agents can sense
#[derive(Debug, Clone, Copy)]
pub struct Sensed(pub EntityKind);

/// An AI-driven agent
#[derive(Debug, Clone)]
pub struct Agent {
    pub controller: BehaviorController,
}

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
