//! Simulation event queue
//!
//! Double-buffered: events pushed during tick N are readable during tick
//! N+1, after [`EventQueue::swap`].

use std::collections::VecDeque;

use hecs::Entity;

use crate::ai::{Behavior, TargetId};

// ============================================================================
// Event Types
// ============================================================================

/// Things that happened to agents during a tick
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimEvent {
    /// An agent started tracking a target.
    TargetAcquired {
        /// The agent
        agent: Entity,
        /// The sensed target
        target: TargetId,
    },

    /// An agent lost sight of its target.
    TargetLost {
        /// The agent
        agent: Entity,
        /// The target that went out of sight
        target: TargetId,
    },

    /// An agent switched behavior.
    BehaviorChanged {
        /// The agent
        agent: Entity,
        /// Behavior before the tick
        from: Behavior,
        /// Behavior after the tick
        to: Behavior,
    },
}

// ============================================================================
// Event Queue
// ============================================================================

/// Double-buffered event queue for tick-consistent event processing.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this tick
    pending: VecDeque<SimEvent>,
    /// Events from previous tick, ready for processing
    processing: VecDeque<SimEvent>,
}

impl EventQueue {
    /// Default initial capacity for event queues.
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a new event queue with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            processing: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Push an event to be processed next tick.
    #[inline]
    pub fn push(&mut self, event: SimEvent) {
        self.pending.push_back(event);
    }

    /// Swap the pending and processing queues.
    ///
    /// Call this once per tick, before pushing new events.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    /// Iterate over events from the previous tick.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.processing.iter()
    }

    /// Drain all events from the previous tick.
    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = SimEvent> + '_ {
        self.processing.drain(..)
    }

    /// Check if there are any events to process.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    /// Get the number of events ready for processing.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    /// Get the number of events pending for next tick.
    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
