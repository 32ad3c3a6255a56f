//! Threat perception
//!
//! Acquisition is event driven: the shell reports sensed entities through
//! [`Perception::on_perceived`] whenever its sensing fires. Loss is polled
//! once per tick against the shell's line-of-sight query.

use glam::Vec3;

/// Identity of a sensed entity, assigned by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// What kind of entity was sensed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A player character, the only kind agents react to
    Player,
    /// Another agent
    Agent,
    /// Anything else
    Other,
}

/// A candidate delivered by the shell's sensing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedEntity {
    pub id: TargetId,
    pub kind: EntityKind,
    pub position: Vec3,
}

/// The target an agent is currently tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedTarget {
    /// Who is being tracked
    pub id: TargetId,
    /// Where the target was last seen
    pub last_known: Vec3,
}

/// Sensing capability provided by the shell
pub trait Sensing {
    /// Whether `target` is currently visible from `observer`
    fn has_line_of_sight(&self, observer: Vec3, target: TargetId) -> bool;

    /// Current position of `target`, if the shell still knows it
    fn locate(&self, target: TargetId) -> Option<Vec3>;
}

/// Perception record of one agent.
///
/// Tracks at most one target; the most recently sensed player wins.
#[derive(Debug, Clone, Default)]
pub struct Perception {
    tracked: Option<TrackedTarget>,
}

impl Perception {
    /// Create an empty record
    #[must_use]
    pub const fn new() -> Self {
        Self { tracked: None }
    }

    /// Handle a sensing event. Returns true if the candidate is now tracked.
    pub fn on_perceived(&mut self, candidate: &SensedEntity) -> bool {
        if candidate.kind != EntityKind::Player {
            return false;
        }
        let previous = self.tracked.replace(TrackedTarget {
            id: candidate.id,
            last_known: candidate.position,
        });
        if previous.is_none_or(|p| p.id != candidate.id) {
            log::debug!("Sensed player {:?}", candidate.id);
        }
        true
    }

    /// Drop the target if it is out of sight, otherwise refresh its position.
    ///
    /// Returns the id of a target lost this call.
    pub fn refresh(&mut self, observer: Vec3, sensing: &dyn Sensing) -> Option<TargetId> {
        let tracked = self.tracked.as_mut()?;
        if !sensing.has_line_of_sight(observer, tracked.id) {
            let lost = tracked.id;
            self.tracked = None;
            log::debug!("Lost player {lost:?}");
            return Some(lost);
        }
        if let Some(position) = sensing.locate(tracked.id) {
            tracked.last_known = position;
        }
        None
    }

    /// The tracked target, if any
    #[must_use]
    pub fn target(&self) -> Option<&TrackedTarget> {
        self.tracked.as_ref()
    }

    /// Check if a target is tracked
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracked.is_some()
    }

    /// Forget the tracked target
    pub fn clear(&mut self) -> Option<TargetId> {
        self.tracked.take().map(|t| t.id)
    }
}
