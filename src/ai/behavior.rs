//! Agent behavioral states
//!
//! Agents patrol until they first sense a threat, then move between four
//! threat-driven states. Transitions are a pure function of the current
//! state, whether a target is tracked and the agent's health fraction, so
//! they can be tested without any world or movement.
//!
//! | From | Condition | To |
//! |---|---|---|
//! | Patrol | target sensed | Evade |
//! | Evade | target lost | SlipAway |
//! | Evade | health below low threshold | LowHp |
//! | SlipAway | target sensed, full health | Controlled |
//! | SlipAway | target sensed, low threshold ≤ health ≤ evade ceiling | Evade |
//! | SlipAway | target sensed, health below low threshold | LowHp |
//! | LowHp | target lost | SlipAway |
//! | Controlled | target lost | SlipAway |
//! | Controlled | target sensed, health below full | Evade |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BehaviorConfig;

/// The active behavior of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Behavior {
    /// Wander between random waypoints; no threat sensed yet
    #[default]
    Patrol,
    /// Move away from the sensed target
    Evade,
    /// Sneak off toward the escape route
    SlipAway,
    /// Run for the nearest cover
    LowHp,
    /// Head back to the spawn point
    Controlled,
}

impl Behavior {
    /// State name for debugging and logging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Patrol => "Patrol",
            Self::Evade => "Evade",
            Self::SlipAway => "SlipAway",
            Self::LowHp => "LowHP",
            Self::Controlled => "Controlled",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decide the behavior for the next tick
#[must_use]
pub fn next_behavior(
    current: Behavior,
    target_present: bool,
    health: f32,
    config: &BehaviorConfig,
) -> Behavior {
    let low = config.low_health_threshold;

    match current {
        Behavior::Patrol if target_present => Behavior::Evade,
        Behavior::Patrol => Behavior::Patrol,

        Behavior::Evade if !target_present => Behavior::SlipAway,
        Behavior::Evade if health < low => Behavior::LowHp,
        Behavior::Evade => Behavior::Evade,

        Behavior::SlipAway if !target_present => Behavior::SlipAway,
        Behavior::SlipAway if health >= 1.0 => Behavior::Controlled,
        Behavior::SlipAway if (low..=config.evade_health_ceiling).contains(&health) => {
            Behavior::Evade
        }
        Behavior::SlipAway if health < low => Behavior::LowHp,
        Behavior::SlipAway => Behavior::SlipAway,

        Behavior::LowHp if !target_present => Behavior::SlipAway,
        Behavior::LowHp => Behavior::LowHp,

        Behavior::Controlled if !target_present => Behavior::SlipAway,
        Behavior::Controlled if health < 1.0 => Behavior::Evade,
        Behavior::Controlled => Behavior::Controlled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(current: Behavior, target_present: bool, health: f32) -> Behavior {
        next_behavior(current, target_present, health, &BehaviorConfig::default())
    }

    #[test]
    fn test_patrol_until_target_sensed() {
        assert_eq!(next(Behavior::Patrol, false, 0.1), Behavior::Patrol);
        assert_eq!(next(Behavior::Patrol, true, 1.0), Behavior::Evade);
        assert_eq!(next(Behavior::Patrol, true, 0.1), Behavior::Evade);
    }

    #[test]
    fn test_evade_transitions() {
        assert_eq!(next(Behavior::Evade, false, 1.0), Behavior::SlipAway);
        assert_eq!(next(Behavior::Evade, false, 0.1), Behavior::SlipAway);
        assert_eq!(next(Behavior::Evade, true, 0.39), Behavior::LowHp);
        assert_eq!(next(Behavior::Evade, true, 0.4), Behavior::Evade);
        assert_eq!(next(Behavior::Evade, true, 1.0), Behavior::Evade);
    }

    #[test]
    fn test_slip_away_transitions() {
        assert_eq!(next(Behavior::SlipAway, false, 0.1), Behavior::SlipAway);
        assert_eq!(next(Behavior::SlipAway, true, 1.0), Behavior::Controlled);
        assert_eq!(next(Behavior::SlipAway, true, 0.9), Behavior::Evade);
        assert_eq!(next(Behavior::SlipAway, true, 0.4), Behavior::Evade);
        assert_eq!(next(Behavior::SlipAway, true, 0.2), Behavior::LowHp);
    }

    #[test]
    fn test_slip_away_gap_between_ceiling_and_full_health() {
        assert_eq!(next(Behavior::SlipAway, true, 0.95), Behavior::SlipAway);
    }

    #[test]
    fn test_low_hp_transitions() {
        assert_eq!(next(Behavior::LowHp, false, 0.1), Behavior::SlipAway);
        assert_eq!(next(Behavior::LowHp, true, 0.1), Behavior::LowHp);
        assert_eq!(next(Behavior::LowHp, true, 1.0), Behavior::LowHp);
    }

    #[test]
    fn test_controlled_transitions() {
        assert_eq!(next(Behavior::Controlled, false, 1.0), Behavior::SlipAway);
        assert_eq!(next(Behavior::Controlled, true, 1.0), Behavior::Controlled);
        assert_eq!(next(Behavior::Controlled, true, 0.99), Behavior::Evade);
    }

    #[test]
    fn test_transitions_are_deterministic() {
        let states = [
            Behavior::Patrol,
            Behavior::Evade,
            Behavior::SlipAway,
            Behavior::LowHp,
            Behavior::Controlled,
        ];
        for state in states {
            for present in [false, true] {
                for health in [0.0, 0.39, 0.4, 0.65, 0.9, 0.95, 1.0] {
                    let first = next(state, present, health);
                    for _ in 0..3 {
                        assert_eq!(next(state, present, health), first);
                    }
                }
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let config = BehaviorConfig::default().with_health_thresholds(0.25, 0.75);

        assert_eq!(
            next_behavior(Behavior::Evade, true, 0.3, &config),
            Behavior::Evade
        );
        assert_eq!(
            next_behavior(Behavior::SlipAway, true, 0.8, &config),
            Behavior::SlipAway
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Behavior::LowHp.to_string(), "LowHP");
        assert_eq!(Behavior::default(), Behavior::Patrol);
    }
}
