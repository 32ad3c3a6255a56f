//! Per-agent behavior controller
//!
//! Each tick the controller:
//!
//! 1. drops its tracked target if the target is out of sight,
//! 2. runs the current behavior (replanning if the route ran out, then
//!    stepping along it),
//! 3. applies [`next_behavior`], discarding the route on any change.
//!
//! Planning failures only ever produce an empty route, which simply means
//! there is nothing to do this tick.

use glam::Vec3;
use rand::RngCore;

use super::behavior::{Behavior, next_behavior};
use super::perception::{Perception, SensedEntity, Sensing, TargetId, TrackedTarget};
use super::steering::follow_route;
use crate::config::BehaviorConfig;
use crate::nav::{Navigator, Route};

// ============================================================================
// Tick Interface
// ============================================================================

/// Everything the shell provides for one tick of one agent
pub struct TickContext<'a> {
    /// Elapsed time since the previous tick. Behaviors are tick driven and
    /// do not read it; the shell integrates movement with it.
    pub delta_time: f32,
    /// Current world position of the agent
    pub position: Vec3,
    /// Current health as a fraction of maximum
    pub health_fraction: f32,
    /// Shared navigation data
    pub navigator: &'a Navigator,
    /// Line-of-sight capability, if the agent has one
    pub sensing: Option<&'a dyn Sensing>,
    /// Random source for patrol destinations
    pub rng: &'a mut dyn RngCore,
}

/// What the shell should apply after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Unit movement direction, `None` to stay put
    pub movement: Option<Vec3>,
    /// New speed cap requested this tick
    pub speed_cap: Option<f32>,
    /// Behavior at the start of the tick
    pub previous: Behavior,
    /// Behavior after the tick
    pub behavior: Behavior,
    /// Target that went out of sight this tick
    pub lost_target: Option<TargetId>,
}

impl TickOutput {
    /// Whether the behavior changed this tick
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.behavior
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Behavior state machine of a single agent
#[derive(Debug, Clone)]
pub struct BehaviorController {
    config: BehaviorConfig,
    behavior: Behavior,
    route: Route,
    perception: Perception,
    speed_cap: f32,
    warned_no_sensing: bool,
}

impl BehaviorController {
    /// Create a patrolling controller
    #[must_use]
    pub fn new(config: BehaviorConfig) -> Self {
        let speed_cap = config.patrol_speed;
        Self {
            config,
            behavior: Behavior::Patrol,
            route: Route::new(),
            perception: Perception::new(),
            speed_cap,
            warned_no_sensing: false,
        }
    }

    /// Start in a specific behavior
    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Sensing callback from the shell.
    ///
    /// Can be called at any point between ticks; only players are tracked.
    pub fn on_perceived(&mut self, candidate: &SensedEntity) -> bool {
        self.perception.on_perceived(candidate)
    }

    /// Current behavior
    #[must_use]
    pub const fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Remaining route, goal first
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Tracked target, if any
    #[must_use]
    pub fn target(&self) -> Option<&TrackedTarget> {
        self.perception.target()
    }

    /// Last requested speed cap
    #[must_use]
    pub const fn speed_cap(&self) -> f32 {
        self.speed_cap
    }

    /// Tuning in use
    #[must_use]
    pub const fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Run one tick
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> TickOutput {
        let previous = self.behavior;
        let lost_target = self.update_sight(ctx);

        let (movement, speed_cap) = self.run_behavior(ctx);

        let target = self.perception.target().copied();
        let next = next_behavior(
            self.behavior,
            target.is_some(),
            ctx.health_fraction,
            &self.config,
        );

        if next != self.behavior {
            log::info!("Behavior {} -> {}", self.behavior, next);
            self.route.clear();
            self.behavior = next;
        } else if let (Behavior::LowHp, Some(target)) = (self.behavior, target) {
            // Cover route exhausted while still watched: break for the far end of the escape route
            if self.route.is_empty() {
                if let Some(point) = ctx.navigator.furthest_escape_point(target.last_known) {
                    log::debug!("Fleeing to escape point {point}");
                    self.route = Route::single(point);
                }
            }
        }

        TickOutput {
            movement,
            speed_cap,
            previous,
            behavior: self.behavior,
            lost_target,
        }
    }

    fn update_sight(&mut self, ctx: &TickContext<'_>) -> Option<TargetId> {
        match ctx.sensing {
            Some(sensing) => self.perception.refresh(ctx.position, sensing),
            None => {
                if !self.warned_no_sensing {
                    log::warn!("Agent has no sensing capability, threats are ignored");
                    self.warned_no_sensing = true;
                }
                self.perception.clear()
            }
        }
    }

    /// Replan if needed and take one step. Returns movement and any new speed cap.
    fn run_behavior(&mut self, ctx: &mut TickContext<'_>) -> (Option<Vec3>, Option<f32>) {
        let position = ctx.position;
        let nav = ctx.navigator;
        let threat = self.perception.target().map(|t| t.last_known);
        let mut speed_cap = None;

        if self.route.is_empty() {
            let planned = match self.behavior {
                Behavior::Patrol => Some((
                    self.config.patrol_speed,
                    nav.random_path(position, &mut *ctx.rng),
                )),
                Behavior::Evade => {
                    threat.map(|threat| (self.config.evade_speed, nav.path_away(position, threat)))
                }
                Behavior::SlipAway => {
                    let mut route = nav.exit_path(position);
                    if route.is_empty() {
                        if let Some(point) = nav.nearest_escape_point(position) {
                            route = Route::single(point);
                        }
                    }
                    Some((self.config.slip_away_speed, route))
                }
                Behavior::LowHp => Some((
                    self.config.low_hp_speed,
                    nav.nearest_cover_path(position, position),
                )),
                Behavior::Controlled => {
                    Some((self.config.controlled_speed, nav.spawn_path(position)))
                }
            };

            if let Some((cap, route)) = planned {
                self.speed_cap = cap;
                speed_cap = Some(cap);
                self.route = route;
            }
        }

        // Evading needs a target to evade from
        if self.behavior == Behavior::Evade && threat.is_none() {
            return (None, speed_cap);
        }

        let movement = follow_route(&mut self.route, position, self.config.arrival_threshold);
        (movement, speed_cap)
    }
}
