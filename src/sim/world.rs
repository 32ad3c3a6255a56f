//! Headless tick loop around hecs
//!
//! Plays the part of the game shell: it owns positions and health, feeds
//! sensing events to agents, runs their controllers once per tick and moves
//! them along the requested direction under the requested speed cap.

use glam::Vec3;
use hecs::Entity;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::components::{Agent, Health, MoveSpeed, Name, Sensed, Transform};
use super::events::{EventQueue, SimEvent};
use crate::ai::{BehaviorController, EntityKind, SensedEntity, Sensing, TargetId, TickContext};
use crate::config::BehaviorConfig;
use crate::nav::Navigator;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// How far agents can see
    pub sight_radius: f32,
    /// Seed for patrol randomness
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sight_radius: 1500.0,
            seed: 0,
        }
    }
}

/// Snapshot of sensable entities used as the agents' sight
#[derive(Debug, Default)]
pub struct SightQuery {
    sensed: Vec<SensedEntity>,
    radius: f32,
}

impl SightQuery {
    /// Sensable entities within sight of `observer`
    pub fn visible_from(&self, observer: Vec3) -> impl Iterator<Item = &SensedEntity> + '_ {
        self.sensed
            .iter()
            .filter(move |s| s.position.distance(observer) <= self.radius)
    }
}

impl Sensing for SightQuery {
    fn has_line_of_sight(&self, observer: Vec3, target: TargetId) -> bool {
        self.visible_from(observer).any(|s| s.id == target)
    }

    fn locate(&self, target: TargetId) -> Option<Vec3> {
        self.sensed
            .iter()
            .find(|s| s.id == target)
            .map(|s| s.position)
    }
}

/// Map an entity to the id agents track it by
#[must_use]
pub fn target_id(entity: Entity) -> TargetId {
    TargetId(entity.to_bits().get())
}

/// A world of agents and the things they react to
pub struct Simulation {
    /// The underlying hecs world
    pub world: hecs::World,
    /// Events raised during the previous tick
    pub events: EventQueue,
    navigator: Navigator,
    config: SimConfig,
    rng: StdRng,
}

impl Simulation {
    /// Create a simulation over a level's navigation data
    #[must_use]
    pub fn new(navigator: Navigator, config: SimConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            world: hecs::World::new(),
            events: EventQueue::new(),
            navigator,
            config,
            rng,
        }
    }

    /// Shared navigation data
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Spawn an agent at `position`
    pub fn spawn_agent(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        max_health: f32,
        behavior: BehaviorConfig,
    ) -> Entity {
        let controller = BehaviorController::new(behavior);
        let speed = MoveSpeed(controller.speed_cap());
        self.world.spawn((
            Name::new(name),
            Transform::from_position(position),
            Health::new(max_health),
            speed,
            Agent { controller },
        ))
    }

    /// Spawn a player character agents will react to
    pub fn spawn_player(&mut self, position: Vec3) -> Entity {
        self.world.spawn((
            Name::new("player"),
            Transform::from_position(position),
            Sensed(EntityKind::Player),
        ))
    }

    /// Teleport an entity
    pub fn set_position(&mut self, entity: Entity, position: Vec3) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
            transform.position = position;
        }
    }

    /// Current position of an entity
    #[must_use]
    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.world
            .get::<&Transform>(entity)
            .ok()
            .map(|t| t.position)
    }

    /// Damage an entity that has health
    pub fn damage(&mut self, entity: Entity, amount: f32) {
        if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
            health.damage(amount);
        }
    }

    /// Behavior controller of an agent
    #[must_use]
    pub fn controller(&self, entity: Entity) -> Option<hecs::Ref<'_, Agent>> {
        self.world.get::<&Agent>(entity).ok()
    }

    /// Advance every agent by one tick of `delta_time` seconds
    pub fn step(&mut self, delta_time: f32) {
        self.events.swap();

        let sight = SightQuery {
            sensed: self
                .world
                .query::<(&Transform, &Sensed)>()
                .iter()
                .map(|(entity, (transform, sensed))| SensedEntity {
                    id: target_id(entity),
                    kind: sensed.0,
                    position: transform.position,
                })
                .collect(),
            radius: self.config.sight_radius,
        };

        for (entity, (transform, health, speed, agent)) in self
            .world
            .query_mut::<(&mut Transform, &Health, &mut MoveSpeed, &mut Agent)>()
        {
            let controller = &mut agent.controller;

            // Sensing fires for everything in view; the last one wins
            let before = controller.target().map(|t| t.id);
            for candidate in sight.visible_from(transform.position) {
                controller.on_perceived(candidate);
            }
            if let Some(target) = controller.target().map(|t| t.id) {
                if before != Some(target) {
                    self.events.push(SimEvent::TargetAcquired {
                        agent: entity,
                        target,
                    });
                }
            }

            let mut ctx = TickContext {
                delta_time,
                position: transform.position,
                health_fraction: health.fraction(),
                navigator: &self.navigator,
                sensing: Some(&sight),
                rng: &mut self.rng,
            };
            let out = controller.tick(&mut ctx);

            if let Some(target) = out.lost_target {
                self.events.push(SimEvent::TargetLost {
                    agent: entity,
                    target,
                });
            }
            if out.changed() {
                self.events.push(SimEvent::BehaviorChanged {
                    agent: entity,
                    from: out.previous,
                    to: out.behavior,
                });
            }
            if let Some(cap) = out.speed_cap {
                speed.0 = cap;
            }
            if let Some(direction) = out.movement {
                transform.translate(direction * speed.0 * delta_time);
            }
        }
    }
}
