//! Headless simulation shell
//!
//! A minimal hecs-backed stand-in for the game: positions, health, sight
//! and a fixed-step tick loop. Used by the demo binary and scenario tests.

mod components;
mod events;
mod world;

pub use components::{Agent, Health, MoveSpeed, Name, Sensed, Transform};
pub use events::{EventQueue, SimEvent};
pub use world::{SightQuery, SimConfig, Simulation, target_id};
