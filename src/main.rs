//! Headless demo: a guard patrols a small compound, is spotted, wounded
//! and finally slips away once the player leaves.
//!
//! Usage: `waypoint-ai [level.ron|level.json] [behavior.ron]`

use std::error::Error;

use waypoint_ai::prelude::*;
use waypoint_ai::sim::{Health, Name, Transform};

const TICK: f32 = 1.0 / 20.0;
const TICKS: u32 = 400;

const PLAYER_APPEARS: u32 = 60;
const PLAYER_SHOOTS: u32 = 140;
const PLAYER_LEAVES: u32 = 220;

fn demo_level() -> LevelLayout {
    let mut layout = LevelLayout::new("Compound").with_escape_route(vec![
        Vec3::new(3000.0, 0.0, 0.0),
        Vec3::new(3600.0, 0.0, 800.0),
        Vec3::new(4200.0, 0.0, 1600.0),
    ]);

    layout.add_node(
        NodeDescriptor::new("barracks", Vec3::ZERO)
            .with_role(NodeRole::SpawnPoint)
            .connected_to("yard"),
    );
    layout.add_node(
        NodeDescriptor::new("yard", Vec3::new(1000.0, 0.0, 0.0))
            .connected_to("barracks")
            .connected_to("crates")
            .connected_to("tower")
            .connected_to("gate"),
    );
    layout.add_node(
        NodeDescriptor::new("crates", Vec3::new(1000.0, 0.0, 1000.0))
            .with_role(NodeRole::Cover)
            .connected_to("yard")
            .connected_to("tower"),
    );
    layout.add_node(
        NodeDescriptor::new("tower", Vec3::new(2000.0, 0.0, 1000.0))
            .connected_to("crates")
            .connected_to("yard")
            .connected_to("gate"),
    );
    layout.add_node(
        NodeDescriptor::new("wall", Vec3::new(2000.0, 0.0, -800.0))
            .with_role(NodeRole::Cover)
            .connected_to("gate"),
    );
    layout.add_node(
        NodeDescriptor::new("gate", Vec3::new(3000.0, 0.0, 0.0))
            .with_role(NodeRole::EscapePoint)
            .connected_to("yard")
            .connected_to("tower")
            .connected_to("wall"),
    );
    layout
}

fn name_of(sim: &Simulation, entity: hecs::Entity) -> String {
    sim.world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| format!("{entity:?}"))
}

fn report(sim: &Simulation, tick: u32) {
    for event in sim.events.iter() {
        match event {
            SimEvent::TargetAcquired { agent, target } => {
                log::info!("[{tick}] {} spotted target {}", name_of(sim, *agent), target.0);
            }
            SimEvent::TargetLost { agent, target } => {
                log::info!("[{tick}] {} lost sight of {}", name_of(sim, *agent), target.0);
            }
            SimEvent::BehaviorChanged { agent, from, to } => {
                log::info!("[{tick}] {}: {from} -> {to}", name_of(sim, *agent));
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let layout = match args.next() {
        Some(path) if path.ends_with(".json") => LevelLayout::load_json(&path)?,
        Some(path) => LevelLayout::load_ron(&path)?,
        None => demo_level(),
    };
    let behavior = match args.next() {
        Some(path) => BehaviorConfig::load_ron(&path)?,
        None => BehaviorConfig::default(),
    };

    log::info!("Level '{}' with {} waypoints", layout.name, layout.node_count());

    let mut sim = Simulation::new(layout.navigator(), SimConfig::default());
    let spawn = sim
        .navigator()
        .graph()
        .spawn_node()
        .and_then(|id| sim.navigator().graph().position(id))
        .unwrap_or(Vec3::ZERO);
    let guard = sim.spawn_agent("guard", spawn, 100.0, behavior);
    let mut player = None;

    for tick in 0..TICKS {
        match tick {
            PLAYER_APPEARS => {
                let near = sim.position(guard).unwrap_or(spawn) + Vec3::new(0.0, 0.0, -600.0);
                log::info!("[{tick}] Player appears at {near}");
                player = Some(sim.spawn_player(near));
            }
            PLAYER_SHOOTS => {
                log::info!("[{tick}] Player opens fire");
                sim.damage(guard, 70.0);
            }
            PLAYER_LEAVES => {
                if let Some(player) = player {
                    log::info!("[{tick}] Player leaves");
                    sim.set_position(player, Vec3::new(-50_000.0, 0.0, 0.0));
                }
            }
            _ => {}
        }

        sim.step(TICK);
        report(&sim, tick);
    }

    for (entity, (name, transform, health)) in
        sim.world.query::<(&Name, &Transform, &Health)>().iter()
    {
        let behavior = sim
            .controller(entity)
            .map(|agent| agent.controller.behavior())
            .unwrap_or_default();
        log::info!(
            "{}: {behavior} at {} with {:.0}% health",
            name.0,
            transform.position,
            health.fraction() * 100.0
        );
    }

    Ok(())
}
