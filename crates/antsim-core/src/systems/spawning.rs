//! Spawning system - places new ants and food at random on-screen positions

use hecs::{Entity, World};
use rand::Rng;

use super::FoodRegistry;
use crate::components::{Ant, Bounds, Food, Forager, Heading, Position, Vec2, Velocity};
use crate::config::SimConfig;

/// Uniform random top-left corner in `[0, width - size) x [0, height - size)`
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds, size: f32) -> Vec2 {
    let max = bounds.max_corner(size);
    Vec2::new(rng.gen_range(0.0..max.x), rng.gen_range(0.0..max.y))
}

/// Spawn an ant with the full ant component set. Home starts at the spawn point.
pub fn spawn_ant(world: &mut World, ant: Ant, position: Vec2) -> Entity {
    world.spawn((
        ant,
        Position(position),
        Velocity::default(),
        Heading::default(),
        Forager::new(position),
    ))
}

/// Spawn a worker at a random position
pub fn spawn_worker<R: Rng + ?Sized>(world: &mut World, config: &SimConfig, rng: &mut R) -> Entity {
    let position = random_position(rng, &config.bounds(), config.worker_size);
    let entity = spawn_ant(world, Ant::worker(config.worker_speed, config.worker_size), position);
    log::debug!("Worker spawned at ({:.1}, {:.1})", position.x, position.y);
    entity
}

/// Spawn the queen at a random position (her orbit takes over on the first tick)
pub fn spawn_queen<R: Rng + ?Sized>(world: &mut World, config: &SimConfig, rng: &mut R) -> Entity {
    let position = random_position(rng, &config.bounds(), config.queen_size);
    let entity = spawn_ant(world, Ant::queen(config.queen_speed, config.queen_size), position);
    log::debug!("Queen spawned at ({:.1}, {:.1})", position.x, position.y);
    entity
}

/// Drop one piece of food at a random position. Food is never capped.
pub fn spawn_food<R: Rng + ?Sized>(foods: &mut FoodRegistry, config: &SimConfig, rng: &mut R) {
    let position = random_position(rng, &config.bounds(), config.food_size);
    foods.push(Food::new(position, config.food_size));
    log::debug!("Food spawned at ({:.1}, {:.1})", position.x, position.y);
}

/// Count every ant, queen included
pub fn population(world: &World) -> usize {
    world.query::<&Ant>().iter().count()
}

/// Spawn a worker unless the colony is at its population cap
pub fn try_spawn_worker<R: Rng + ?Sized>(
    world: &mut World,
    config: &SimConfig,
    rng: &mut R,
) -> Option<Entity> {
    let current = population(world);
    if current >= config.max_population {
        log::trace!(
            "Worker spawn skipped: population {} at cap {}",
            current,
            config.max_population
        );
        return None;
    }
    Some(spawn_worker(world, config, rng))
}
