//! Foraging system - worker random walk, food seeking, pickup and delivery.
//!
//! Every tick each worker first takes its inertial random-walk step (clamped
//! to the screen), then either heads back with its food or, when empty-handed,
//! steers toward any available food in range. Steering overrides the walk for
//! that tick.
//!
//! A worker is larger than a piece of food, so food near the right or bottom
//! edge can sit where no worker fits. Steering therefore aims at the closest
//! spot the worker can occupy and measures pickup/drop distance from there.

use hecs::World;
use rand::Rng;

use super::FoodRegistry;
use crate::components::{Ant, Bounds, Forager, Heading, Position, Vec2, Velocity};
use crate::config::SimConfig;

/// Tuning shared by every worker for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForagingParams {
    pub bounds: Bounds,
    pub detection_radius: f32,
    pub pickup_radius: f32,
    pub direction_change_chance: f32,
}

impl ForagingParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            bounds: config.bounds(),
            detection_radius: config.food_detection_radius,
            pickup_radius: config.pickup_radius,
            direction_change_chance: config.direction_change_chance,
        }
    }
}

/// What happened to a single worker this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkerEvent {
    /// Claimed the food at this index of the registry
    PickedUp { food_index: usize },
    /// Delivered its food and made the drop point its new home
    Delivered,
}

/// Totals for one pass over all workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForagingReport {
    pub pickups: usize,
    pub deliveries: usize,
}

/// Random direction with each component drawn from {-1, 0, 1}
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.gen_range(-1i32..=1) as f32,
        rng.gen_range(-1i32..=1) as f32,
    )
}

/// Step `speed` units straight at `target`. A worker already on the target stays put.
pub fn move_towards(position: Vec2, target: Vec2, speed: f32) -> Vec2 {
    position + (target - position).normalize() * speed
}

/// One steering step toward `target`, kept on screen
fn steer(pos: Vec2, target: Vec2, ant: &Ant, bounds: &Bounds) -> Vec2 {
    bounds.clamp(move_towards(pos, target, ant.speed), ant.size)
}

/// Inertial random walk: maybe turn, step, clamp to the screen, face the velocity
fn wander<R: Rng + ?Sized>(
    ant: &Ant,
    pos: &mut Position,
    vel: &mut Velocity,
    heading: &mut Heading,
    params: &ForagingParams,
    rng: &mut R,
) {
    if rng.gen::<f32>() < params.direction_change_chance {
        vel.0 = random_direction(rng);
    }

    pos.0 += vel.0 * ant.speed;
    pos.0 = params.bounds.clamp(pos.0, ant.size);
    heading.follow(vel);
}

/// Run one tick for one worker
#[allow(clippy::too_many_arguments)]
pub fn update_worker<R: Rng + ?Sized>(
    ant: &Ant,
    pos: &mut Position,
    vel: &mut Velocity,
    heading: &mut Heading,
    forager: &mut Forager,
    foods: &mut FoodRegistry,
    params: &ForagingParams,
    rng: &mut R,
) -> Option<WorkerEvent> {
    wander(ant, pos, vel, heading, params, rng);

    let bounds = &params.bounds;

    if forager.carrying_food {
        let home = bounds.clamp(forager.home, ant.size);
        if pos.0.distance(&home) < params.pickup_radius {
            forager.drop_at(pos.0);
            return Some(WorkerEvent::Delivered);
        }
        pos.0 = steer(pos.0, home, ant, bounds);
        return None;
    }

    // Every available item in range pulls the worker this tick; the first one
    // reached is claimed and ends the scan.
    for (food_index, food) in foods.iter_mut().enumerate() {
        if !food.is_available() || pos.0.distance(&food.position()) >= params.detection_radius {
            continue;
        }

        let target = bounds.clamp(food.position(), ant.size);
        pos.0 = steer(pos.0, target, ant, bounds);
        if pos.0.distance(&target) < params.pickup_radius && food.claim() {
            forager.pick_up(food.position());
            return Some(WorkerEvent::PickedUp { food_index });
        }
    }

    None
}

/// Update every worker in spawn order. Queens are skipped.
pub fn foraging_system<R: Rng + ?Sized>(
    world: &mut World,
    foods: &mut FoodRegistry,
    params: &ForagingParams,
    rng: &mut R,
) -> ForagingReport {
    let mut report = ForagingReport::default();

    for (entity, (ant, pos, vel, heading, forager)) in world.query_mut::<(
        &Ant,
        &mut Position,
        &mut Velocity,
        &mut Heading,
        &mut Forager,
    )>() {
        if ant.is_queen() {
            continue;
        }

        match update_worker(ant, pos, vel, heading, forager, foods, params, rng) {
            Some(WorkerEvent::PickedUp { food_index }) => {
                report.pickups += 1;
                log::debug!("Worker {:?} picked up food #{}", entity, food_index);
            }
            Some(WorkerEvent::Delivered) => {
                report.deliveries += 1;
                log::debug!(
                    "Worker {:?} delivered food at ({:.1}, {:.1})",
                    entity,
                    pos.0.x,
                    pos.0.y
                );
            }
            None => {}
        }
    }

    report
}
