//! Queen system - the queen circles the screen center

use std::f64::consts::TAU;

use hecs::World;

use crate::components::{Ant, Bounds, Position, Vec2};

/// Queen orbit parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vec2,
    pub radius: f32,
    /// Radians per second
    pub angular_speed: f32,
}

impl Orbit {
    pub fn around_screen(bounds: &Bounds, radius: f32, angular_speed: f32) -> Self {
        Self {
            center: bounds.center(),
            radius,
            angular_speed,
        }
    }

    /// Point on the orbit after `total_seconds` of simulated time
    pub fn position_at(&self, total_seconds: f64) -> Vec2 {
        // Wrap before narrowing to f32
        let angle = (total_seconds * self.angular_speed as f64).rem_euclid(TAU) as f32;
        Vec2::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y + angle.sin() * self.radius,
        )
    }
}

/// Re-project every queen onto her orbit. Position depends only on total time,
/// not on where she was last tick; the orbit may leave the screen on small screens.
pub fn queen_system(world: &mut World, orbit: &Orbit, total_seconds: f64) {
    let position = orbit.position_at(total_seconds);
    for (_, (ant, pos)) in world.query_mut::<(&Ant, &mut Position)>() {
        if ant.is_queen() {
            pos.0 = position;
        }
    }
}
