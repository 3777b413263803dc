//! Ant components - workers and the queen share one component set.

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Which behavior variant an ant runs each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntKind {
    /// Random-walks, forages and carries food home
    Worker,
    /// Orbits the screen center; never carries food
    Queen,
}

/// Core ant component - immutable after spawn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ant {
    pub kind: AntKind,
    /// Distance covered per tick when moving
    pub speed: f32,
    /// Render size, also used for screen clamping
    pub size: f32,
}

impl Ant {
    pub fn worker(speed: f32, size: f32) -> Self {
        Self {
            kind: AntKind::Worker,
            speed,
            size,
        }
    }

    pub fn queen(speed: f32, size: f32) -> Self {
        Self {
            kind: AntKind::Queen,
            speed,
            size,
        }
    }

    pub fn is_queen(&self) -> bool {
        self.kind == AntKind::Queen
    }
}

/// Logical foraging state derived from [`Forager::carrying_food`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForageState {
    Wandering,
    Returning,
}

/// Food-carrying state and the point food gets delivered to.
///
/// `home` starts at the spawn point, becomes the pickup point when food is
/// claimed and resets to the drop point when the food is delivered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Forager {
    pub carrying_food: bool,
    pub home: Vec2,
}

impl Forager {
    pub fn new(home: Vec2) -> Self {
        Self {
            carrying_food: false,
            home,
        }
    }

    pub fn state(&self) -> ForageState {
        if self.carrying_food {
            ForageState::Returning
        } else {
            ForageState::Wandering
        }
    }

    pub fn pick_up(&mut self, food_position: Vec2) {
        self.carrying_food = true;
        self.home = food_position;
    }

    pub fn drop_at(&mut self, position: Vec2) {
        self.carrying_food = false;
        self.home = position;
    }
}
