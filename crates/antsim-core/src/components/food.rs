//! Food items - fixed position, claimed at most once.

use serde::{Deserialize, Serialize};

use super::Vec2;

/// A piece of food lying on the ground
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Food {
    position: Vec2,
    size: f32,
    picked_up: bool,
}

impl Food {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            position,
            size,
            picked_up: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_picked_up(&self) -> bool {
        self.picked_up
    }

    pub fn is_available(&self) -> bool {
        !self.picked_up
    }

    /// Mark the food as claimed. Returns false if it was already taken.
    pub fn claim(&mut self) -> bool {
        if self.picked_up {
            return false;
        }
        self.picked_up = true;
        true
    }
}
