//! Per-frame contract with the rendering/input layer.
//!
//! The adapter feeds one [`FrameInput`] per rendered frame and reads back a
//! [`FrameSnapshot`] to draw.

use serde::{Deserialize, Serialize};

use crate::components::Vec2;

/// What the adapter reports each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Wall time since the previous frame
    pub delta_seconds: f32,
    /// Set when the user asked to quit (e.g. Escape)
    pub exit_requested: bool,
}

impl FrameInput {
    pub fn tick(delta_seconds: f32) -> Self {
        Self {
            delta_seconds,
            exit_requested: false,
        }
    }

    pub fn exit() -> Self {
        Self {
            delta_seconds: 0.0,
            exit_requested: true,
        }
    }
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameStatus {
    Continue,
    Exit,
}

/// Drawable state of one ant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub position: Vec2,
    /// Sprite rotation in radians; always 0 for the queen
    pub rotation: f32,
    pub is_queen: bool,
    pub carrying_food: bool,
}

/// Drawable state of one food item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub position: Vec2,
    pub picked_up: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Simulated seconds since start
    pub elapsed_seconds: f64,
    /// Ants in spawn order
    pub agents: Vec<AgentView>,
    /// Food in registry order
    pub foods: Vec<FoodView>,
    /// Shown on screen as "Total Ants"
    pub agent_count: usize,
}

impl FrameSnapshot {
    /// Food still lying on the ground (the only food a renderer draws)
    pub fn visible_food(&self) -> impl Iterator<Item = &FoodView> {
        self.foods.iter().filter(|f| !f.picked_up)
    }
}
