//! Antsim Core - Ant Colony Foraging Simulation
//!
//! A queen circles the middle of the screen while workers random-walk,
//! notice nearby food, carry it off and set up a new home wherever they
//! drop it. New workers hatch on a timer up to a population cap; food
//! appears on its own timer with no cap.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Ants (workers and the queen)
//! - **Components**: Pure data attached to ants (Position, Velocity, Forager, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! Food is kept outside the ECS in an insertion-ordered [`systems::FoodRegistry`]
//! so that "first food in range" is well defined.
//!
//! # Example
//!
//! ```rust,no_run
//! use antsim_core::prelude::*;
//!
//! let mut engine = SimulationEngine::with_config(SimConfig::default())?;
//!
//! // Frame loop driven by the renderer
//! while engine.step(FrameInput::tick(1.0 / 60.0)) == FrameStatus::Continue {
//!     let frame = engine.snapshot();
//!     println!("Total Ants: {}", frame.agent_count);
//! }
//! # Ok::<(), antsim_core::config::ConfigError>(())
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod frame;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{validate_config, ConfigError, SimConfig};
    pub use crate::engine::SimulationEngine;
    pub use crate::frame::{AgentView, FoodView, FrameInput, FrameSnapshot, FrameStatus};
    pub use crate::systems::FoodRegistry;
}
