//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod ant;
mod common;
mod food;

pub use ant::*;
pub use common::*;
pub use food::*;
