//! Systems - logic that operates on components

mod clock;
mod food;
mod foraging;
mod queen;
mod spawning;

pub use clock::*;
pub use food::*;
pub use foraging::*;
pub use queen::*;
pub use spawning::*;
