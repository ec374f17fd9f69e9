pub mod cli;
pub mod config;
pub mod core;
pub mod host;

// Re-export for convenience
pub use crate::core::controller::{ChantMode, RoundController, RoundResult};
pub use crate::core::engine::Engine;
pub use crate::core::moves::{resolve, Move, Outcome};
pub use crate::core::session::{Session, SpecialEvent};
