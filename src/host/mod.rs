pub mod renderer;
pub mod runner;
pub mod stage;

pub use runner::TerminalHost;
pub use stage::{Stage, StageSink};
