mod agent;
mod random;
pub mod state_encoding;

pub use agent::{Agent, UpdateMetrics};
pub use random::RandomAgent;
