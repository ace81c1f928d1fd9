//! Training infrastructure: the episode state machine and its transitions,
//! the replay buffer, the self-play trainer and metrics collection.

pub mod episode;
pub mod metrics;
pub mod replay_buffer;
pub mod trainer;

pub use episode::{Episode, EpisodeConfig, EpisodePhase, Observation, Transition};
pub use replay_buffer::{BatchPolicy, ReplayBuffer, ReplayConfig};
pub use trainer::{Trainer, TrainerConfig, TrainingSummary};
