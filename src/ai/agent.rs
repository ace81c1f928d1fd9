use crate::training::{Observation, Transition};

/// Metrics returned from a training update.
#[derive(Debug, Clone, Default)]
pub struct UpdateMetrics {
    pub loss: f32,
}

/// Interface for anything that picks moves: a learned policy, a scripted
/// opponent, or a random baseline.
pub trait Agent {
    /// Select one location from `legal` given the current observation.
    /// When `training` is true, the agent may explore; otherwise it exploits.
    fn select_action(&mut self, observation: &Observation, legal: &[usize], training: bool)
        -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Learn from a batch of transitions. Returns training metrics.
    fn batch_update(&mut self, _transitions: &[Transition]) -> UpdateMetrics {
        UpdateMetrics::default()
    }
}
