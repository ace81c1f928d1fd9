use crate::ai::Agent;
use crate::error::TrainingError;
use crate::game::Player;
use crate::training::episode::{episode_seed, evaluate, play_self_play_episode, Episode};
use crate::training::metrics::TrainingMetrics;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    pub log_interval: usize,
    pub eval_interval: usize,
    pub eval_games: usize,
    /// Seeds the evaluation opponent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 10_000,
            log_interval: 100,
            eval_interval: 500,
            eval_games: 100,
            seed: None,
        }
    }
}

/// Figures reported at the end of a training run.
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub blue_win_rate: f32,
    pub first_mover_win_rate: f32,
    pub average_game_length: f32,
    pub final_eval_win_rate: f32,
}

/// Self-play trainer: the agent plays both colors, every step lands in the
/// episode's replay buffer, and the agent is updated from a batch after each
/// game.
pub struct Trainer {
    config: TrainerConfig,
    verbose: bool,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer {
            config,
            verbose: true,
        }
    }

    /// Suppress progress output.
    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run the full training loop.
    pub fn train(
        &self,
        agent: &mut dyn Agent,
        episode: &mut Episode,
    ) -> Result<TrainingSummary, TrainingError> {
        let window = self.config.log_interval.max(1);
        let mut metrics = TrainingMetrics::with_capacity(window);
        let total = self.config.num_episodes;

        self.log(format!(
            "Starting {} self-play on a {}x{} board for {} episodes...",
            agent.name(),
            episode.rows(),
            episode.columns(),
            total
        ));
        self.log("-------------------------------------------".to_string());

        for index in 1..=total {
            let trace = play_self_play_episode(episode, agent)?;
            let batch = episode.drain_batch();
            if !batch.is_empty() {
                let update_metrics = agent.batch_update(&batch);
                if update_metrics.loss > 0.0 {
                    metrics.record_update(update_metrics.loss);
                }
            }
            metrics.record_episode(trace.result);

            if index % window == 0 {
                self.log(format!(
                    "Episode {}/{} | loss: {:.4} | blue_win({}): {:.1}% | first_mover_win: {:.1}% | avg_len: {:.1} | buffer: {}",
                    index,
                    total,
                    metrics.average_loss(window),
                    window,
                    metrics.win_rate(Player::Blue, window) * 100.0,
                    metrics.first_mover_win_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    episode.replay_buffer().len(),
                ));
            }

            if self.config.eval_interval > 0 && index % self.config.eval_interval == 0 {
                let eval_wr = self.evaluate(agent, episode, index)?;
                self.log(format!(
                    "  >> Eval vs Random ({} games): {:.1}% win rate",
                    self.config.eval_games,
                    eval_wr * 100.0
                ));
            }
        }

        self.log("-------------------------------------------".to_string());
        self.log(format!(
            "Training complete. Total episodes: {}",
            metrics.total_episodes()
        ));

        let final_eval_win_rate = self.evaluate(agent, episode, total + 1)?;
        self.log(format!(
            "Final eval vs Random: {:.1}% win rate",
            final_eval_win_rate * 100.0
        ));

        Ok(TrainingSummary {
            episodes: metrics.total_episodes(),
            blue_win_rate: metrics.win_rate(Player::Blue, window),
            first_mover_win_rate: metrics.first_mover_win_rate(window),
            average_game_length: metrics.average_game_length(window),
            final_eval_win_rate,
        })
    }

    /// Evaluate the agent against a random opponent over `eval_games`,
    /// alternating colors.
    pub fn evaluate(
        &self,
        agent: &mut dyn Agent,
        episode: &mut Episode,
        index: usize,
    ) -> Result<f32, TrainingError> {
        let seed = self.config.seed.map(|seed| episode_seed(seed, index));
        evaluate(episode, agent, self.config.eval_games, seed)
    }

    fn log(&self, line: String) {
        if self.verbose {
            println!("{}", line);
        }
    }
}
