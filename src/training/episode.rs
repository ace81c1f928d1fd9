use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ai::{Agent, RandomAgent};
use crate::config::{AppConfig, BoardConfig};
use crate::error::{BoardError, EpisodeError, TrainingError};
use crate::game::{Cell, GameState, Match, MoveError, Placement, Player};
use crate::training::metrics::EpisodeResult;
use crate::training::replay_buffer::{ReplayBuffer, ReplayConfig};

/// Episode settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Reward of the placement that wins the game.
    pub win_reward: f32,
    /// Push every step into the replay buffer.
    pub collect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        EpisodeConfig {
            win_reward: 1.0,
            collect: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Reset, no stone placed yet.
    Fresh,
    InProgress,
    /// Won or full; only `reset` leaves this phase.
    Done,
}

/// What an agent sees: the board and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub cells: Vec<Cell>,
    pub rows: usize,
    pub columns: usize,
    pub turn: Player,
}

impl Observation {
    pub fn values(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.value()).collect()
    }
}

impl From<&GameState> for Observation {
    fn from(state: &GameState) -> Self {
        Observation {
            cells: state.cells.clone(),
            rows: state.rows,
            columns: state.columns,
            turn: state.turn,
        }
    }
}

/// One step of play: the state before, the action, and the state after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub pre: GameState,
    pub action: usize,
    /// Player who placed the stone.
    pub player: Player,
    pub post: GameState,
    pub reward: f32,
    pub done: bool,
}

impl Transition {
    pub fn pre_observation(&self) -> Observation {
        Observation::from(&self.pre)
    }

    pub fn post_observation(&self) -> Observation {
        Observation::from(&self.post)
    }

    /// Legal actions in the resulting state; empty once the game is over.
    pub fn post_legal_actions(&self) -> Vec<usize> {
        if self.done {
            Vec::new()
        } else {
            self.post.legal_actions()
        }
    }
}

/// A Hex match driven one step at a time, producing training transitions.
#[derive(Debug)]
pub struct Episode {
    rows: usize,
    columns: usize,
    config: EpisodeConfig,
    game: Match,
    phase: EpisodePhase,
    replay_buffer: ReplayBuffer,
    rng: StdRng,
}

impl Episode {
    /// Build an episode; the replay buffer holds one board's worth of steps
    /// unless configured otherwise.
    pub fn new(
        board: &BoardConfig,
        config: &EpisodeConfig,
        replay: &ReplayConfig,
    ) -> Result<Self, BoardError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let first = random_player(&mut rng);
        let game = Match::new(board.rows, board.columns, first)?;
        let capacity = replay.capacity_for(game.board().size());
        Ok(Episode {
            rows: board.rows,
            columns: board.columns,
            config: config.clone(),
            game,
            phase: EpisodePhase::Fresh,
            replay_buffer: ReplayBuffer::new(capacity, replay),
            rng,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, BoardError> {
        Self::new(&config.board, &config.episode, &config.replay)
    }

    /// Start a new match with a randomly chosen first player.
    pub fn reset(&mut self) {
        let first = random_player(&mut self.rng);
        self.reset_with(first);
    }

    /// Start a new match with `first` to move.
    pub fn reset_with(&mut self, first: Player) {
        self.game = self.game.rematch(first);
        self.phase = EpisodePhase::Fresh;
    }

    pub fn observe(&self) -> Observation {
        Observation {
            cells: self.game.board().snapshot(),
            rows: self.rows,
            columns: self.columns,
            turn: self.game.current_player(),
        }
    }

    /// Empty cells; empty only when the board is full.
    pub fn legal_actions(&self) -> Vec<usize> {
        self.game.legal_actions()
    }

    /// Play `action` for the player to move and record the transition.
    pub fn step(&mut self, action: usize) -> Result<Transition, EpisodeError> {
        if self.phase == EpisodePhase::Done {
            return Err(EpisodeError::IllegalStateTransition);
        }

        let pre = self.game.snapshot();
        let player = self.game.current_player();
        let placement = self.game.attempt(action);
        let reward = match placement {
            Placement::Invalid(MoveError::OutOfRange { location, cells }) => {
                return Err(EpisodeError::OutOfRangeLocation { location, cells })
            }
            Placement::Invalid(MoveError::Occupied(location)) => {
                return Err(EpisodeError::OccupiedCell(location))
            }
            Placement::Invalid(MoveError::GameOver) => {
                return Err(EpisodeError::IllegalStateTransition)
            }
            Placement::Won => self.config.win_reward,
            Placement::Accepted => 0.0,
        };

        let done = self.game.is_over();
        self.phase = if done {
            EpisodePhase::Done
        } else {
            EpisodePhase::InProgress
        };

        let transition = Transition {
            pre,
            action,
            player,
            post: self.game.snapshot(),
            reward,
            done,
        };
        if self.config.collect {
            self.replay_buffer.push(transition.clone());
        }
        Ok(transition)
    }

    /// Human entry point: place a stone if possible, never erroring.
    ///
    /// Returns false for an out-of-range or occupied cell, or when the episode
    /// is done; the turn does not pass in that case. No transition is
    /// recorded.
    pub fn attempt(&mut self, location: usize) -> bool {
        if self.phase == EpisodePhase::Done {
            return false;
        }
        if self.game.attempt(location).is_invalid() {
            return false;
        }
        self.phase = if self.game.is_over() {
            EpisodePhase::Done
        } else {
            EpisodePhase::InProgress
        };
        true
    }

    pub fn drain_batch(&mut self) -> Vec<Transition> {
        self.replay_buffer.drain_batch()
    }

    pub fn replay_buffer(&self) -> &ReplayBuffer {
        &self.replay_buffer
    }

    pub fn replay_buffer_mut(&mut self) -> &mut ReplayBuffer {
        &mut self.replay_buffer
    }

    pub fn set_collecting(&mut self, collect: bool) {
        self.config.collect = collect;
    }

    pub fn is_collecting(&self) -> bool {
        self.config.collect
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == EpisodePhase::Done
    }

    pub fn winner(&self) -> Option<Player> {
        self.game.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.game.is_draw()
    }

    pub fn current_player(&self) -> Player {
        self.game.current_player()
    }

    pub fn moves(&self) -> usize {
        self.game.moves()
    }

    pub fn state(&self) -> GameState {
        self.game.snapshot()
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.game.board(), f)
    }
}

fn random_player(rng: &mut StdRng) -> Player {
    if rng.random_bool(0.5) {
        Player::Blue
    } else {
        Player::Red
    }
}

/// Result of playing a single self-play episode.
pub struct EpisodeTrace {
    pub transitions: Vec<Transition>,
    pub result: EpisodeResult,
}

/// Ask `agent` for a move and check it against the legal set.
fn select_legal(
    agent: &mut dyn Agent,
    episode: &Episode,
    training: bool,
) -> Result<usize, TrainingError> {
    let observation = episode.observe();
    let legal = episode.legal_actions();
    let action = agent.select_action(&observation, &legal, training);
    if !legal.contains(&action) {
        return Err(TrainingError::IllegalAction { action, legal });
    }
    Ok(action)
}

/// Play one self-play episode from a fresh reset. Agent plays both sides.
pub fn play_self_play_episode(
    episode: &mut Episode,
    agent: &mut dyn Agent,
) -> Result<EpisodeTrace, TrainingError> {
    episode.reset();
    let first_player = episode.current_player();
    let mut transitions = Vec::new();

    while !episode.is_done() {
        let action = select_legal(agent, episode, true)?;
        transitions.push(episode.step(action)?);
    }

    let game_length = transitions.len();
    Ok(EpisodeTrace {
        transitions,
        result: EpisodeResult {
            winner: episode.winner(),
            first_player,
            game_length,
        },
    })
}

/// Play a single evaluation game between two agents.
/// Returns Some(true) if agent won, Some(false) if agent lost, None if nobody
/// won.
pub fn play_eval_game(
    episode: &mut Episode,
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    agent_player: Player,
) -> Result<Option<bool>, TrainingError> {
    let collecting = episode.is_collecting();
    episode.set_collecting(false);
    let outcome = run_eval_game(episode, agent, opponent, agent_player);
    episode.set_collecting(collecting);
    outcome
}

fn run_eval_game(
    episode: &mut Episode,
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    agent_player: Player,
) -> Result<Option<bool>, TrainingError> {
    episode.reset();
    while !episode.is_done() {
        let action = if episode.current_player() == agent_player {
            select_legal(agent, episode, false)?
        } else {
            select_legal(opponent, episode, false)?
        };
        episode.step(action)?;
    }
    Ok(episode.winner().map(|winner| winner == agent_player))
}

/// Evaluate agent vs random over N games, alternating colors.
pub fn evaluate(
    episode: &mut Episode,
    agent: &mut dyn Agent,
    eval_games: usize,
    seed: Option<u64>,
) -> Result<f32, TrainingError> {
    if eval_games == 0 {
        return Ok(0.0);
    }
    let mut random = match seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    };
    let mut wins = 0;

    for game_idx in 0..eval_games {
        let agent_player = if game_idx % 2 == 0 {
            Player::Blue
        } else {
            Player::Red
        };
        if let Some(true) = play_eval_game(episode, agent, &mut random, agent_player)? {
            wins += 1;
        }
    }

    Ok(wins as f32 / eval_games as f32)
}

/// Derive a deterministic seed for a given episode index.
pub fn episode_seed(base_seed: u64, episode_index: usize) -> u64 {
    // FNV-1a style mixing
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = episode_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
